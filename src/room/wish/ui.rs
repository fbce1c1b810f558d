//! Wish UI
//!
//! Spawns the bottom-center prompt and the (initially hidden) wish dialog.

use bevy::prelude::*;
use bevy::ui::FocusPolicy;

use super::state::*;
use crate::room::assets::RoomAssets;
use crate::room::strings;

const ROSE: Color = Color::srgb(1.0, 0.41, 0.71);
const PANEL: Color = Color::srgba(0.12, 0.06, 0.14, 0.95);
const CANCEL: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);

pub fn spawn_wish_ui(mut commands: Commands, assets: Res<RoomAssets>) {
    let font = assets.font.clone();
    let text_font = |size: f32| TextFont {
        font: font.clone(),
        font_size: size,
        ..default()
    };

    // Prompt
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(40.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            WishPrompt,
            Visibility::Hidden,
            ZIndex(20),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Button,
                    WishPromptButton,
                    Node {
                        padding: UiRect::axes(Val::Px(28.0), Val::Px(14.0)),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(4.0),
                        ..default()
                    },
                    BackgroundColor(ROSE.with_alpha(0.85)),
                    BorderRadius::all(Val::Px(24.0)),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(strings::WISH_PROMPT),
                        text_font(24.0),
                        TextColor(Color::WHITE),
                    ));
                    button.spawn((
                        Text::new(strings::WISH_PROMPT_KEY),
                        text_font(14.0),
                        TextColor(Color::WHITE.with_alpha(0.8)),
                    ));
                });
        });

    // Dialog
    commands
        .spawn((
            Button,
            WishBackdrop,
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(0.6)),
            ZIndex(100),
        ))
        .with_children(|backdrop| {
            backdrop
                .spawn((
                    Node {
                        width: Val::Px(480.0),
                        padding: UiRect::all(Val::Px(24.0)),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Stretch,
                        row_gap: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(PANEL),
                    BorderRadius::all(Val::Px(20.0)),
                    FocusPolicy::Block,
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(strings::WISH_TITLE),
                        text_font(30.0),
                        TextColor(ROSE),
                    ));
                    panel.spawn((
                        Text::new(strings::WISH_SUBTITLE),
                        text_font(16.0),
                        TextColor(Color::WHITE.with_alpha(0.8)),
                    ));

                    panel
                        .spawn((
                            Node {
                                min_height: Val::Px(110.0),
                                padding: UiRect::all(Val::Px(12.0)),
                                ..default()
                            },
                            BackgroundColor(Color::WHITE.with_alpha(0.08)),
                            BorderRadius::all(Val::Px(12.0)),
                        ))
                        .with_children(|field| {
                            field.spawn((
                                Text::new(strings::WISH_PLACEHOLDER),
                                text_font(18.0),
                                TextColor(Color::WHITE.with_alpha(0.5)),
                                WishTextDisplay,
                            ));
                        });

                    panel
                        .spawn(Node {
                            justify_content: JustifyContent::FlexEnd,
                            column_gap: Val::Px(12.0),
                            ..default()
                        })
                        .with_children(|row| {
                            row.spawn((
                                Button,
                                WishCancelButton,
                                Node {
                                    padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                                    ..default()
                                },
                                BackgroundColor(CANCEL),
                                BorderRadius::all(Val::Px(16.0)),
                            ))
                            .with_children(|button| {
                                button.spawn((
                                    Text::new(strings::WISH_CANCEL),
                                    text_font(16.0),
                                    TextColor(Color::WHITE),
                                ));
                            });

                            row.spawn((
                                Button,
                                WishSubmitButton,
                                Node {
                                    padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                                    ..default()
                                },
                                BackgroundColor(ROSE.with_alpha(0.4)),
                                BorderRadius::all(Val::Px(16.0)),
                            ))
                            .with_children(|button| {
                                button.spawn((
                                    Text::new(strings::WISH_SUBMIT),
                                    text_font(16.0),
                                    TextColor(Color::WHITE),
                                    WishSubmitLabel,
                                ));
                            });
                        });
                });
        });
}

/// Submit button color for the current dialog state.
pub fn submit_button_color(enabled: bool) -> Color {
    if enabled {
        ROSE
    } else {
        ROSE.with_alpha(0.4)
    }
}
