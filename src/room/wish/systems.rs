//! Wish Systems
//!
//! Prompt visibility, dialog input, submission and the follow-up blow-out.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy::window::{CursorOptions, PrimaryWindow};

use super::state::*;
use super::ui::submit_button_color;
use crate::room::strings;
use crate::room::systems::set_cursor_grab;
use crate::room::types::{
    BlowCandles, Celebration, CursorLock, OpenWishDialog, PlayerProximity, WishDialogClosed,
    WishDialogOpened, WishSubmitted,
};

pub fn update_wish_prompt(
    proximity: Res<PlayerProximity>,
    cursor: Res<CursorLock>,
    celebration: Res<Celebration>,
    dialog: Res<WishDialogState>,
    mut prompts: Query<&mut Visibility, With<WishPrompt>>,
) {
    let visible = wish_prompt_visible(
        proximity.is_near(),
        cursor.entered,
        celebration.candles_blown_out,
    ) && !dialog.is_open();

    for mut visibility in prompts.iter_mut() {
        let wanted = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

/// `X` / `ء` while the prompt is showing, or a click on the prompt when the
/// cursor is free.
pub fn request_wish_dialog(
    keys: Res<ButtonInput<Key>>,
    cursor: Res<CursorLock>,
    dialog: Res<WishDialogState>,
    prompts: Query<&Visibility, With<WishPrompt>>,
    prompt_buttons: Query<&Interaction, (Changed<Interaction>, With<WishPromptButton>)>,
    mut requests: MessageWriter<OpenWishDialog>,
) {
    if dialog.is_open() {
        return;
    }
    let Ok(visibility) = prompts.single() else {
        return;
    };
    if *visibility == Visibility::Hidden {
        return;
    }

    let key_pressed = keys.get_just_pressed().any(is_wish_key);
    let clicked = !cursor.locked && prompt_buttons.iter().any(|i| *i == Interaction::Pressed);

    if key_pressed || clicked {
        requests.write(OpenWishDialog);
    }
}

pub fn open_wish_dialog(
    mut requests: MessageReader<OpenWishDialog>,
    mut dialog: ResMut<WishDialogState>,
    mut cursor: ResMut<CursorLock>,
    mut cursor_options: Query<&mut CursorOptions, With<PrimaryWindow>>,
    mut opened: MessageWriter<WishDialogOpened>,
) {
    if requests.read().count() == 0 || !dialog.open() {
        return;
    }

    info!("Wish dialog opened");
    if let Ok(mut options) = cursor_options.single_mut() {
        set_cursor_grab(&mut options, false);
    }
    cursor.locked = false;
    cursor.relock_in = None;
    opened.write(WishDialogOpened);
}

/// Typed text, Backspace, Enter (newline) / Ctrl+Enter (submit), Escape.
pub fn handle_wish_text_input(
    mut keyboard: MessageReader<KeyboardInput>,
    key_codes: Res<ButtonInput<KeyCode>>,
    mut dialog: ResMut<WishDialogState>,
    mut closed: MessageWriter<WishDialogClosed>,
) {
    if !dialog.is_open() {
        keyboard.clear();
        return;
    }

    let ctrl = key_codes.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);

    for event in keyboard.read() {
        if !event.state.is_pressed() {
            continue;
        }
        match &event.logical_key {
            Key::Enter if ctrl => {
                if dialog.submit() {
                    info!("Submitting wish");
                }
            }
            Key::Enter => dialog.newline(),
            Key::Backspace => dialog.backspace(),
            Key::Space => dialog.push_text(" "),
            Key::Escape => {
                if dialog.cancel() {
                    info!("Wish dialog cancelled");
                    closed.write(WishDialogClosed);
                }
            }
            Key::Character(typed) if !ctrl => dialog.push_text(typed),
            _ => {}
        }
    }
}

pub fn handle_wish_buttons(
    submit: Query<&Interaction, (Changed<Interaction>, With<WishSubmitButton>)>,
    cancel: Query<&Interaction, (Changed<Interaction>, With<WishCancelButton>)>,
    backdrop: Query<&Interaction, (Changed<Interaction>, With<WishBackdrop>)>,
    mut dialog: ResMut<WishDialogState>,
    mut closed: MessageWriter<WishDialogClosed>,
) {
    if !dialog.is_open() {
        return;
    }

    let pressed = |interaction: &Interaction| *interaction == Interaction::Pressed;

    if submit.iter().any(pressed) && dialog.submit() {
        info!("Submitting wish");
        return;
    }

    if (cancel.iter().any(pressed) || backdrop.iter().any(pressed)) && dialog.cancel() {
        info!("Wish dialog cancelled");
        closed.write(WishDialogClosed);
    }
}

/// Finish the busy delay and send the wish.
pub fn tick_wish_submission(
    time: Res<Time>,
    mut dialog: ResMut<WishDialogState>,
    mut submitted: MessageWriter<WishSubmitted>,
    mut closed: MessageWriter<WishDialogClosed>,
) {
    if let Some(wish) = dialog.tick(time.delta_secs()) {
        submitted.write(WishSubmitted { wish });
        closed.write(WishDialogClosed);
    }
}

/// Schedule the cursor grab shortly after the dialog goes away.
pub fn schedule_cursor_relock(
    mut closed: MessageReader<WishDialogClosed>,
    mut cursor: ResMut<CursorLock>,
) {
    if closed.read().count() > 0 {
        cursor.relock_in = Some(CURSOR_RELOCK_DELAY_SECS);
    }
}

pub fn celebrate_wish(
    mut submitted: MessageReader<WishSubmitted>,
    mut celebration: ResMut<Celebration>,
    mut blow: MessageWriter<BlowCandles>,
) {
    for WishSubmitted { wish } in submitted.read() {
        info!("Wish made: {}", wish);
        blow.write(BlowCandles);
        celebration.schedule_blow_out();
    }
}

pub fn tick_celebration(time: Res<Time>, mut celebration: ResMut<Celebration>) {
    if celebration.tick(time.delta_secs()) {
        info!("Candles blown out, restoring the room lights");
    }
}

pub fn render_wish_dialog(
    dialog: Res<WishDialogState>,
    mut backdrop: Query<&mut Node, With<WishBackdrop>>,
    mut text: Query<(&mut Text, &mut TextColor), (With<WishTextDisplay>, Without<WishSubmitLabel>)>,
    mut label: Query<&mut Text, (With<WishSubmitLabel>, Without<WishTextDisplay>)>,
    mut submit: Query<&mut BackgroundColor, With<WishSubmitButton>>,
) {
    if !dialog.is_changed() {
        return;
    }

    for mut node in backdrop.iter_mut() {
        node.display = if dialog.is_open() {
            Display::Flex
        } else {
            Display::None
        };
    }

    for (mut text, mut color) in text.iter_mut() {
        if dialog.text().is_empty() {
            text.0 = strings::WISH_PLACEHOLDER.to_string();
            color.0 = Color::WHITE.with_alpha(0.5);
        } else {
            text.0 = format!("{}|", dialog.text());
            color.0 = Color::WHITE;
        }
    }

    for mut text in label.iter_mut() {
        text.0 = if dialog.is_submitting() {
            strings::WISH_SUBMITTING
        } else {
            strings::WISH_SUBMIT
        }
        .to_string();
    }

    for mut background in submit.iter_mut() {
        background.0 = submit_button_color(dialog.can_submit());
    }
}
