//! HUD components and loading progress

use bevy::prelude::*;

/// Crosshair container, shown while a pickable is under the screen center.
#[derive(Component)]
pub struct Crosshair;

/// Floating hint panel (hover and holding hints).
#[derive(Component)]
pub struct HintPanel;

#[derive(Component)]
pub struct HintText;

/// Welcome card shown until the player first clicks into the room.
#[derive(Component)]
pub struct InstructionsOverlay;

#[derive(Component)]
pub struct LoadingScreen;

#[derive(Component)]
pub struct LoadingPercentText;

/// Round music toggle in the top-right corner.
#[derive(Component)]
pub struct MuteButton;

#[derive(Component)]
pub struct MuteLabel;

/// Seconds the loading screen takes to fade after everything settled.
pub const LOADING_FADE_SECS: f32 = 0.5;

/// Asset loading progress as shown by the loading screen.
#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub total: usize,
    /// Loaded or failed.
    pub settled: usize,
    fade_remaining: Option<f32>,
    finished: bool,
}

impl LoadingProgress {
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.settled.min(self.total) as f32 / self.total as f32) * 100.0
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn update(&mut self, settled: usize, total: usize, dt: f32) {
        if self.finished {
            return;
        }
        self.settled = settled;
        self.total = total;

        match self.fade_remaining {
            None if self.percent() >= 100.0 => {
                self.fade_remaining = Some(LOADING_FADE_SECS);
            }
            Some(remaining) => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.fade_remaining = None;
                    self.finished = true;
                } else {
                    self.fade_remaining = Some(remaining);
                }
            }
            None => {}
        }
    }

    /// Opacity of the loading screen in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        if self.finished {
            return 0.0;
        }
        match self.fade_remaining {
            Some(remaining) => (remaining / LOADING_FADE_SECS).clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}
