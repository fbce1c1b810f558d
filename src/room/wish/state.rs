//! Wish State
//!
//! Dialog model kept free of ECS so the submit rules can be tested directly.

use bevy::input::keyboard::Key;
use bevy::prelude::*;

/// How long the busy label shows before the wish is sent.
pub const WISH_SUBMIT_DELAY_SECS: f32 = 0.5;

/// Delay before the cursor is grabbed again after the dialog closes.
pub const CURSOR_RELOCK_DELAY_SECS: f32 = 0.1;

#[derive(Resource, Debug, Default)]
pub struct WishDialogState {
    open: bool,
    text: String,
    submitting: Option<f32>,
}

impl WishDialogState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.open && !self.is_submitting() && !self.text.trim().is_empty()
    }

    /// Open with an empty text. Returns false if already open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.text.clear();
        self.submitting = None;
        true
    }

    fn editable(&self) -> bool {
        self.open && !self.is_submitting()
    }

    /// Append typed text, dropping control characters.
    pub fn push_text(&mut self, typed: &str) {
        if !self.editable() {
            return;
        }
        self.text.extend(typed.chars().filter(|c| !c.is_control()));
    }

    pub fn newline(&mut self) {
        if self.editable() {
            self.text.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.editable() {
            self.text.pop();
        }
    }

    /// Start the busy countdown. Returns false when submitting is not allowed.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submitting = Some(WISH_SUBMIT_DELAY_SECS);
        true
    }

    /// Advance the busy countdown. Yields the trimmed wish and closes the
    /// dialog once it elapses.
    pub fn tick(&mut self, dt: f32) -> Option<String> {
        let remaining = self.submitting? - dt;
        if remaining > 0.0 {
            self.submitting = Some(remaining);
            return None;
        }

        self.submitting = None;
        self.open = false;
        let wish = self.text.trim().to_string();
        self.text.clear();
        Some(wish)
    }

    /// Close without submitting. Refused while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        if !self.open || self.is_submitting() {
            return false;
        }
        self.open = false;
        self.text.clear();
        true
    }
}

pub fn wish_prompt_visible(near_cake: bool, entered: bool, candles_blown_out: bool) -> bool {
    near_cake && entered && !candles_blown_out
}

/// `X` on a Latin layout, `ء` on the Arabic one.
pub fn is_wish_key(key: &Key) -> bool {
    match key {
        Key::Character(c) => matches!(c.as_str(), "x" | "X" | "ء"),
        _ => false,
    }
}

// UI markers

#[derive(Component)]
pub struct WishPrompt;

#[derive(Component)]
pub struct WishPromptButton;

/// Full-screen backdrop behind the dialog; clicking it cancels.
#[derive(Component)]
pub struct WishBackdrop;

#[derive(Component)]
pub struct WishTextDisplay;

#[derive(Component)]
pub struct WishSubmitButton;

#[derive(Component)]
pub struct WishSubmitLabel;

#[derive(Component)]
pub struct WishCancelButton;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_requires_text() {
        let mut state = WishDialogState::default();
        state.open();
        assert!(!state.can_submit());
        state.push_text("   ");
        state.newline();
        assert!(!state.can_submit());
        assert!(!state.submit());
        state.push_text("كعكة");
        assert!(state.can_submit());
    }

    #[test]
    fn test_busy_delay_then_submits_trimmed() {
        let mut state = WishDialogState::default();
        state.open();
        state.push_text("  a wish ");
        assert!(state.submit());
        assert!(state.is_submitting());
        assert_eq!(state.tick(0.3), None);
        assert_eq!(state.tick(0.3).as_deref(), Some("a wish"));
        assert!(!state.is_open());
        assert!(state.text().is_empty());
    }

    #[test]
    fn test_cancel_refused_while_submitting() {
        let mut state = WishDialogState::default();
        state.open();
        state.push_text("x");
        state.submit();
        assert!(!state.cancel());
        assert!(state.is_open());
    }

    #[test]
    fn test_reopen_clears_text() {
        let mut state = WishDialogState::default();
        state.open();
        state.push_text("old");
        assert!(state.cancel());
        assert!(state.open());
        assert!(state.text().is_empty());
    }

    #[test]
    fn test_editing_ignored_when_closed_or_busy() {
        let mut state = WishDialogState::default();
        state.push_text("a");
        assert!(state.text().is_empty());

        state.open();
        state.push_text("ab\u{8}");
        state.backspace();
        assert_eq!(state.text(), "a");
        state.submit();
        state.push_text("zzz");
        assert_eq!(state.text(), "a");
    }

    #[test]
    fn test_prompt_visibility() {
        assert!(wish_prompt_visible(true, true, false));
        assert!(!wish_prompt_visible(false, true, false));
        assert!(!wish_prompt_visible(true, false, false));
        assert!(!wish_prompt_visible(true, true, true));
    }

    #[test]
    fn test_wish_key_on_both_layouts() {
        assert!(is_wish_key(&Key::Character("x".into())));
        assert!(is_wish_key(&Key::Character("ء".into())));
        assert!(!is_wish_key(&Key::Character("z".into())));
        assert!(!is_wish_key(&Key::Escape));
    }
}
