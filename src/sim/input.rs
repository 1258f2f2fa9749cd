//! Input events and held-intent flags
//!
//! Input sources deliver discrete events between ticks. Each one only flips a
//! flag that the next tick reads; nothing here runs simulation logic.

use serde::{Deserialize, Serialize};

/// Discrete input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    JumpDown,
    JumpUp,
    /// Play-again request (only honoured after game over)
    Restart,
    /// Toggle demo mode (autopilot drives the intent flags)
    ToggleDemo,
}

/// Horizontal and jump intent currently held by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Intent {
    /// Apply an intent toggle. Returns false for events that are not intent toggles.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::LeftDown => self.left = true,
            InputEvent::LeftUp => self.left = false,
            InputEvent::RightDown => self.right = true,
            InputEvent::RightUp => self.right = false,
            InputEvent::JumpDown => self.jump = true,
            InputEvent::JumpUp => self.jump = false,
            InputEvent::Restart | InputEvent::ToggleDemo => return false,
        }
        true
    }

    /// Whether any horizontal direction is held
    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    /// Release everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
