//! Controller and selection events consumed by locomotion

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named events emitted by the controller layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LocomotionEvent {
    /// Start moving along Z; `direction` is a signed multiplier of velocity
    ZTranslationStart { direction: f32 },
    /// Start moving along X; `direction` is a signed multiplier of velocity
    XTranslationStart { direction: f32 },
    ZTranslationEnd,
    XTranslationEnd,
    /// Absolute pointer/look position
    Orientation { rotation: Vec2 },
    /// Absolute pointer/look position used only to sync the delta baseline
    CurrentOrientation { rotation: Vec2 },
    /// Trigger press; touches are ignored
    TriggerPressed { touch: bool },
    ThumbpadPressed,
    ThumbpadTouched,
    ThumbpadUntouched,
}

/// Events from the object-selection layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionEvent {
    Selected,
}

/// Anything locomotion can be fed through a single channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Controller(LocomotionEvent),
    Selection(SelectionEvent),
}

impl From<LocomotionEvent> for InputEvent {
    fn from(event: LocomotionEvent) -> Self {
        InputEvent::Controller(event)
    }
}

impl From<SelectionEvent> for InputEvent {
    fn from(event: SelectionEvent) -> Self {
        InputEvent::Selection(event)
    }
}
