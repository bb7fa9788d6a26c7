use crate::math::Point2;

/// Modifier keys held during a pointer or keyboard event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift: 10-unit keyboard nudges instead of 1.
    pub shift: bool,
    /// Ctrl/Cmd: additive selection.
    pub ctrl: bool,
}

/// A pointer event in world coordinates.
///
/// The host applies its screen→world transform
/// (`world = (screen − offset) / zoom`) before events reach the session;
/// the kernel never sees screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point2,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates a pointer event with no modifiers held.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    /// Returns the same event with the given modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keyboard keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Delete,
    Backspace,
    Escape,
    Enter,
}
