use serde::{Deserialize, Serialize};

/// Top/left coordinate of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f32,
    pub left: f32,
}

/// Origin of a coordinate frame that a nested sub-layout is composed into.
pub type Offset = Position;

impl Position {
    pub const ORIGIN: Position = Position::new(0.0, 0.0);

    pub const fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }

    /// Translate a position local to a sub-layout into the frame whose origin is `offset`.
    pub fn compose(self, offset: Offset) -> Position {
        Position {
            top: self.top + offset.top,
            left: self.left + offset.left,
        }
    }
}

/// Compose a local position with an optional parent offset; no offset is the identity.
pub fn compose(local: Position, offset: Option<Offset>) -> Position {
    local.compose(offset.unwrap_or(Position::ORIGIN))
}
