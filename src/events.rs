use crate::geometry::Point;

/// Single-pointer input as delivered by the host toolkit, in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Cancel,
}
