use serde::Serialize;

/// Position inside a panel's scrollable content, in pixels.
///
/// The frame is y-up: the bottom edge of the content sits at `y = 0` and the
/// top edge at `y = content_height`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
        }
    }
}

/// Width and height of a placed item, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_only_vertical_axis() {
        let moved = Point::new(4.0, 10.0).offset_y(-3.5);
        assert_eq!(moved, Point::new(4.0, 6.5));
    }

    #[test]
    fn square_has_equal_sides() {
        assert_eq!(Size::square(24.0), Size::new(24.0, 24.0));
    }
}
