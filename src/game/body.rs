//! Shared spatial state
//!
//! Every game object (player, platform, coin) embeds a `Body`: position and
//! size in normalized world units plus the bits the renderer needs to place
//! its sprite. Behaviour lives on the owning type, not here.

/// Axis-aligned box with render placement hints.
///
/// `x` is in screen widths (0..1 is the visible strip), `y` grows upward in
/// screen heights. `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite offset from the hitbox (visual only)
    pub offset_x: f32,
    pub offset_y: f32,
    /// Draw order, lower first
    pub z_index: i32,
    /// Draw the sprite flipped horizontally
    pub mirror_x: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
            z_index: 0,
            mirror_x: false,
        }
    }

    pub fn with_offset(mut self, offset_x: f32, offset_y: f32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Strict horizontal overlap (touching edges do not count).
    pub fn overlaps_x(&self, other: &Body) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    /// Strict AABB overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.overlaps_x(other) && self.top() > other.y && self.y < other.top()
    }
}
