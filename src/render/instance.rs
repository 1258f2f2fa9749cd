//! Instance types handed to the external renderer

use bytemuck::{Pod, Zeroable};

/// One textured quad: centre, half extents, rotation and tint
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub half_size: [f32; 2],
    /// Degrees, counter-clockwise
    pub rotation: f32,
    /// Index into [`super::sprites::ATLAS`]
    pub sprite: u32,
    pub color: [f32; 4],
}

impl SpriteInstance {
    pub const fn new(x: f32, y: f32, half_w: f32, half_h: f32, sprite: u32) -> Self {
        Self {
            position: [x, y],
            half_size: [half_w, half_h],
            rotation: 0.0,
            sprite,
            color: colors::WHITE,
        }
    }

    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    /// Raw bytes for an instance buffer upload
    pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BONUS: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const SCORE_TEXT: [f32; 4] = [0.97, 0.97, 1.0, 1.0];
    pub const GAME_OVER_TEXT: [f32; 4] = [0.86, 0.08, 0.24, 1.0];

    /// Star palette, indexed by `Star::color`
    pub const STARS: [[f32; 4]; 8] = [
        [1.0, 1.0, 0.0, 1.0], // yellow
        [0.0, 1.0, 1.0, 1.0], // cyan
        [1.0, 0.0, 1.0, 1.0], // magenta
        [1.0, 0.65, 0.0, 1.0], // orange
        [1.0, 1.0, 1.0, 1.0], // white
        [0.56, 0.93, 0.56, 1.0], // light green
        [1.0, 0.0, 0.0, 1.0], // red
        [0.29, 0.0, 0.51, 1.0], // indigo
    ];
}
