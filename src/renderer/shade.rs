//! Colour resolution for wall pixels.
//!
//! * Flat walls: palette colour, side shading, then distance fog; resolved
//!   once per column.
//! * Textured walls: one texel per output row, halved on horizontal faces.

use crate::{
    renderer::{
        Color,
        column::{Surface, WallSlice},
        dda::Side,
    },
    world::{TEX_HEIGHT, TextureBank},
};

/// Colours for tile codes `1..=8`.
pub const FLAT_PALETTE: [Color; 8] = [
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(0, 0, 255),
    Color::rgb(255, 255, 0),
    Color::rgb(255, 0, 255),
    Color::rgb(0, 255, 255),
    Color::rgb(255, 255, 255),
    Color::rgb(255, 155, 0),
];

/// Per-channel amount taken off flat walls seen on a horizontal face.
pub const SIDE_SHADE: u8 = 50;

/// Fog strength at `distance`: 0 at the eye, approaching 1 far away.
#[inline]
pub fn fog(distance: f32) -> f32 {
    1.0 - 1.0 / (distance + 1.0)
}

/// Final colour of a flat wall of palette entry `idx`.
pub fn flat(idx: u8, side: Side, distance: f32) -> Color {
    let base = FLAT_PALETTE[idx as usize % FLAT_PALETTE.len()];
    let lit = match side {
        Side::Vertical => base,
        Side::Horizontal => base.darkened(SIDE_SHADE),
    };
    lit.faded(fog(distance))
}

/// Texture row for screen row `y` of a wall `line_height` pixels tall on a
/// `height`-pixel screen.
///
/// Rows are measured from the unclipped top of the wall, so a wall taller
/// than the screen still samples the middle of the texture. Truncating the
/// run to whole pixels can put the first or last row a fraction of a texel
/// outside the texture (`-1` or exactly `TEX_HEIGHT`); those rows are pinned
/// to the edge texel row. Wrapping them would repeat the top of the texture
/// at the bottom of the wall and vice versa.
#[inline]
pub fn texture_row(y: usize, line_height: f32, height: usize) -> usize {
    let step_y = TEX_HEIGHT as f32 / line_height;
    let offset = line_height * 0.5 - height as f32 * 0.5;
    let raw = (step_y * (y as f32 + offset)).floor() as i32;
    raw.clamp(0, TEX_HEIGHT as i32 - 1) as usize
}

/// Side shading for a sampled texel.
#[inline]
pub fn shade_texel(c: Color, side: Side) -> Color {
    match side {
        Side::Vertical => c,
        Side::Horizontal => c.halved(),
    }
}

impl WallSlice {
    /// Colour of row `y`, or `None` if the slice's texture is missing from
    /// `bank` (the background then shows through).
    #[inline]
    pub fn color_at(&self, y: usize, height: usize, bank: &TextureBank) -> Option<Color> {
        match self.surface {
            Surface::Flat(c) => Some(c),
            Surface::Textured { tex, tex_x } => {
                let tex = bank.texture(tex).ok()?;
                let v = texture_row(y, self.line_height, height);
                Some(shade_texel(tex.texel(tex_x, v), self.side))
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
