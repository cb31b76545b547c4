//! Per-column projection: one traced ray becomes one [`WallSlice`].
//!
//! Everything here is a pure function of the view and the column index, so
//! columns can be projected on any thread in any order.

use glam::Vec2;

use crate::{
    renderer::{
        Color, View,
        dda::{self, Hit, Side},
        shade,
    },
    world::{Material, TEX_WIDTH, TextureId},
};

/// Hits nearer than this are skipped instead of drawn as a huge column.
pub const NEAR_CLIP: f32 = 0.2;

/// How a slice gets its pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    /// One colour for the whole run, side and fog shading already applied.
    Flat(Color),
    /// Sampled per row from texture `tex` at column `tex_x`.
    Textured { tex: TextureId, tex_x: usize },
}

/// One vertical wall run ready for compositing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlice {
    /// Screen columns covered, `x0 .. x1` (one stride block).
    pub x0: usize,
    pub x1: usize,
    /// Screen rows covered, `y_start .. y_end`.
    pub y_start: usize,
    pub y_end: usize,
    /// Unclipped projected height in pixels.
    pub line_height: f32,
    pub distance: f32,
    pub side: Side,
    pub surface: Surface,
}

impl WallSlice {
    /// True if row `y` belongs to this run.
    #[inline]
    pub fn covers(&self, y: usize) -> bool {
        y >= self.y_start && y < self.y_end
    }
}

/*──────────────────────── projection maths ───────────────────────────*/

/// Projected wall height for a hit at `distance` on a `height`-pixel screen.
#[inline]
pub fn line_height(height: usize, distance: f32) -> f32 {
    height as f32 / distance
}

/// First and one-past-last row of a wall of `line_height` pixels centred on
/// the horizon, both clamped to `0 ..= height - 1`.
#[inline]
pub fn y_limits(line_height: f32, height: usize) -> (usize, usize) {
    let h = height as f32;
    let max = (height.max(1) - 1) as f32;
    let y_start = ((h - line_height) * 0.5).clamp(0.0, max) as usize;
    let y_end = ((h + line_height) * 0.5).clamp(0.0, max) as usize;
    (y_start, y_end)
}

/// Fractional position along the wall face where the ray hit, in `[0, 1)`.
#[inline]
pub fn wall_x(origin: Vec2, ray: Vec2, hit: &Hit) -> f32 {
    let along = match hit.side {
        Side::Vertical => origin.y + hit.distance * ray.y,
        Side::Horizontal => origin.x + hit.distance * ray.x,
    };
    let f = along - along.floor();
    // `f` can round up to exactly 1.0 for tiny negative inputs
    if f >= 1.0 { 0.0 } else { f }
}

/// Texture column for `wall_x`, mirrored so textures read the same way from
/// whichever side the wall is seen.
#[inline]
pub fn texture_x(wall_x: f32, side: Side, ray: Vec2) -> usize {
    let mut tex_x = ((wall_x * TEX_WIDTH as f32) as usize).min(TEX_WIDTH - 1);
    let mirrored = match side {
        Side::Vertical => ray.x > 0.0,
        Side::Horizontal => ray.y < 0.0,
    };
    if mirrored {
        tex_x = TEX_WIDTH - tex_x - 1;
    }
    tex_x
}

/*──────────────────────── column driver ──────────────────────────────*/

/// Trace and project the block of columns starting at `x0` (`stride` wide).
///
/// Returns `None` when the column must keep its background: no hit, a hit
/// closer than `near_clip`, or a tile code the renderer does not recognise.
pub fn project_column(view: &View, x0: usize, stride: usize, near_clip: f32) -> Option<WallSlice> {
    let (width, height) = view.screen;
    let ray = view.camera.ray(x0, width);
    let hit = dda::cast(view.camera.pos, ray, view.grid)?;

    let distance = hit.distance;
    if distance < near_clip {
        return None;
    }

    let code = view.grid.get(hit.tile)?;
    let surface = match Material::of(code, view.textures.len()) {
        Material::Flat(idx) => Surface::Flat(shade::flat(idx, hit.side, distance)),
        Material::Textured(tex) => {
            let wx = wall_x(view.camera.pos, ray, &hit);
            Surface::Textured {
                tex,
                tex_x: texture_x(wx, hit.side, ray),
            }
        }
        Material::Empty | Material::Unknown => return None,
    };

    let lh = line_height(height, distance);
    let (y_start, y_end) = y_limits(lh, height);

    Some(WallSlice {
        x0,
        x1: (x0 + stride).min(width),
        y_start,
        y_end,
        line_height: lh,
        distance,
        side: hit.side,
        surface,
    })
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Camera, Grid, TextureBank};
    use glam::IVec2;

    #[test]
    fn line_height_strictly_decreases_with_distance() {
        let mut last = f32::INFINITY;
        for i in 1..200 {
            let lh = line_height(480, 0.1 * i as f32);
            assert!(lh < last);
            last = lh;
        }
    }

    #[test]
    fn y_limits_centre_and_clamp() {
        assert_eq!(y_limits(100.0, 480), (190, 290));
        // taller than the screen: clamped to the full height
        assert_eq!(y_limits(2000.0, 480), (0, 479));
        assert_eq!(y_limits(0.0, 480), (240, 240));
    }

    #[test]
    fn wall_x_uses_the_other_axis() {
        let hit = Hit {
            distance: 2.0,
            side: Side::Vertical,
            tile: IVec2::new(3, 1),
        };
        let wx = wall_x(Vec2::new(1.0, 1.25), Vec2::new(1.0, 0.1), &hit);
        assert!((wx - 0.45).abs() < 1e-5);

        let hit = Hit {
            side: Side::Horizontal,
            ..hit
        };
        let wx = wall_x(Vec2::new(1.25, 1.0), Vec2::new(-0.4, 1.0), &hit);
        assert!((wx - 0.45).abs() < 1e-5);
    }

    #[test]
    fn wall_x_and_tex_x_stay_in_range() {
        let origins = [Vec2::new(2.5, 2.5), Vec2::new(2.0, 2.0), Vec2::new(2.999, 2.001)];
        let rays = [
            Vec2::new(1.0, 0.37),
            Vec2::new(-1.0, 0.61),
            Vec2::new(0.2, -1.0),
            Vec2::new(-0.93, -0.11),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
        ];
        let mut tiles = vec![0; 36];
        for i in 0..6 {
            for (x, y) in [(i, 0), (i, 5), (0, i), (5, i)] {
                tiles[y * 6 + x] = 1;
            }
        }
        let g = Grid::new(6, tiles, 0).unwrap();
        for o in origins {
            for r in rays {
                let hit = dda::cast(o, r, &g).unwrap();
                let wx = wall_x(o, r, &hit);
                assert!((0.0..1.0).contains(&wx), "wall_x {wx} for {o} {r}");
                let tx = texture_x(wx, hit.side, r);
                assert!(tx < TEX_WIDTH);
            }
        }
    }

    #[test]
    fn texture_x_flips_per_side_and_sign() {
        // 0.25 -> column 16, mirrored -> 47
        assert_eq!(texture_x(0.25, Side::Vertical, Vec2::new(-1.0, 0.0)), 16);
        assert_eq!(texture_x(0.25, Side::Vertical, Vec2::new(1.0, 0.0)), 47);
        assert_eq!(texture_x(0.25, Side::Horizontal, Vec2::new(0.0, 1.0)), 16);
        assert_eq!(texture_x(0.25, Side::Horizontal, Vec2::new(0.0, -1.0)), 47);
        // extremes of the range
        assert_eq!(texture_x(0.0, Side::Vertical, Vec2::new(1.0, 0.0)), 63);
        assert_eq!(texture_x(0.99999, Side::Vertical, Vec2::new(1.0, 0.0)), 0);
        assert_eq!(texture_x(1.0, Side::Horizontal, Vec2::new(0.0, 1.0)), 63);
    }

    #[test]
    fn project_skips_near_and_unknown() {
        let mut tiles = vec![0; 25];
        tiles[2 * 5 + 2] = 1;
        let g = Grid::new(5, tiles, 0).unwrap();
        let bank = TextureBank::new();
        // camera 0.1 in front of the wall face at x = 2
        let cam = Camera::new(Vec2::new(1.9, 2.5), Vec2::X, Vec2::new(0.0, 0.66));
        let view = View {
            screen: (64, 48),
            camera: &cam,
            grid: &g,
            textures: &bank,
        };
        assert_eq!(project_column(&view, 32, 1, NEAR_CLIP), None);
        assert!(project_column(&view, 32, 1, 0.05).is_some());
    }

    #[test]
    fn stride_block_is_clipped_to_width() {
        let mut tiles = vec![0; 25];
        for y in 0..5 {
            tiles[y * 5 + 4] = 3;
        }
        let g = Grid::new(5, tiles, 0).unwrap();
        let bank = TextureBank::new();
        let cam = Camera::new(Vec2::new(1.5, 2.5), Vec2::X, Vec2::new(0.0, 0.66));
        let view = View {
            screen: (10, 8),
            camera: &cam,
            grid: &g,
            textures: &bank,
        };
        let s = project_column(&view, 8, 4, NEAR_CLIP).unwrap();
        assert_eq!((s.x0, s.x1), (8, 10));
        assert_eq!(s.side, Side::Vertical);
        assert!(matches!(s.surface, Surface::Flat(_)));
    }
}
