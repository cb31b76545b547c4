//! ---------------------------------------------------------------------------
//! Grid traversal (Digital Differential Analyzer)
//!
//! Walks a ray through the grid one tile boundary at a time, always crossing
//! whichever axis boundary is nearer along the ray, until it enters a solid
//! tile or gives up after [`MAX_STEPS`] crossings.
//!
//! * Ties (`side_dist.x == side_dist.y`) advance the **y** axis.
//! * Tiles outside the grid read as empty, so a ray that leaves the map keeps
//!   stepping until the cap and reports no hit.
//! ---------------------------------------------------------------------------

use glam::{IVec2, Vec2};

use crate::world::Grid;

/// Upper bound on boundary crossings per ray.
pub const MAX_STEPS: u32 = 100;

/// Stand-in for `1/0` on an axis-aligned ray; never the smaller side distance.
pub const DELTA_INFINITY: f32 = 1e30;

/// Which kind of grid line the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// An x-step: the wall face lies on a vertical grid line.
    Vertical,
    /// A y-step: the wall face lies on a horizontal grid line.
    Horizontal,
}

impl Side {
    /// Numeric form, `0` for vertical and `1` for horizontal.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Vertical => 0,
            Side::Horizontal => 1,
        }
    }
}

/// A ray that found a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Distance perpendicular to the camera plane, in ray-direction units.
    pub distance: f32,
    pub side: Side,
    /// Solid tile that stopped the ray.
    pub tile: IVec2,
}

/// Per-axis stepping state for one ray.
#[derive(Clone, Copy, Debug)]
struct Walker {
    tile: IVec2,
    step: IVec2,
    side_dist: Vec2,
    delta: Vec2,
}

impl Walker {
    fn new(origin: Vec2, ray: Vec2) -> Self {
        let start = origin.floor();
        // fraction within the start tile, always in [0, 1)
        let frac = origin - start;

        let delta = Vec2::new(inv_abs(ray.x), inv_abs(ray.y));

        let (step_x, side_x) = if ray.x < 0.0 {
            (-1, frac.x * delta.x)
        } else {
            (1, (1.0 - frac.x) * delta.x)
        };
        let (step_y, side_y) = if ray.y < 0.0 {
            (-1, frac.y * delta.y)
        } else {
            (1, (1.0 - frac.y) * delta.y)
        };

        Self {
            tile: start.as_ivec2(),
            step: IVec2::new(step_x, step_y),
            side_dist: Vec2::new(side_x, side_y),
            delta,
        }
    }

    /// Cross the nearer boundary; returns the axis advanced.
    #[inline]
    fn advance(&mut self) -> Side {
        if self.side_dist.x < self.side_dist.y {
            self.side_dist.x += self.delta.x;
            self.tile.x += self.step.x;
            Side::Vertical
        } else {
            self.side_dist.y += self.delta.y;
            self.tile.y += self.step.y;
            Side::Horizontal
        }
    }

    /// Side distance minus the last over-step on `side`'s axis.
    #[inline]
    fn perpendicular(&self, side: Side) -> f32 {
        match side {
            Side::Vertical => self.side_dist.x - self.delta.x,
            Side::Horizontal => self.side_dist.y - self.delta.y,
        }
    }
}

/// `|1 / v|`, or [`DELTA_INFINITY`] when that does not fit in an `f32`
/// (zero and subnormal components).
#[inline]
fn inv_abs(v: f32) -> f32 {
    let d = (1.0 / v).abs();
    if d.is_finite() { d } else { DELTA_INFINITY }
}

/// Trace `ray` from `origin` through `grid`.
///
/// Returns `None` when no solid tile is met within [`MAX_STEPS`] crossings.
pub fn cast(origin: Vec2, ray: Vec2, grid: &Grid) -> Option<Hit> {
    let mut w = Walker::new(origin, ray);

    for _ in 0..MAX_STEPS {
        let side = w.advance();
        if grid.is_solid(w.tile) {
            return Some(Hit {
                distance: w.perpendicular(side),
                side,
                tile: w.tile,
            });
        }
    }
    None
}

/*──────────────────────────────── Tests ───────────────────────────────*/
