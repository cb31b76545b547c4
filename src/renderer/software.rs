//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills an `&mut [u32]` frame-buffer in **0x00RRGGBB** format.
//! * Phase 1 traces every column block into a [`WallSlice`]; phase 2 walks the
//!   frame row by row and paints the slices covering each row.
//! * Both phases only read the grid, camera and textures, and every write
//!   lands in a region owned by exactly one task (one slice slot, one row),
//!   so they run on the rayon pool without locks. The serial path produces
//!   the same bits.
//! ---------------------------------------------------------------------------

use rayon::prelude::*;

use crate::{
    renderer::{
        RenderError, RenderSettings, Renderer, RendererExt, Rgba, View,
        column::{WallSlice, project_column},
    },
    world::{Camera, Grid, TextureBank},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// DDA column renderer with reusable scratch buffers.
pub struct Software {
    settings: RenderSettings,
    scratch: Vec<Rgba>,
    /* ceiling above the horizon, floor below; copied in at frame start */
    background: Vec<Rgba>,
    /* one slot per column block, reused across frames */
    slices: Vec<Option<WallSlice>>,
    width: usize,
    height: usize,
}

impl Default for Software {
    fn default() -> Self {
        Self {
            settings: RenderSettings::default(),
            scratch: Vec::new(),
            background: Vec::new(),
            slices: Vec::new(),
            width: 0,
            height: 0,
        }
    }
}

impl Software {
    pub fn new(settings: RenderSettings) -> Result<Self, RenderError> {
        if settings.stride == 0 {
            return Err(RenderError::ZeroStride);
        }
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Slices produced by the last `draw_view`, one per column block.
    pub fn slices(&self) -> &[Option<WallSlice>] {
        &self.slices
    }

    fn rebuild_background(&mut self) {
        let (w, h) = (self.width, self.height);
        let horizon = h / 2;
        let ceiling = self.settings.ceiling.packed();
        let floor = self.settings.floor.packed();

        self.background.clear();
        self.background.resize(w * h, floor);
        self.background[..w * horizon].fill(ceiling);
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height || self.scratch.len() != w * h {
            log::debug!("software renderer: resize {}x{} -> {w}x{h}", self.width, self.height);
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
            self.rebuild_background();
        }

        self.scratch.copy_from_slice(&self.background);
    }

    fn draw_view(&mut self, camera: &Camera, grid: &Grid, textures: &TextureBank) {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return;
        }

        let view = View {
            screen: (w, h),
            camera,
            grid,
            textures,
        };
        let stride = self.settings.stride;
        let near_clip = self.settings.near_clip;
        let blocks = w.div_ceil(stride);

        /* phase 1: trace --------------------------------------------------*/
        let trace = |b: usize| project_column(&view, b * stride, stride, near_clip);
        if self.settings.parallel {
            (0..blocks)
                .into_par_iter()
                .map(trace)
                .collect_into_vec(&mut self.slices);
        } else {
            self.slices.clear();
            self.slices.extend((0..blocks).map(trace));
        }

        log::trace!(
            "{} of {blocks} column blocks hit a wall",
            self.slices.iter().filter(|s| s.is_some()).count()
        );

        /* phase 2: composite ----------------------------------------------*/
        let slices = &self.slices;
        let paint = |(y, row): (usize, &mut [Rgba])| {
            for s in slices.iter().flatten() {
                if !s.covers(y) {
                    continue;
                }
                if let Some(c) = s.color_at(y, h, textures) {
                    row[s.x0..s.x1].fill(c.packed());
                }
            }
        };
        if self.settings.parallel {
            self.scratch.par_chunks_mut(w).enumerate().for_each(paint);
        } else {
            self.scratch.chunks_mut(w).enumerate().for_each(paint);
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/// Render one frame into a freshly allocated `width * height` buffer.
///
/// Pure function of its inputs; identical inputs give identical buffers.
pub fn render(
    screen: (usize, usize),
    camera: &Camera,
    grid: &Grid,
    textures: &TextureBank,
    settings: RenderSettings,
) -> Result<Vec<Rgba>, RenderError> {
    let (w, h) = screen;
    if w == 0 || h == 0 {
        return Err(RenderError::EmptyScreen(w, h));
    }
    let mut sw = Software::new(settings)?;
    sw.draw_frame(w, h, camera, grid, textures, |_, _, _| ());
    Ok(sw.scratch)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
