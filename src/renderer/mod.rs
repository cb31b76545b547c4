//! Rendering abstraction layer.
//!
//! *The rest of the program never touches a pixel buffer directly.*
//! It hands the camera, grid and texture bank to a type that implements
//! [`Renderer`] and receives the finished frame through a closure.
//!
//! * One ray per screen column (or per `stride` columns) is traced with the
//!   DDA in [`dda`], projected in [`column`] and coloured in [`shade`].
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.
//! * [`render`] is the one-shot, allocate-and-return form.

use thiserror::Error;

use crate::world::{Camera, Grid, TextureBank};

mod color;
pub mod column;
pub mod dda;
pub mod shade;
pub mod software;

pub use color::Color;
pub use column::{NEAR_CLIP, Surface, WallSlice};
pub use dda::{Hit, MAX_STEPS, Side};
pub use software::{Software, render};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Read-only inputs of one frame.
#[derive(Clone, Copy)]
pub struct View<'a> {
    /// `(width, height)` in pixels.
    pub screen: (usize, usize),
    pub camera: &'a Camera,
    pub grid: &'a Grid,
    pub textures: &'a TextureBank,
}

/// Run-time knobs of the software renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Trace every `stride`-th column and widen its slice over the gap.
    pub stride: usize,
    /// Fill above the horizon.
    pub ceiling: Color,
    /// Fill below the horizon.
    pub floor: Color,
    /// Hits nearer than this are not drawn.
    pub near_clip: f32,
    /// Spread columns and rows over the rayon pool.
    pub parallel: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            stride: 1,
            ceiling: Color::rgb(20, 20, 20),
            floor: Color::rgb(150, 150, 150),
            near_clip: NEAR_CLIP,
            parallel: true,
        }
    }
}

/// Things that can go wrong before a frame is drawn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("column stride must be at least 1")]
    ZeroStride,

    #[error("screen size {0}x{1} has no pixels")]
    EmptyScreen(usize, usize),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and seed it
    /// with the ceiling/floor background.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Trace and composite every column of the frame.
    fn draw_view(&mut self, camera: &Camera, grid: &Grid, textures: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * A windowed caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        width: usize,
        height: usize,
        camera: &Camera,
        grid: &Grid,
        textures: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        self.draw_view(camera, grid, textures);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
