//! Yet Another grid raycaster.
//!
//! * [`world`] — the tile grid, the camera and the wall textures; built once
//!   by the caller and only read while a frame renders.
//! * [`renderer`] — DDA ray traversal, column projection, shading and the
//!   software frame-buffer compositor.

pub mod renderer;
pub mod world;
