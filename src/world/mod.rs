mod camera;
mod grid;
mod texture;

pub use camera::Camera;

pub use grid::{
    FLAT_COLORS, Grid, GridError, Material, TEXTURE_CODE_OFFSET, TileCode,
};

pub use texture::{TEX_HEIGHT, TEX_WIDTH, Texture, TextureBank, TextureError, TextureId};
