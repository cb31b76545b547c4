//! Square tile map the rays are traced through.
//!
//! The grid is validated once on construction; after that every non-zero tile
//! is known to resolve to a palette colour or a texture in the bank the grid
//! was checked against.

use glam::IVec2;
use thiserror::Error;

use crate::world::texture::TextureId;

/// Raw integer stored in one grid cell.
pub type TileCode = u16;

/// Number of entries in the flat-colour palette (codes `1..=FLAT_COLORS`).
pub const FLAT_COLORS: TileCode = 8;

/// `code - TEXTURE_CODE_OFFSET` is the texture index, so `101` is texture 0.
pub const TEXTURE_CODE_OFFSET: TileCode = 101;

/// What a tile code means to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Empty,
    /// Index into the flat palette (`code - 1`).
    Flat(u8),
    /// Index into the texture bank.
    Textured(TextureId),
    /// Not a valid code; only reachable on a grid that bypassed validation.
    Unknown,
}

impl Material {
    /// Classify `code` assuming the bank holds `texture_count` textures.
    pub fn of(code: TileCode, texture_count: usize) -> Self {
        match code {
            0 => Material::Empty,
            1..=FLAT_COLORS => Material::Flat((code - 1) as u8),
            c if c >= TEXTURE_CODE_OFFSET && ((c - TEXTURE_CODE_OFFSET) as usize) < texture_count => {
                Material::Textured(c - TEXTURE_CODE_OFFSET)
            }
            _ => Material::Unknown,
        }
    }
}

/// Things that can go wrong when building a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must contain at least one tile")]
    Empty,

    /// Tile count is not `size * size` (or a text row had the wrong length).
    #[error("grid is not square: expected {expected} tiles, found {found}")]
    NotSquare { expected: usize, found: usize },

    #[error("tile ({x}, {y}) has code {code} which is neither a palette colour nor a loaded texture")]
    UnknownTile { x: usize, y: usize, code: TileCode },

    #[error("line {line}: `{token}` is not a tile code")]
    Parse { line: usize, token: String },
}

/// `size × size` tiles addressed by `(column, row)`, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<TileCode>,
}

impl Grid {
    /// Build and validate a grid. `texture_count` is the number of textures
    /// the caller will render with.
    pub fn new(size: usize, tiles: Vec<TileCode>, texture_count: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        let expected = size.checked_mul(size);
        if expected != Some(tiles.len()) {
            return Err(GridError::NotSquare {
                expected: expected.unwrap_or(usize::MAX),
                found: tiles.len(),
            });
        }

        for (i, &code) in tiles.iter().enumerate() {
            if Material::of(code, texture_count) == Material::Unknown {
                return Err(GridError::UnknownTile {
                    x: i % size,
                    y: i / size,
                    code,
                });
            }
        }

        let solid = tiles.iter().filter(|&&c| c != 0).count();
        log::info!("grid {size}x{size} loaded ({solid} solid tiles)");
        Ok(Self { size, tiles })
    }

    /// Parse the text form: one row per line, codes separated by whitespace
    /// and/or commas, `#` starts a comment, blank lines are skipped.
    pub fn parse(text: &str, texture_count: usize) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<TileCode>> = Vec::new();
        for (n, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("");
            let row = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse::<TileCode>().map_err(|_| GridError::Parse {
                        line: n + 1,
                        token: t.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }

        let size = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != size) {
            return Err(GridError::NotSquare {
                expected: size,
                found: bad.len(),
            });
        }
        Self::new(size, rows.concat(), texture_count)
    }

    /// Side length in tiles.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at `p`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, p: IVec2) -> Option<TileCode> {
        let n = self.size as i32;
        if p.x < 0 || p.y < 0 || p.x >= n || p.y >= n {
            return None;
        }
        Some(self.tiles[p.y as usize * self.size + p.x as usize])
    }

    /// True for in-bounds non-empty tiles.
    #[inline]
    pub fn is_solid(&self, p: IVec2) -> bool {
        self.get(p).is_some_and(|c| c > 0)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
