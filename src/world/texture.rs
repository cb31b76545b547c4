// Format-agnostic repository of wall textures supplied by the caller.
// The renderer interacts through `TextureId` only; decoding image files is
// the asset loader's job and never happens here.

use std::collections::HashMap;

use crate::renderer::{Color, Rgba};

/// Runtime handle for a texture in this bank; equals `tile code - 101`.
pub type TextureId = u16;

/// Every wall texture is `TEX_WIDTH × TEX_HEIGHT`.
pub const TEX_WIDTH: usize = 64;
pub const TEX_HEIGHT: usize = 64;

/// CPU-side storage: packed **0x00RRGGBB** in row-major order
/// (`pixels[v * TEX_WIDTH + u]`).
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pixels: Vec<Rgba>,
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Pixel vector is not `TEX_WIDTH * TEX_HEIGHT` long.
    #[error("texture has {0} pixels, expected {expected}", expected = TEX_WIDTH * TEX_HEIGHT)]
    BadSize(usize),
}

impl Texture {
    /// Wrap `pixels` (row-major, packed 0x00RRGGBB).
    pub fn from_pixels(pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if pixels.len() != TEX_WIDTH * TEX_HEIGHT {
            return Err(TextureError::BadSize(pixels.len()));
        }
        Ok(Self {
            pixels: pixels.into_iter().map(|p| Color::from_packed(p).packed()).collect(),
        })
    }

    /// Build a texture by evaluating `f(u, v)` for every texel.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(TEX_WIDTH * TEX_HEIGHT);
        for v in 0..TEX_HEIGHT {
            for u in 0..TEX_WIDTH {
                pixels.push(f(u, v).packed());
            }
        }
        Self { pixels }
    }

    /// Sample column `u`, row `v`. Both must be below 64; the column
    /// renderer guarantees it.
    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> Color {
        debug_assert!(u < TEX_WIDTH && v < TEX_HEIGHT);
        Color::from_packed(self.pixels[v * TEX_WIDTH + u])
    }

    /*──────────────────── procedural generators ────────────────────*/

    /// 8×8-texel checkerboard of two colours.
    pub fn checker(a: Color, b: Color) -> Self {
        Self::from_fn(|u, v| if ((u / 8) ^ (v / 8)) & 1 == 0 { a } else { b })
    }

    /// Classic XOR pattern tinted by `tint`.
    pub fn xor(tint: Color) -> Self {
        Self::from_fn(|u, v| {
            let k = ((u ^ v) * 4) as u32;
            let ch = |c: u8| ((c as u32 * k) / 255).min(255) as u8;
            Color::rgb(ch(tint.r()), ch(tint.g()), ch(tint.b()))
        })
    }

    /// Running-bond bricks with one-texel mortar lines.
    pub fn bricks(brick: Color, mortar: Color) -> Self {
        Self::from_fn(|u, v| {
            let row = v / 16;
            let shift = if row % 2 == 0 { 0 } else { 16 };
            if v % 16 == 0 || (u + shift) % 32 == 0 {
                mortar
            } else {
                brick
            }
        })
    }

    /// Vertical gradient from `top` (row 0) to `bottom` (row 63).
    pub fn gradient(top: Color, bottom: Color) -> Self {
        Self::from_fn(|_, v| {
            let t = v as f32 / (TEX_HEIGHT - 1) as f32;
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::rgb(mix(top.r(), bottom.r()), mix(top.g(), bottom.g()), mix(top.b(), bottom.b()))
        })
    }
}

/// A name-addressable cache of wall textures.
///
/// * Stores exactly one copy of every name.
/// * IDs are dense and assigned in insertion order, starting at **0**, so the
///   first texture inserted is the one tile code `101` refers to.
///
/// The bank is read-only while a frame renders and is shared between worker
/// threads by reference.
#[derive(Default)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight textures the demo map expects (codes 101..=108).
    pub fn demo() -> Self {
        let mut bank = Self::new();
        let set = [
            ("RED_BRICK", Texture::bricks(Color::rgb(160, 40, 30), Color::rgb(90, 90, 90))),
            ("BLUE_XOR", Texture::xor(Color::rgb(80, 120, 255))),
            ("CHECKER", Texture::checker(Color::rgb(200, 200, 200), Color::rgb(60, 60, 60))),
            ("GREEN_XOR", Texture::xor(Color::rgb(60, 220, 90))),
            ("SUNSET", Texture::gradient(Color::rgb(250, 180, 60), Color::rgb(90, 20, 90))),
            ("GREY_BRICK", Texture::bricks(Color::rgb(120, 120, 130), Color::rgb(40, 40, 40))),
            ("WOOD", Texture::gradient(Color::rgb(140, 90, 40), Color::rgb(70, 40, 15))),
            ("YELLOW_CHECKER", Texture::checker(Color::rgb(240, 220, 40), Color::rgb(20, 20, 20))),
        ];
        // ids follow the array order, so code 101 + i is always `set[i]`
        for (id, (name, tex)) in set.into_iter().enumerate() {
            bank.by_name.insert(name.to_owned(), id as TextureId);
            bank.data.push(tex);
        }
        bank
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Obtain the id for a loaded texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn solid(c: Color) -> Texture {
        Texture::from_fn(|_, _| c)
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::new();
        let red = bank.insert("RED", solid(Color::rgb(255, 0, 0))).unwrap();
        let blue = bank.insert("BLUE", solid(Color::rgb(0, 0, 255))).unwrap();

        assert_eq!(red, 0);
        assert_eq!(blue, 1);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("NOPE"), None);
        assert_eq!(bank.texture(blue).unwrap().texel(0, 0), Color::rgb(0, 0, 255));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::new();
        bank.insert("WOOD", solid(Color::BLACK)).unwrap();
        let err = bank.insert("WOOD", solid(Color::BLACK)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate("WOOD".into()));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::new();
        assert!(bank.is_empty());
        assert_eq!(bank.texture(3).unwrap_err(), TextureError::BadId(3));
    }

    #[test]
    fn from_pixels_checks_size_and_layout() {
        assert_eq!(
            Texture::from_pixels(vec![0; 10]).unwrap_err(),
            TextureError::BadSize(10)
        );
        let mut px = vec![0; TEX_WIDTH * TEX_HEIGHT];
        px[2 * TEX_WIDTH + 5] = 0xFF_AB_CD_EF;
        let tex = Texture::from_pixels(px).unwrap();
        assert_eq!(tex.texel(5, 2), Color::rgb(0xAB, 0xCD, 0xEF));
        assert_eq!(tex.texel(2, 5), Color::BLACK);
    }

    #[test]
    fn generators_fill_every_texel() {
        let a = Color::rgb(1, 2, 3);
        let b = Color::rgb(4, 5, 6);
        let chk = Texture::checker(a, b);
        assert_eq!(chk.texel(0, 0), a);
        assert_eq!(chk.texel(8, 0), b);
        assert_eq!(chk.texel(8, 8), a);

        let grad = Texture::gradient(Color::BLACK, Color::rgb(255, 255, 255));
        assert_eq!(grad.texel(10, 0), Color::BLACK);
        assert_eq!(grad.texel(10, TEX_HEIGHT - 1), Color::rgb(255, 255, 255));

        assert_eq!(TextureBank::demo().len(), 8);
    }

    #[test]
    fn demo_ids_follow_declaration_order() {
        let bank = TextureBank::demo();
        assert_eq!(bank.id("RED_BRICK"), Some(0));
        assert_eq!(bank.id("CHECKER"), Some(2));
        assert_eq!(bank.id("YELLOW_CHECKER"), Some(7));
        for id in 0..bank.len() as TextureId {
            assert!(bank.texture(id).is_ok());
        }
    }
}
