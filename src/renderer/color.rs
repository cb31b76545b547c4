//! Packed frame-buffer colour.
//!
//! Packing order is **0x00RRGGBB**: blue in the low byte, red in bits 16..24,
//! the top byte is ignored on read and written as zero. This is the layout
//! `minifb::Window::update_with_buffer` expects.

use super::Rgba;

/// One packed colour with explicit channel accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(Rgba);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Wrap an already packed value; the unused top byte is cleared.
    #[inline]
    pub const fn from_packed(px: Rgba) -> Self {
        Color(px & 0x00FF_FFFF)
    }

    #[inline]
    pub const fn packed(self) -> Rgba {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Every channel halved (rounding down).
    #[inline]
    pub const fn halved(self) -> Self {
        Color::rgb(self.r() >> 1, self.g() >> 1, self.b() >> 1)
    }

    /// Subtract `amount` from every channel, saturating at zero.
    #[inline]
    pub const fn darkened(self, amount: u8) -> Self {
        Color::rgb(
            self.r().saturating_sub(amount),
            self.g().saturating_sub(amount),
            self.b().saturating_sub(amount),
        )
    }

    /// Blend toward black: `t = 0` keeps the colour, `t = 1` gives black.
    #[inline]
    pub fn faded(self, t: f32) -> Self {
        let keep = (1.0 - t).clamp(0.0, 1.0);
        let ch = |c: u8| (c as f32 * keep).round() as u8;
        Color::rgb(ch(self.r()), ch(self.g()), ch(self.b()))
    }
}

impl From<Color> for Rgba {
    #[inline]
    fn from(c: Color) -> Rgba {
        c.packed()
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_order_is_00rrggbb() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.packed(), 0x0012_3456);
        assert_eq!((c.r(), c.g(), c.b()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn from_packed_drops_top_byte() {
        let c = Color::from_packed(0xFF_20_40_60);
        assert_eq!(c.packed(), 0x00_20_40_60);
    }

    #[test]
    fn halved_does_not_bleed_between_channels() {
        // low bit of red/green must not leak into green/blue
        let c = Color::rgb(0x01, 0x01, 0xFF).halved();
        assert_eq!((c.r(), c.g(), c.b()), (0, 0, 0x7F));
    }

    #[test]
    fn darkened_saturates() {
        let c = Color::rgb(255, 30, 0).darkened(50);
        assert_eq!((c.r(), c.g(), c.b()), (205, 0, 0));
    }

    #[test]
    fn faded_endpoints() {
        let c = Color::rgb(200, 100, 50);
        assert_eq!(c.faded(0.0), c);
        assert_eq!(c.faded(1.0), Color::BLACK);
        let half = c.faded(0.5);
        assert_eq!((half.r(), half.g(), half.b()), (100, 50, 25));
    }
}
