//! Built-in 8×8 bitmap font packed into a small RGBA atlas.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use imcheck_core::{
    draw_list::TextureId,
    renderer::{FontAtlas, GlyphInfo},
    Vec2,
};

const CELL:      u32 = 8;
const COLS:      u32 = 16;
const ROWS:      u32 = 6;
const FIRST:     u32 = 0x20;
const LAST:      u32 = 0x7e;
const FALLBACK:  char = '?';
/// Glyph width relative to the pixel size.
const ASPECT:    f32 = 0.6;

/// Printable ASCII from `font8x8`, laid out 16 glyphs per row.
pub struct BitmapFontAtlas {
    width:  u32,
    height: u32,
    rgba:   Vec<u8>,
}

impl Default for BitmapFontAtlas {
    fn default() -> Self { Self::new() }
}

impl BitmapFontAtlas {
    pub fn new() -> Self {
        let (width, height) = (COLS * CELL, ROWS * CELL);
        let mut rgba = vec![0u8; (width * height * 4) as usize];

        for code in FIRST..=LAST {
            let Some(ch) = char::from_u32(code) else { continue };
            let Some(rows) = BASIC_FONTS.get(ch) else { continue };
            let (cx, cy) = cell_origin(code);
            for (y, bits) in rows.iter().enumerate() {
                for x in 0..CELL {
                    // Bit 0 is the leftmost pixel.
                    if bits & (1 << x) == 0 { continue; }
                    let i = (((cy + y as u32) * width + cx + x) * 4) as usize;
                    rgba[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
        log::debug!("BitmapFontAtlas: {}x{} atlas, {} glyphs", width, height, LAST - FIRST + 1);
        Self { width, height, rgba }
    }

    pub fn size(&self) -> (u32, u32) { (self.width, self.height) }

    /// Atlas pixels, RGBA8, row-major.
    pub fn rgba(&self) -> &[u8] { &self.rgba }
}

fn cell_origin(code: u32) -> (u32, u32) {
    let idx = code - FIRST;
    ((idx % COLS) * CELL, (idx / COLS) * CELL)
}

impl FontAtlas for BitmapFontAtlas {
    fn glyph(&self, ch: char, size_px: f32) -> Option<GlyphInfo> {
        let code = match ch as u32 {
            c @ FIRST..=LAST => c,
            _ => FALLBACK as u32,
        };
        let (cx, cy) = cell_origin(code);
        let (w, h) = (self.width as f32, self.height as f32);
        let width = size_px * ASPECT;
        Some(GlyphInfo {
            uv_min:    Vec2::new(cx as f32 / w, cy as f32 / h),
            uv_max:    Vec2::new((cx + CELL) as f32 / w, (cy + CELL) as f32 / h),
            size:      Vec2::new(width, size_px),
            advance_x: width,
            offset_y:  0.0,
        })
    }

    fn texture(&self) -> TextureId { TextureId::FONT }

    fn measure(&self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * ASPECT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_coverage(atlas: &BitmapFontAtlas, ch: char) -> usize {
        let (cx, cy) = cell_origin(ch as u32);
        let (w, _) = atlas.size();
        (0..CELL)
            .flat_map(|y| (0..CELL).map(move |x| (x, y)))
            .filter(|&(x, y)| atlas.rgba()[(((cy + y) * w + cx + x) * 4 + 3) as usize] == 255)
            .count()
    }

    #[test]
    fn letters_have_ink_and_space_has_none() {
        let atlas = BitmapFontAtlas::new();
        assert_eq!(atlas.size(), (128, 48));
        assert!(cell_coverage(&atlas, 'A') > 10);
        assert_eq!(cell_coverage(&atlas, ' '), 0);
    }

    #[test]
    fn unknown_chars_use_the_fallback_cell() {
        let atlas = BitmapFontAtlas::new();
        let q = atlas.glyph('?', 13.0).map(|g| g.uv_min);
        assert_eq!(atlas.glyph('é', 13.0).map(|g| g.uv_min), q);
        assert!((atlas.measure("abc", 10.0) - 18.0).abs() < 1e-4);
    }
}
