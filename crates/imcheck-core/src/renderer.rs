//! Renderer trait + font atlas trait.

use crate::draw_list::{DrawList, TextureId};
use crate::{Color, Vec2};

/// A finished frame ready to hand to a backend.
pub struct RenderFrame<'a> {
    /// Draw lists in paint order: window contents first, then popups.
    pub layers:       [&'a DrawList; 2],
    pub display_size: Vec2,
    pub clear_color:  Color,
}

impl RenderFrame<'_> {
    pub fn vertex_count(&self) -> usize {
        self.layers.iter().map(|l| l.vtx_buf.len()).sum()
    }
}

/// Font glyph information returned by [`FontAtlas`].
#[derive(Debug, Clone, Copy)]
pub struct GlyphInfo {
    /// Top-left UV in the atlas texture.
    pub uv_min: Vec2,
    /// Bottom-right UV in the atlas texture.
    pub uv_max: Vec2,
    /// Rendered size in pixels.
    pub size: Vec2,
    /// Horizontal advance in pixels.
    pub advance_x: f32,
    /// Vertical offset from the line top.
    pub offset_y: f32,
}

/// Trait for font atlas providers.
pub trait FontAtlas {
    /// Glyph lookup. Returns `None` for characters the atlas does not carry.
    fn glyph(&self, ch: char, size_px: f32) -> Option<GlyphInfo>;
    /// Atlas texture handle, already known to the backend.
    fn texture(&self) -> TextureId;
    /// Advance width of a string.
    fn measure(&self, text: &str, size_px: f32) -> f32 {
        text.chars()
            .filter_map(|c| self.glyph(c, size_px))
            .map(|g| g.advance_x)
            .sum()
    }
}

/// Core renderer interface: implement this for every rendering backend.
///
/// # Call order per frame
///
/// ```text
/// renderer.begin_frame()
/// // … widget code fills the context's draw lists …
/// renderer.render(ctx.render_frame())
/// renderer.end_frame()
/// ```
pub trait Renderer {
    /// Called once at the start of every frame.
    fn begin_frame(&mut self);

    /// Consume the frame's draw lists.
    fn render(&mut self, frame: RenderFrame<'_>);

    /// Finish the frame (the pixels are final after this).
    fn end_frame(&mut self);

    /// Target size in pixels.
    fn display_size(&self) -> Vec2;

    fn font_atlas(&self) -> &dyn FontAtlas;
}
