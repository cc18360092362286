//! # imcheck-soft
//!
//! CPU rendering backend for **imcheck**.
//!
//! ## How it works
//! 1. `SoftRenderer::new()` allocates an RGBA framebuffer and keeps a copy of
//!    the built-in [`BitmapFontAtlas`] pixels as [`TextureId::FONT`].
//! 2. `render()` clears to the frame's clear colour, then rasterizes every
//!    layer's `DrawList` commands with per-command clipping. Glyph quads
//!    sample the atlas nearest-neighbour; every other command is flat colour.
//! 3. The finished pixels are read back with [`SoftRenderer::pixels`], or
//!    converted for a window surface with [`SoftRenderer::copy_to_xrgb`].

mod font;

pub use font::BitmapFontAtlas;

use imcheck_core::{
    draw_list::{DrawList, DrawVert, TextureId},
    renderer::{FontAtlas, RenderFrame, Renderer},
    Color, Rect, Vec2,
};

/// Largest framebuffer edge accepted.
const MAX_DIM: u32 = 16_384;

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum SoftError {
    #[error("invalid framebuffer size {0}x{1}")]
    InvalidSize(u32, u32),
}

struct Texture {
    width:  u32,
    height: u32,
    rgba:   Vec<u8>,
}

impl Texture {
    /// Nearest-neighbour fetch, clamped to the edges.
    fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Software renderer writing into an RGBA framebuffer.
///
/// # Example
/// ```no_run
/// use imcheck_soft::SoftRenderer;
/// use imcheck_core::{Context, Renderer, Vec2, WindowFlags};
///
/// let mut renderer = SoftRenderer::new(1280, 720).unwrap();
/// let mut ctx = Context::new();
/// ctx.set_display_size(renderer.display_size());
/// ctx.frame(renderer.font_atlas(), 1.0, |ui| {
///     if ui.begin("Hello", None, WindowFlags::empty()) { ui.text("hi"); }
///     ui.end();
/// });
/// renderer.begin_frame();
/// renderer.render(ctx.render_frame());
/// renderer.end_frame();
/// ```
pub struct SoftRenderer {
    width:      u32,
    height:     u32,
    font_atlas: BitmapFontAtlas,
    font_texture: Texture,
    triangles:  usize,

    /// Pixel buffer (RGBA, row-major). Written by `render()`.
    framebuffer: Vec<u8>,
}

fn check_size(width: u32, height: u32) -> Result<(), SoftError> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(SoftError::InvalidSize(width, height));
    }
    Ok(())
}

impl SoftRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, SoftError> {
        check_size(width, height)?;
        log::info!("SoftRenderer::new {}x{}", width, height);

        let font_atlas = BitmapFontAtlas::new();
        let (fw, fh) = font_atlas.size();
        let font_texture = Texture { width: fw, height: fh, rgba: font_atlas.rgba().to_vec() };

        Ok(Self {
            width,
            height,
            font_atlas,
            font_texture,
            triangles:   0,
            framebuffer: vec![0u8; (width * height * 4) as usize],
        })
    }

    /// Reallocate the framebuffer; contents are lost.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SoftError> {
        check_size(width, height)?;
        if (width, height) != (self.width, self.height) {
            log::debug!("SoftRenderer::resize {}x{} → {}x{}", self.width, self.height, width, height);
            self.width  = width;
            self.height = height;
            self.framebuffer = vec![0u8; (width * height * 4) as usize];
        }
        Ok(())
    }

    pub fn width(&self)  -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// RGBA8 framebuffer, row-major.
    pub fn pixels(&self) -> &[u8] { &self.framebuffer }

    /// RGBA at `(x, y)`, or `None` outside the framebuffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height { return None; }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.framebuffer[i], self.framebuffer[i + 1], self.framebuffer[i + 2], self.framebuffer[i + 3]])
    }

    /// Triangles rasterized by the last `render()`.
    pub fn triangles_drawn(&self) -> usize { self.triangles }

    /// Convert to `0x00RRGGBB` words as window surfaces expect.
    /// Copies `min(out.len(), width * height)` pixels.
    pub fn copy_to_xrgb(&self, out: &mut [u32]) {
        for (dst, px) in out.iter_mut().zip(self.framebuffer.chunks_exact(4)) {
            *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }
    }

    pub fn clear(&mut self, color: Color) {
        let c = color.to_rgba_u32().to_le_bytes();
        for px in self.framebuffer.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }

    /// Rasterize `draw_list` over the current framebuffer contents.
    pub fn rasterize(&mut self, draw_list: &DrawList) {
        let screen = Rect::new(Vec2::ZERO, Vec2::new(self.width as f32, self.height as f32));

        for cmd in &draw_list.cmd_buf {
            let clip = cmd.clip_rect.intersect(screen);
            if clip.is_empty() { continue; }
            let texture = (cmd.texture_id == TextureId::FONT).then_some(&self.font_texture);

            let idx_base = cmd.idx_offset as usize;
            let vtx_base = cmd.vtx_offset as usize;
            for t in 0..(cmd.elem_count / 3) as usize {
                let tri = [0, 1, 2].map(|k| draw_list.idx_buf[idx_base + t * 3 + k] as usize + vtx_base);
                if tri.iter().any(|&i| i >= draw_list.vtx_buf.len()) { continue; }
                let v = tri.map(|i| draw_list.vtx_buf[i]);
                self.triangles += 1;
                raster_triangle(&mut self.framebuffer, self.width, &v, clip, texture);
            }
        }
    }

    pub fn font(&self) -> &BitmapFontAtlas { &self.font_atlas }
}

fn edge(a: [f32; 2], b: [f32; 2], px: f32, py: f32) -> f32 {
    (b[0] - a[0]) * (py - a[1]) - (b[1] - a[1]) * (px - a[0])
}

/// Barycentric rasterization of one triangle, alpha-blended.
fn raster_triangle(fb: &mut [u8], fb_w: u32, v: &[DrawVert; 3], clip: Rect, texture: Option<&Texture>) {
    let area = edge(v[0].pos, v[1].pos, v[2].pos[0], v[2].pos[1]);
    if area.abs() < 1e-3 { return; }

    // Bounding box, clipped
    let min_x = v.iter().map(|p| p.pos[0]).fold(f32::MAX, f32::min).max(clip.min.x).floor() as i32;
    let min_y = v.iter().map(|p| p.pos[1]).fold(f32::MAX, f32::min).max(clip.min.y).floor() as i32;
    let max_x = v.iter().map(|p| p.pos[0]).fold(f32::MIN, f32::max).min(clip.max.x).ceil() as i32;
    let max_y = v.iter().map(|p| p.pos[1]).fold(f32::MIN, f32::max).min(clip.max.y).ceil() as i32;

    // Use the first vertex colour; primitives are flat-shaded.
    let [r, g, b, a] = v[0].col.to_le_bytes();

    for py in min_y.max(0)..max_y {
        for px in min_x.max(0)..max_x {
            let (fx, fy) = (px as f32 + 0.5, py as f32 + 0.5);
            if !clip.contains(Vec2::new(fx, fy)) { continue; }
            let w0 = edge(v[1].pos, v[2].pos, fx, fy) / area;
            let w1 = edge(v[2].pos, v[0].pos, fx, fy) / area;
            let w2 = 1.0 - w0 - w1;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 { continue; }

            let (mut sr, mut sg, mut sb, mut sa) = (r as f32, g as f32, b as f32, a as f32 / 255.0);
            if let Some(tex) = texture {
                let u  = w0 * v[0].uv[0] + w1 * v[1].uv[0] + w2 * v[2].uv[0];
                let tv = w0 * v[0].uv[1] + w1 * v[1].uv[1] + w2 * v[2].uv[1];
                let [tr, tg, tb, ta] = tex.sample(u, tv);
                sr *= tr as f32 / 255.0;
                sg *= tg as f32 / 255.0;
                sb *= tb as f32 / 255.0;
                sa *= ta as f32 / 255.0;
            }
            if sa <= 0.0 { continue; }

            let i = ((py as u32 * fb_w + px as u32) * 4) as usize;
            let blend = |s: f32, d: u8| -> u8 { (s * sa + d as f32 * (1.0 - sa)).round() as u8 };
            fb[i]     = blend(sr, fb[i]);
            fb[i + 1] = blend(sg, fb[i + 1]);
            fb[i + 2] = blend(sb, fb[i + 2]);
            fb[i + 3] = 255;
        }
    }
}

// ─── Renderer trait impl ─────────────────────────────────────────────────────

impl Renderer for SoftRenderer {
    fn begin_frame(&mut self) {
        self.triangles = 0;
    }

    fn render(&mut self, frame: RenderFrame<'_>) {
        self.clear(frame.clear_color);
        for layer in frame.layers {
            self.rasterize(layer);
        }
    }

    fn end_frame(&mut self) {
        log::trace!("SoftRenderer::end_frame: {} triangles", self.triangles);
    }

    fn display_size(&self) -> Vec2 { Vec2::new(self.width as f32, self.height as f32) }
    fn font_atlas(&self)   -> &dyn FontAtlas { &self.font_atlas }
}

pub use imcheck_core as core;

#[cfg(test)]
mod tests {
    use super::*;
    use imcheck_core::{Context, WindowFlags};

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(matches!(SoftRenderer::new(0, 10), Err(SoftError::InvalidSize(0, 10))));
        let mut r = SoftRenderer::new(4, 4).unwrap();
        assert!(r.resize(4, MAX_DIM + 1).is_err());
        assert!(r.resize(8, 2).is_ok());
        assert_eq!(r.pixels().len(), 8 * 2 * 4);
    }

    #[test]
    fn filled_rect_respects_its_clip() {
        let mut r = SoftRenderer::new(20, 20).unwrap();
        let mut dl = DrawList::default();
        dl.push_clip_rect(Rect::new(Vec2::ZERO, Vec2::new(10.0, 20.0)));
        dl.filled_rect(Rect::new(Vec2::splat(2.0), Vec2::splat(18.0)), 0.0, Color::RED);
        dl.pop_clip_rect();
        r.clear(Color::BLACK);
        r.rasterize(&dl);
        assert_eq!(r.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(r.pixel(15, 5), Some([0, 0, 0, 255]));
        assert_eq!(r.pixel(1, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn glyph_quads_take_their_ink_from_the_atlas() {
        let mut r = SoftRenderer::new(16, 16).unwrap();
        let ink = |r: &mut SoftRenderer, ch: char| {
            let g = r.font().glyph(ch, 16.0).unwrap();
            let mut dl = DrawList::default();
            dl.push_texture(TextureId::FONT);
            dl.textured_quad(Vec2::ZERO, Vec2::splat(16.0), g.uv_min, g.uv_max, Color::GREEN);
            dl.pop_texture();
            r.clear(Color::BLACK);
            r.rasterize(&dl);
            r.pixels().chunks_exact(4).filter(|px| *px == [0, 255, 0, 255]).count()
        };
        assert!(ink(&mut r, 'A') > 16);
        assert_eq!(ink(&mut r, ' '), 0);
        assert!(r.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn window_pixels_stay_inside_the_window() {
        let mut r = SoftRenderer::new(200, 150).unwrap();
        let mut ctx = Context::new();
        ctx.set_display_size(r.display_size());
        ctx.set_clear_color(Color::BLACK);
        ctx.frame(r.font_atlas(), 1.0, |ui| {
            ui.set_next_window_pos(Vec2::new(20.0, 20.0));
            ui.set_next_window_size(Vec2::new(100.0, 80.0));
            if ui.begin("Box", None, WindowFlags::NO_RESIZE) { ui.text("Hello"); }
            ui.end();
        });
        r.begin_frame();
        r.render(ctx.render_frame());
        r.end_frame();

        assert!(r.triangles_drawn() > 0);
        assert_eq!(r.pixel(10, 10), Some([0, 0, 0, 255]));
        assert_eq!(r.pixel(150, 120), Some([0, 0, 0, 255]));
        assert_ne!(r.pixel(60, 80), Some([0, 0, 0, 255]));

        let mut xrgb = vec![0u32; 200 * 150];
        r.copy_to_xrgb(&mut xrgb);
        assert_eq!(xrgb[10 * 200 + 10], 0);
    }
}
