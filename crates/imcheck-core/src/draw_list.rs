//! Draw-command accumulator: the bridge between the widget layer and renderers.
//!
//! Widgets emit filled shapes and textured quads; backends walk
//! `cmd_buf` and rasterize the indexed triangles of each command.

use crate::{Color, Rect, Vec2};

// ─── Vertex ──────────────────────────────────────────────────────────────────

/// A single render vertex with position, UV, and a packed RGBA colour.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
pub struct DrawVert {
    /// Screen-space position.
    pub pos: [f32; 2],
    /// Normalised texture coordinates.
    pub uv:  [f32; 2],
    /// 0xAABBGGRR packed colour.
    pub col: u32,
}

// SAFETY: three plain scalar fields laid out with #[repr(C)], no padding.
unsafe impl bytemuck::Pod      for DrawVert {}
unsafe impl bytemuck::Zeroable for DrawVert {}

/// 16-bit index, relative to the owning command's `vtx_offset`.
pub type DrawIdx = u16;

// ─── TextureId ───────────────────────────────────────────────────────────────

/// Opaque handle to a backend texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub usize);

impl TextureId {
    /// Solid fill; renderers ignore the UVs.
    pub const WHITE: Self = Self(0);
    /// Font atlas owned by the backend.
    pub const FONT: Self = Self(1);
}

// ─── DrawCmd ─────────────────────────────────────────────────────────────────

/// A batch of triangles sharing one clip rect and texture.
#[derive(Debug, Clone)]
pub struct DrawCmd {
    /// Scissor rectangle in screen pixels.
    pub clip_rect:  Rect,
    pub texture_id: TextureId,
    /// Number of indices (always a multiple of 3).
    pub elem_count: u32,
    /// First index of this command in `idx_buf`.
    pub idx_offset: u32,
    /// Added to every index of this command.
    pub vtx_offset: u32,
}

// ─── DrawList ────────────────────────────────────────────────────────────────

/// CPU-side vertex / index / command buffer. Cleared every frame.
#[derive(Debug, Default)]
pub struct DrawList {
    pub vtx_buf: Vec<DrawVert>,
    pub idx_buf: Vec<DrawIdx>,
    pub cmd_buf: Vec<DrawCmd>,

    clip_stack: Vec<Rect>,
    tex_stack:  Vec<TextureId>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.vtx_buf.clear();
        self.idx_buf.clear();
        self.cmd_buf.clear();
        self.clip_stack.clear();
        self.tex_stack.clear();
    }

    pub fn is_empty(&self) -> bool { self.idx_buf.is_empty() }

    // ─── state stacks ────────────────────────────────────────────────────────

    /// Push a clip rect, intersected with the current one.
    pub fn push_clip_rect(&mut self, rect: Rect) {
        let clip = match self.clip_stack.last() {
            Some(&parent) => rect.intersect(parent),
            None => rect,
        };
        self.clip_stack.push(clip);
        self.add_draw_cmd();
    }

    pub fn pop_clip_rect(&mut self) {
        self.clip_stack.pop();
        self.add_draw_cmd();
    }

    pub fn clip_rect(&self) -> Option<Rect> { self.clip_stack.last().copied() }

    pub fn push_texture(&mut self, id: TextureId) {
        self.tex_stack.push(id);
        self.add_draw_cmd();
    }

    pub fn pop_texture(&mut self) {
        self.tex_stack.pop();
        self.add_draw_cmd();
    }

    // ─── command management ──────────────────────────────────────────────────

    fn add_draw_cmd(&mut self) {
        let clip_rect  = self.clip_stack.last().copied().unwrap_or(Rect::EVERYTHING);
        let texture_id = self.tex_stack.last().copied().unwrap_or(TextureId::WHITE);
        let idx_offset = self.idx_buf.len() as u32;
        let vtx_offset = self.vtx_buf.len() as u32;

        // Reuse a trailing command that never received any triangles.
        if let Some(last) = self.cmd_buf.last_mut() {
            if last.elem_count == 0 {
                *last = DrawCmd { clip_rect, texture_id, elem_count: 0, idx_offset, vtx_offset };
                return;
            }
        }
        self.cmd_buf.push(DrawCmd { clip_rect, texture_id, elem_count: 0, idx_offset, vtx_offset });
    }

    /// Make sure the current command can address `extra` more vertices
    /// with 16-bit indices. Returns the command's vertex base.
    fn reserve(&mut self, extra: usize) -> u32 {
        let needs_new = match self.cmd_buf.last() {
            None => true,
            Some(cmd) => self.vtx_buf.len() - cmd.vtx_offset as usize + extra > DrawIdx::MAX as usize,
        };
        if needs_new { self.add_draw_cmd(); }
        self.cmd_buf.last().map_or(0, |cmd| cmd.vtx_offset)
    }

    fn push_tri(&mut self, vtx_base: u32, first: u32, a: u32, b: u32, c: u32) {
        let rel = (first - vtx_base) as DrawIdx;
        self.idx_buf.extend_from_slice(&[rel + a as DrawIdx, rel + b as DrawIdx, rel + c as DrawIdx]);
        if let Some(cmd) = self.cmd_buf.last_mut() { cmd.elem_count += 3; }
    }

    fn push_vert(&mut self, pos: Vec2, uv: Vec2, col: u32) {
        self.vtx_buf.push(DrawVert { pos: pos.into(), uv: uv.into(), col });
    }

    /// Emit a quad from four corners in clockwise order.
    fn quad(&mut self, p: [Vec2; 4], uv: [Vec2; 4], col: u32) {
        let base  = self.reserve(4);
        let first = self.vtx_buf.len() as u32;
        for i in 0..4 { self.push_vert(p[i], uv[i], col); }
        self.push_tri(base, first, 0, 1, 2);
        self.push_tri(base, first, 0, 2, 3);
    }

    // ─── filled primitives ───────────────────────────────────────────────────

    /// Solid filled rectangle, optionally with rounded corners.
    pub fn filled_rect(&mut self, rect: Rect, rounding: f32, col: Color) {
        if rect.is_empty() || col.a <= 0.0 { return; }
        let c = col.to_rgba_u32();
        if rounding < 0.5 {
            let uv = [Vec2::ZERO; 4];
            self.quad([rect.min, Vec2::new(rect.max.x, rect.min.y), rect.max, Vec2::new(rect.min.x, rect.max.y)], uv, c);
        } else {
            self.fill_rounded_rect(rect, rounding, c);
        }
    }

    fn fill_rounded_rect(&mut self, r: Rect, rounding: f32, col: u32) {
        use std::f32::consts::PI;
        const SEGS: usize = 6;

        let rounding = rounding.min(r.width() * 0.5).min(r.height() * 0.5);
        let corners = [
            (Vec2::new(r.min.x + rounding, r.min.y + rounding), PI),
            (Vec2::new(r.max.x - rounding, r.min.y + rounding), 1.5 * PI),
            (Vec2::new(r.max.x - rounding, r.max.y - rounding), 0.0),
            (Vec2::new(r.min.x + rounding, r.max.y - rounding), 0.5 * PI),
        ];
        let rim = (SEGS + 1) * 4;
        let base  = self.reserve(rim + 1);
        let first = self.vtx_buf.len() as u32;

        self.push_vert(r.center(), Vec2::ZERO, col);
        for (center, start) in corners {
            for s in 0..=SEGS {
                let a = start + 0.5 * PI * (s as f32 / SEGS as f32);
                self.push_vert(center + Vec2::new(a.cos(), a.sin()) * rounding, Vec2::ZERO, col);
            }
        }
        for i in 1..=rim as u32 {
            let next = if i == rim as u32 { 1 } else { i + 1 };
            self.push_tri(base, first, 0, i, next);
        }
    }

    /// Rectangle outline made of four thin quads.
    pub fn rect_outline(&mut self, rect: Rect, thickness: f32, col: Color) {
        let t = thickness;
        let (w, h) = (rect.width(), rect.height());
        self.filled_rect(Rect::from_min_size(rect.min, Vec2::new(w, t)), 0.0, col);
        self.filled_rect(Rect::from_min_size(Vec2::new(rect.min.x, rect.max.y - t), Vec2::new(w, t)), 0.0, col);
        self.filled_rect(Rect::from_min_size(rect.min, Vec2::new(t, h)), 0.0, col);
        self.filled_rect(Rect::from_min_size(Vec2::new(rect.max.x - t, rect.min.y), Vec2::new(t, h)), 0.0, col);
    }

    /// Line segment rendered as a quad of the given thickness.
    pub fn line(&mut self, a: Vec2, b: Vec2, thickness: f32, col: Color) {
        let d = b - a;
        let len = d.length();
        if len < 0.01 { return; }
        let n = Vec2::new(-d.y, d.x) * (thickness * 0.5 / len);
        self.quad([a + n, a - n, b - n, b + n], [Vec2::ZERO; 4], col.to_rgba_u32());
    }

    pub fn triangle_filled(&mut self, a: Vec2, b: Vec2, c: Vec2, col: Color) {
        let col   = col.to_rgba_u32();
        let base  = self.reserve(3);
        let first = self.vtx_buf.len() as u32;
        self.push_vert(a, Vec2::ZERO, col);
        self.push_vert(b, Vec2::ZERO, col);
        self.push_vert(c, Vec2::ZERO, col);
        self.push_tri(base, first, 0, 1, 2);
    }

    /// Glyph quad sampling the current texture.
    pub fn textured_quad(&mut self, p_min: Vec2, p_max: Vec2, uv_min: Vec2, uv_max: Vec2, col: Color) {
        self.quad(
            [p_min, Vec2::new(p_max.x, p_min.y), p_max, Vec2::new(p_min.x, p_max.y)],
            [uv_min, Vec2::new(uv_max.x, uv_min.y), uv_max, Vec2::new(uv_min.x, uv_max.y)],
            col.to_rgba_u32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_two_triangles() {
        let mut dl = DrawList::default();
        dl.filled_rect(Rect::from_min_size(Vec2::ZERO, Vec2::splat(10.0)), 0.0, Color::WHITE);
        assert_eq!(dl.vtx_buf.len(), 4);
        assert_eq!(dl.idx_buf, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(dl.cmd_buf.len(), 1);
        assert_eq!(dl.cmd_buf[0].elem_count, 6);
    }

    #[test]
    fn texture_switch_starts_a_new_command() {
        let mut dl = DrawList::default();
        dl.filled_rect(Rect::from_min_size(Vec2::ZERO, Vec2::splat(4.0)), 0.0, Color::WHITE);
        dl.push_texture(TextureId(7));
        dl.textured_quad(Vec2::ZERO, Vec2::splat(2.0), Vec2::ZERO, Vec2::ONE, Color::WHITE);
        dl.pop_texture();
        let with_tex: Vec<_> = dl.cmd_buf.iter().filter(|c| c.elem_count > 0).collect();
        assert_eq!(with_tex.len(), 2);
        assert_eq!(with_tex[1].texture_id, TextureId(7));
        assert_eq!(with_tex[1].vtx_offset, 4);
        assert_eq!(&dl.idx_buf[6..], &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn nested_clip_rects_intersect() {
        let mut dl = DrawList::default();
        dl.push_clip_rect(Rect::from_min_size(Vec2::ZERO, Vec2::splat(100.0)));
        dl.push_clip_rect(Rect::from_min_size(Vec2::splat(50.0), Vec2::splat(100.0)));
        assert_eq!(dl.clip_rect(), Some(Rect::new(Vec2::splat(50.0), Vec2::splat(100.0))));
        dl.pop_clip_rect();
        dl.pop_clip_rect();
        assert_eq!(dl.clip_rect(), None);
    }

    #[test]
    fn invisible_colour_emits_nothing() {
        let mut dl = DrawList::default();
        dl.filled_rect(Rect::from_min_size(Vec2::ZERO, Vec2::splat(4.0)), 2.0, Color::TRANSPARENT);
        assert!(dl.is_empty());
    }
}
