//! # imcheck-core
//!
//! Backend-agnostic immediate-mode GUI engine.
//! Every widget records itself in a per-frame item registry keyed by its
//! scoped [`Id`], so a scripted driver can find it again by label path.
//!
//! Pair with a backend crate to get pixels:
//! - `imcheck-soft`   (CPU rasterizer, offscreen framebuffer)
//! - `imcheck-winit`  (desktop window presenting the soft framebuffer)

pub mod context;
pub mod draw_list;
pub mod id;
pub mod input;
pub mod item;
pub mod layout;
pub mod renderer;
pub mod style;
pub mod ui;
pub mod widgets;

// ─── re-exports ──────────────────────────────────────────────────────────────
pub use context::Context;
pub use draw_list::{DrawCmd, DrawList, DrawVert, TextureId};
pub use id::Id;
pub use input::{InputState, Key, Modifiers, MouseButton};
pub use item::{ItemInfo, ItemKind, ItemStatus};
pub use renderer::{FontAtlas, GlyphInfo, RenderFrame, Renderer};
pub use style::{Style, StyleColor};
pub use ui::Ui;

// ─── Prelude ─────────────────────────────────────────────────────────────────
pub mod prelude {
    pub use super::{
        context::Context,
        id::Id,
        input::{Key, Modifiers, MouseButton},
        renderer::{FontAtlas, Renderer},
        style::StyleColor,
        ui::Ui,
        Color, Rect, Vec2, WindowFlags,
    };
}

// ─── Primitive math types ────────────────────────────────────────────────────

/// 2-D floating-point vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    #[inline] pub const fn new(x: f32, y: f32) -> Self { Self { x, y } }
    #[inline] pub const fn splat(v: f32) -> Self { Self { x: v, y: v } }

    #[inline] pub fn length(self) -> f32 { (self.x * self.x + self.y * self.y).sqrt() }

    #[inline] pub fn min(self, o: Self) -> Self { Self::new(self.x.min(o.x), self.y.min(o.y)) }
    #[inline] pub fn max(self, o: Self) -> Self { Self::new(self.x.max(o.x), self.y.max(o.y)) }
}

impl std::ops::Add    for Vec2 { type Output = Self; fn add(self, r: Self) -> Self { Self::new(self.x + r.x, self.y + r.y) } }
impl std::ops::AddAssign for Vec2 { fn add_assign(&mut self, r: Self) { self.x += r.x; self.y += r.y; } }
impl std::ops::Sub    for Vec2 { type Output = Self; fn sub(self, r: Self) -> Self { Self::new(self.x - r.x, self.y - r.y) } }
impl std::ops::Mul<f32> for Vec2 { type Output = Self; fn mul(self, r: f32) -> Self { Self::new(self.x * r, self.y * r) } }
impl std::ops::Neg    for Vec2 { type Output = Self; fn neg(self) -> Self { Self::new(-self.x, -self.y) } }

impl From<(f32, f32)> for Vec2 { fn from((x, y): (f32, f32)) -> Self { Self::new(x, y) } }
impl From<[f32; 2]>   for Vec2 { fn from([x, y]: [f32; 2])   -> Self { Self::new(x, y) } }
impl From<Vec2> for [f32; 2]   { fn from(v: Vec2) -> Self { [v.x, v.y] } }

// ─── Color ───────────────────────────────────────────────────────────────────

/// RGBA colour (linear, 0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Color {
    pub r: f32, pub g: f32, pub b: f32, pub a: f32,
}

impl Color {
    pub const WHITE:       Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK:       Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED:         Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN:       Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const YELLOW:      Self = Self { r: 1.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    #[inline] pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self { Self { r, g, b, a } }
    #[inline] pub const fn rgb(r: f32, g: f32, b: f32) -> Self { Self { r, g, b, a: 1.0 } }
    #[inline] pub fn with_alpha(self, a: f32) -> Self { Self { a, ..self } }

    /// Vertex colour, packed as 0xAABBGGRR.
    #[inline]
    pub fn to_rgba_u32(self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        u32::from_le_bytes([self.r, self.g, self.b, self.a].map(byte))
    }

    /// Construct from a 0xRRGGBB hex literal.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

impl From<[f32; 4]> for Color { fn from([r, g, b, a]: [f32; 4]) -> Self { Self::new(r, g, b, a) } }
impl From<Color> for [f32; 4] { fn from(c: Color) -> Self { [c.r, c.g, c.b, c.a] } }

// ─── Rect ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle (min inclusive, max exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect { pub min: Vec2, pub max: Vec2 }

impl Rect {
    pub const ZERO: Self = Self { min: Vec2::ZERO, max: Vec2::ZERO };
    /// Covers every representable screen position.
    pub const EVERYTHING: Self = Self {
        min: Vec2::splat(f32::MIN),
        max: Vec2::splat(f32::MAX),
    };

    #[inline] pub fn new(min: Vec2, max: Vec2) -> Self { Self { min, max } }

    #[inline]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, max: min + size }
    }

    #[inline] pub fn width(self)  -> f32  { self.max.x - self.min.x }
    #[inline] pub fn height(self) -> f32  { self.max.y - self.min.y }
    #[inline] pub fn size(self)   -> Vec2 { Vec2::new(self.width(), self.height()) }
    #[inline] pub fn center(self) -> Vec2 { (self.min + self.max) * 0.5 }
    #[inline] pub fn is_empty(self) -> bool { self.min.x >= self.max.x || self.min.y >= self.max.y }

    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    #[inline]
    pub fn shrink(self, amount: f32) -> Self {
        Self { min: self.min + Vec2::splat(amount), max: self.max - Vec2::splat(amount) }
    }

    #[inline] pub fn intersect(self, o: Self) -> Self { Self { min: self.min.max(o.min), max: self.max.min(o.max) } }
}

// ─── WindowFlags ─────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Controls window behaviour.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const NO_TITLE_BAR       = 1 << 0;
        const NO_RESIZE          = 1 << 1;
        const NO_MOVE            = 1 << 2;
        const NO_BACKGROUND      = 1 << 3;
        const NO_CLOSE_BUTTON    = 1 << 4;
        /// Reserve a row under the title bar for `begin_menu_bar`.
        const MENU_BAR           = 1 << 5;
        const NO_INTERACTION     = Self::NO_MOVE.bits() | Self::NO_RESIZE.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::from_min_size(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(!r.contains(Vec2::new(15.0, 12.0)));
        assert_eq!(r.center(), Vec2::new(12.5, 12.5));
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = Rect::from_min_size(Vec2::ZERO, Vec2::splat(4.0));
        let b = Rect::from_min_size(Vec2::splat(8.0), Vec2::splat(4.0));
        assert!(a.intersect(b).is_empty());
        assert_eq!(a.intersect(Rect::EVERYTHING), a);
    }

    #[test]
    fn color_packs_little_endian_rgba() {
        assert_eq!(Color::RED.to_rgba_u32(), 0xFF00_00FF);
        assert_eq!(Color::from_hex(0x00FF00), Color::GREEN);
    }
}
