//! Main immediate-mode UI API surface.
//!
//! All widget calls go through `Ui`, which borrows `Context` mutably.

use crate::{
    context::Context,
    renderer::FontAtlas,
    style::{Style, StyleColor},
    widgets, Color, Vec2, WindowFlags,
};

// ─── Ui ──────────────────────────────────────────────────────────────────────

/// The immediate-mode API handle. Obtain one via `Context::frame()`.
pub struct Ui<'ctx> {
    pub(crate) ctx:   &'ctx mut Context,
    pub(crate) font:  &'ctx dyn FontAtlas,
    pub(crate) scale: f32,
}

impl<'ctx> Ui<'ctx> {
    #[doc(hidden)]
    pub fn new(ctx: &'ctx mut Context, font: &'ctx dyn FontAtlas, scale: f32) -> Self {
        Self { ctx, font, scale }
    }

    // ── Style / Theme ─────────────────────────────────────────────────────────

    pub fn style(&self) -> &Style { &self.ctx.style }

    pub fn push_style_color(&mut self, var: StyleColor, col: Color) -> StyleColorToken {
        let old = self.ctx.style.colors[var as usize];
        self.ctx.style.colors[var as usize] = col;
        StyleColorToken { var, old }
    }

    pub fn pop_style_color(&mut self, tok: StyleColorToken) {
        self.ctx.style.colors[tok.var as usize] = tok.old;
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    /// Place the next widget on the same horizontal line.
    pub fn same_line(&mut self, spacing: f32) {
        if let Some(l) = self.ctx.current_layout_mut() { l.same_line(spacing); }
    }

    /// Vertical gap of one item spacing.
    pub fn spacing(&mut self) {
        let h = self.ctx.style.item_spacing.1;
        self.layout_next(Vec2::new(0.0, h));
    }


    /// Remaining width available on the current line.
    pub fn available_width(&self) -> f32 {
        self.ctx.current_window()
            .map(|w| w.layout.available_width())
            .unwrap_or(self.ctx.input.display_size.x)
    }

    pub fn display_size(&self) -> Vec2 { self.ctx.input.display_size }
    pub fn frame_count(&self)  -> u64  { self.ctx.input.frame_count }

    // ── Text ──────────────────────────────────────────────────────────────────

    pub fn text(&mut self, s: &str) {
        let c = self.ctx.style.color(StyleColor::Text);
        self.text_colored(c, s);
    }

    pub fn text_colored(&mut self, color: Color, text: &str) {
        if let Some(pos) = self.layout_next_for_text(text) {
            self.draw_text(text, pos, color);
        }
    }

    pub fn text_disabled(&mut self, s: &str) {
        let c = self.ctx.style.color(StyleColor::TextDisabled);
        self.text_colored(c, s);
    }

    /// Text broken into lines at the content width.
    pub fn text_wrapped(&mut self, s: &str) {
        let width = self.available_width();
        let c = self.ctx.style.color(StyleColor::Text);
        widgets::text::text_wrapped(self, s, width, c);
    }

    pub fn separator(&mut self) { widgets::text::separator(self); }

    /// Separator with a caption embedded on the left.
    pub fn separator_text(&mut self, label: &str) { widgets::text::separator_text(self, label); }

    // ── Window ────────────────────────────────────────────────────────────────

    /// Position used the first time the next window is created.
    pub fn set_next_window_pos(&mut self, pos: Vec2)  { self.ctx.next_window.pos = Some(pos); }
    /// Size used the first time the next window is created.
    pub fn set_next_window_size(&mut self, size: Vec2) { self.ctx.next_window.size = Some(size); }

    /// Begin a window. Returns `true` if its contents should be submitted.
    /// Always call `end()` regardless of the return value.
    pub fn begin(&mut self, title: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool {
        widgets::window::begin(self, title, open, flags)
    }

    /// End the most recently begun window.
    pub fn end(&mut self) {
        widgets::window::end(self);
    }

    // ── Menus ─────────────────────────────────────────────────────────────────

    /// Requires a window begun with [`WindowFlags::MENU_BAR`].
    pub fn begin_menu_bar(&mut self) -> bool { widgets::menu::begin_menu_bar(self) }
    pub fn end_menu_bar(&mut self)           { widgets::menu::end_menu_bar(self) }

    /// A menu-bar entry. Returns `true` while its popup is open; call
    /// `end_menu()` only in that case.
    pub fn begin_menu(&mut self, label: &str) -> bool { widgets::menu::begin_menu(self, label) }
    pub fn end_menu(&mut self)                        { widgets::menu::end_menu(self) }

    pub fn menu_item(&mut self, label: &str) -> bool {
        widgets::menu::menu_item(self, label, None)
    }

    /// Menu item with a check mark bound to `v`.
    pub fn menu_item_toggle(&mut self, label: &str, v: &mut bool) -> bool {
        let clicked = widgets::menu::menu_item(self, label, Some(*v));
        if clicked { *v = !*v; }
        clicked
    }

    // ── Button ────────────────────────────────────────────────────────────────

    /// A clickable button. Returns `true` on click.
    pub fn button(&mut self, label: &str) -> bool {
        self.button_sized(label, Vec2::ZERO)
    }

    /// Button with explicit size. Use `Vec2::ZERO` for auto-size.
    pub fn button_sized(&mut self, label: &str, size: Vec2) -> bool {
        widgets::button::button(self, label, size)
    }

    pub fn small_button(&mut self, label: &str) -> bool {
        widgets::button::small_button(self, label)
    }

    pub fn collapsing_header(&mut self, label: &str) -> bool {
        widgets::button::collapsing_header(self, label)
    }

    // ── Checkbox ─────────────────────────────────────────────────────────────

    pub fn checkbox(&mut self, label: &str, v: &mut bool) -> bool {
        widgets::checkbox::checkbox(self, label, v)
    }

    // ── Slider ───────────────────────────────────────────────────────────────

    pub fn slider_float(&mut self, label: &str, v: &mut f32, min: f32, max: f32) -> bool {
        widgets::slider::slider_float(self, label, v, min, max)
    }

    pub fn slider_int(&mut self, label: &str, v: &mut i32, min: i32, max: i32) -> bool {
        let mut vf = *v as f32;
        let changed = self.slider_float(label, &mut vf, min as f32, max as f32);
        if changed { *v = vf.round() as i32; }
        changed
    }

    pub fn drag_float(&mut self, label: &str, v: &mut f32, speed: f32, min: f32, max: f32) -> bool {
        widgets::slider::drag_float(self, label, v, speed, min, max)
    }

    // ── Input text ───────────────────────────────────────────────────────────

    pub fn input_text(&mut self, label: &str, buf: &mut String) -> bool {
        widgets::input_text::input_text(self, label, buf, usize::MAX)
    }

    /// Text entry that never grows `buf` beyond `capacity` bytes.
    pub fn input_text_with_capacity(&mut self, label: &str, buf: &mut String, capacity: usize) -> bool {
        widgets::input_text::input_text(self, label, buf, capacity)
    }

    // ── Combo / list box ─────────────────────────────────────────────────────

    pub fn combo(&mut self, label: &str, selected: &mut usize, items: &[&str]) -> bool {
        widgets::combo::combo(self, label, selected, items)
    }

    /// Scrolling region for `selectable` rows. `size.y = 0` picks a height
    /// of about four rows. Call `end_list_box()` only when this returns `true`.
    pub fn begin_list_box(&mut self, label: &str, size: Vec2) -> bool {
        widgets::list_box::begin_list_box(self, label, size)
    }

    pub fn end_list_box(&mut self) { widgets::list_box::end_list_box(self) }

    pub fn selectable(&mut self, label: &str, selected: bool) -> bool {
        widgets::list_box::selectable(self, label, selected)
    }

    // ── Progress bar ─────────────────────────────────────────────────────────

    /// `fraction` in 0.0..=1.0; `size.x = 0` → full available width.
    pub fn progress_bar(&mut self, fraction: f32, size: Vec2, overlay: Option<&str>) {
        widgets::progress_bar::progress_bar(self, fraction, size, overlay);
    }

    // ── Tab bar ──────────────────────────────────────────────────────────────

    pub fn begin_tab_bar(&mut self, id: &str) -> bool {
        widgets::tabs::begin_tab_bar(self, id)
    }

    pub fn end_tab_bar(&mut self) {
        widgets::tabs::end_tab_bar(self);
    }

    /// Returns `true` when this tab is the selected one.
    pub fn tab_item(&mut self, label: &str) -> bool {
        widgets::tabs::tab_item(self, label)
    }

    // ── Built-in demo ────────────────────────────────────────────────────────

    /// Window showcasing every widget. Clicking its close button clears `open`.
    pub fn show_demo_window(&mut self, open: &mut bool) {
        widgets::demo::show_demo_window(self, open);
    }

    // ─── Internal helpers ──────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn font_size(&self) -> f32 { self.ctx.style.font_size * self.scale }

    /// Height of a framed single-line widget at the current scale.
    #[inline]
    pub(crate) fn frame_height(&self) -> f32 { self.font_size() + self.ctx.style.frame_padding.1 * 2.0 }

    /// Place a text-sized item in the current layout; returns the position.
    pub(crate) fn layout_next_for_text(&mut self, text: &str) -> Option<Vec2> {
        let sz = Vec2::new(self.text_width(text), self.font_size());
        self.layout_next(sz)
    }

    /// Place an item of explicit size; returns its top-left position.
    pub(crate) fn layout_next(&mut self, size: Vec2) -> Option<Vec2> {
        let sp = self.ctx.style.item_spacing;
        self.ctx.current_layout_mut().map(|l| l.place(size, sp))
    }

    /// Emit text glyphs into the draw list at `pos`.
    pub(crate) fn draw_text(&mut self, text: &str, pos: Vec2, col: Color) {
        if text.is_empty() { return; }
        let fs = self.font_size();
        let draw = &mut self.ctx.draw_list;
        draw.push_texture(self.font.texture());
        let mut x = pos.x;
        for ch in text.chars() {
            if let Some(g) = self.font.glyph(ch, fs) {
                let p_min = Vec2::new(x, pos.y + g.offset_y);
                draw.textured_quad(p_min, p_min + g.size, g.uv_min, g.uv_max, col);
                x += g.advance_x;
            }
        }
        draw.pop_texture();
    }

    /// Measure text width in logical pixels.
    pub(crate) fn text_width(&self, text: &str) -> f32 {
        self.font.measure(text, self.font_size())
    }
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

pub struct StyleColorToken {
    pub(crate) var: StyleColor,
    pub(crate) old: Color,
}

// ─── Context extension: frame builder ────────────────────────────────────────

impl Context {
    /// Run an immediate-mode frame, borrowing `self` and the font atlas.
    ///
    /// ```rust,ignore
    /// ctx.frame(&*my_font, 1.0, |ui| {
    ///     if ui.begin("Demo", Some(&mut open), WindowFlags::empty()) {
    ///         ui.text("Hello!");
    ///     }
    ///     ui.end();
    /// });
    /// ```
    pub fn frame<F>(&mut self, font: &dyn FontAtlas, scale: f32, f: F)
    where
        F: FnOnce(&mut Ui<'_>),
    {
        self.new_frame();
        {
            let mut ui = Ui::new(self, font, scale);
            f(&mut ui);
        }
        self.finish_frame();
    }
}
