//! Per-frame context. Owns all mutable GUI state.

use std::collections::HashMap;
use ahash::RandomState;

use crate::{
    draw_list::DrawList,
    id::Id,
    input::{InputState, MouseButton},
    item::{ItemInfo, ItemKind, ItemStatus},
    layout::Layout,
    renderer::RenderFrame,
    style::Style,
    Color, Rect, Vec2, WindowFlags,
};

/// A HashMap with a fixed-seed ahash hasher, so iteration order is stable across runs.
type FxMap<K, V> = HashMap<K, V, RandomState>;

fn new_fxmap<K, V>() -> FxMap<K, V> {
    HashMap::with_hasher(RandomState::with_seeds(0xdeadbeef, 0xcafebabe, 0x12345678, 0xabcdef01))
}

// ─── Persistent window state ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WindowState {
    pub pos:   Vec2,
    pub size:  Vec2,
    pub flags: WindowFlags,
}

impl WindowState {
    pub fn rect(&self) -> Rect { Rect::from_min_size(self.pos, self.size) }
}

// ─── Persistent per-widget storage ───────────────────────────────────────────

/// Small state blob kept for a widget between frames.
#[derive(Debug, Clone, Default)]
pub struct WidgetStorage {
    pub float:  [f32; 4],
    pub int:    [i32; 4],
    /// Child selection (tab bars).
    pub id:     Id,
    pub active: bool,
    pub open:   bool,
}

// ─── Layout scope stack ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub(crate) struct MenuBarLayout {
    pub rect:     Rect,
    pub cursor_x: f32,
    /// Between `begin_menu_bar` and `end_menu_bar`.
    pub active:   bool,
}

/// A layout scope: a window, popup or list box currently being filled.
#[derive(Debug)]
pub(crate) struct WindowFrame {
    pub id:        Id,
    pub layout:    Layout,
    /// Clip applied to the scope's contents.
    pub clip_rect: Rect,
    pub menu_bar:  Option<MenuBarLayout>,
}

/// Outcome of hit-testing one widget rect for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    /// Mouse went down on the widget this frame.
    pub pressed: bool,
    /// Widget owns the mouse and the button is still down.
    pub held:    bool,
    /// Button released over the widget that owns the mouse.
    pub clicked: bool,
}

#[derive(Debug, Default)]
pub(crate) struct NextWindowData {
    pub pos:  Option<Vec2>,
    pub size: Option<Vec2>,
}

// ─── Context ─────────────────────────────────────────────────────────────────

/// The central state container. Create one per render target.
///
/// ```rust,ignore
/// let mut ctx = Context::new();
/// ctx.set_display_size(Vec2::new(1280.0, 720.0));
/// ctx.frame(renderer.font_atlas(), |ui| {
///     // … widget calls …
/// });
/// renderer.render(ctx.render_frame());
/// ```
#[derive(Debug)]
pub struct Context {
    pub(crate) style:     Style,
    pub(crate) input:     InputState,
    pub(crate) draw_list: DrawList,
    /// Popup layer, painted after `draw_list`.
    pub(crate) overlay:   DrawList,

    pub(crate) windows:        FxMap<Id, WindowState>,
    pub(crate) widget_storage: FxMap<Id, WidgetStorage>,
    pub(crate) items:          FxMap<Id, ItemInfo>,

    pub(crate) window_stack: Vec<WindowFrame>,
    pub(crate) id_stack:     Vec<Id>,

    pub(crate) hot_item:    Option<Id>,
    pub(crate) active_item: Option<Id>,
    pub(crate) focus_item:  Option<Id>,

    // At most one combo or menu popup is open at a time.
    pub(crate) open_popup:     Option<Id>,
    pub(crate) popup_depth:    u32,
    pub(crate) popup_rects:    Vec<Rect>,
    /// Last frame's popup rects; they swallow hover for widgets underneath.
    pub(crate) blocking_rects: Vec<Rect>,

    pub(crate) next_window: NextWindowData,
    pub(crate) clear_color: Color,
    pub(crate) demo:        crate::widgets::demo::DemoState,
}

impl Default for Context {
    fn default() -> Self { Self::new() }
}

impl Context {
    pub fn new() -> Self {
        Self {
            style:          Style::dark(),
            input:          InputState::default(),
            draw_list:      DrawList::default(),
            overlay:        DrawList::default(),
            windows:        new_fxmap(),
            widget_storage: new_fxmap(),
            items:          new_fxmap(),
            window_stack:   Vec::new(),
            id_stack:       Vec::new(),
            hot_item:       None,
            active_item:    None,
            focus_item:     None,
            open_popup:     None,
            popup_depth:    0,
            popup_rects:    Vec::new(),
            blocking_rects: Vec::new(),
            next_window:    NextWindowData::default(),
            clear_color:    Color::new(0.45, 0.55, 0.60, 1.0),
            demo:           Default::default(),
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn style(&self) -> &Style { &self.style }
    pub fn style_mut(&mut self) -> &mut Style { &mut self.style }
    pub fn set_display_size(&mut self, sz: Vec2) { self.input.display_size = sz; }
    pub fn set_clear_color(&mut self, c: Color)  { self.clear_color = c; }
    pub fn input_mut(&mut self) -> &mut InputState { &mut self.input }
    pub fn input(&self)         -> &InputState     { &self.input }

    // ── Frame lifecycle ───────────────────────────────────────────────────────

    /// Begin a new frame. `Context::frame` calls this for you.
    pub fn new_frame(&mut self) {
        self.input.begin_frame();
        self.draw_list.clear();
        self.overlay.clear();
        self.window_stack.clear();
        self.id_stack.clear();
        self.items.clear();
        self.hot_item       = None;
        self.popup_depth    = 0;
        self.blocking_rects = std::mem::take(&mut self.popup_rects);
    }

    /// Close out the frame's bookkeeping. `Context::frame` calls this for you.
    pub fn finish_frame(&mut self) {
        if !self.window_stack.is_empty() {
            log::warn!("frame finished with {} unclosed scope(s)", self.window_stack.len());
        }
        if self.popup_depth > 0 {
            std::mem::swap(&mut self.draw_list, &mut self.overlay);
            self.popup_depth = 0;
        }
        if !self.input.mouse_down(MouseButton::Left) {
            self.active_item = None;
        }
        self.input.end_frame();
    }

    /// Borrow the finished frame for a renderer.
    pub fn render_frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            layers:       [&self.draw_list, &self.overlay],
            display_size: self.input.display_size,
            clear_color:  self.clear_color,
        }
    }

    // ── ID helpers ────────────────────────────────────────────────────────────

    /// Push an already-scoped ID.
    pub fn push_id(&mut self, id: Id) { self.id_stack.push(id); }
    /// Push a label scope under the current one.
    pub fn push_id_str(&mut self, s: &str) {
        let id = self.make_id(s);
        self.id_stack.push(id);
    }
    pub fn pop_id(&mut self) { self.id_stack.pop(); }

    /// Scoped ID for an id source (already stripped by `parse_label`).
    pub(crate) fn make_id(&self, id_src: &str) -> Id {
        let base = Id::from_str(id_src);
        match self.id_stack.last() {
            Some(&scope) => scope.combine(base),
            None => base,
        }
    }

    // ── Item registry ─────────────────────────────────────────────────────────

    /// Items submitted during the last frame.
    pub fn items(&self) -> impl Iterator<Item = &ItemInfo> { self.items.values() }

    pub fn item(&self, id: Id) -> Option<&ItemInfo> { self.items.get(&id) }

    /// Look up an item by `/`-separated label path, e.g. `"Test Window/Reset"`.
    pub fn find_item(&self, path: &str) -> Option<&ItemInfo> { self.item(Id::from_path(path)) }

    pub(crate) fn register_item(&mut self, id: Id, rect: Rect, label: &str, kind: ItemKind, status: ItemStatus) {
        let rect = match self.draw_list.clip_rect() {
            Some(clip) => rect.intersect(clip),
            None => rect,
        };
        let status = if self.focus_item == Some(id) { status | ItemStatus::FOCUSED } else { status };
        self.items.insert(id, ItemInfo { id, rect, label: label.to_owned(), kind, status });
    }

    // ── Popups ────────────────────────────────────────────────────────────────

    pub fn open_popup(&self) -> Option<Id> { self.open_popup }

    pub fn close_popups(&mut self) { self.open_popup = None; }

    pub fn focused_item(&self) -> Option<Id> { self.focus_item }

    /// Route drawing to the popup layer and mark `rect` as blocking.
    pub(crate) fn begin_popup_layer(&mut self, rect: Rect) {
        if self.popup_depth == 0 {
            std::mem::swap(&mut self.draw_list, &mut self.overlay);
        }
        self.popup_depth += 1;
        self.popup_rects.push(rect);
    }

    pub(crate) fn end_popup_layer(&mut self) {
        if self.popup_depth == 0 { return; }
        self.popup_depth -= 1;
        if self.popup_depth == 0 {
            std::mem::swap(&mut self.draw_list, &mut self.overlay);
        }
    }

    // ── Interaction ───────────────────────────────────────────────────────────

    fn mouse_blocked(&self) -> bool {
        let p = self.input.mouse_pos;
        if let Some(clip) = self.draw_list.clip_rect() {
            if !clip.contains(p) { return true; }
        }
        self.popup_depth == 0 && self.blocking_rects.iter().any(|r| r.contains(p))
    }

    /// Hit-test `rect` for widget `id` and update hot / active / focus.
    pub(crate) fn button_behavior(&mut self, id: Id, rect: Rect) -> Interaction {
        let hovered = rect.contains(self.input.mouse_pos) && !self.mouse_blocked();
        if hovered { self.hot_item = Some(id); }

        let mut pressed = false;
        if hovered && self.input.mouse_clicked(MouseButton::Left) {
            self.active_item = Some(id);
            self.focus_item  = Some(id);
            pressed = true;
        }

        let owns_mouse = self.active_item == Some(id);
        Interaction {
            hovered,
            pressed,
            held:    owns_mouse && self.input.mouse_down(MouseButton::Left),
            clicked: owns_mouse && hovered && self.input.mouse_released(MouseButton::Left),
        }
    }

    pub(crate) fn is_hot(&self, id: Id) -> bool { self.hot_item == Some(id) }

    // ── Widget storage ────────────────────────────────────────────────────────

    pub(crate) fn get_storage(&self, id: Id) -> Option<&WidgetStorage> {
        self.widget_storage.get(&id)
    }
    pub(crate) fn get_storage_mut(&mut self, id: Id) -> &mut WidgetStorage {
        self.widget_storage.entry(id).or_default()
    }

    // ── Current scope helpers ─────────────────────────────────────────────────

    pub(crate) fn current_window(&self) -> Option<&WindowFrame> {
        self.window_stack.last()
    }

    pub(crate) fn current_window_mut(&mut self) -> Option<&mut WindowFrame> {
        self.window_stack.last_mut()
    }

    pub(crate) fn current_layout_mut(&mut self) -> Option<&mut Layout> {
        self.window_stack.last_mut().map(|w| &mut w.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_release_is_one_click() {
        let mut ctx = Context::new();
        let id = Id::from_str("btn");
        let rect = Rect::from_min_size(Vec2::ZERO, Vec2::splat(20.0));
        ctx.input_mut().set_mouse_pos(Vec2::splat(5.0));

        ctx.input_mut().set_mouse_button(MouseButton::Left, true);
        ctx.new_frame();
        let down = ctx.button_behavior(id, rect);
        assert!(down.pressed && down.held && !down.clicked);
        ctx.finish_frame();

        ctx.input_mut().set_mouse_button(MouseButton::Left, false);
        ctx.new_frame();
        let up = ctx.button_behavior(id, rect);
        assert!(up.clicked && !up.held);
        ctx.finish_frame();

        ctx.new_frame();
        assert!(!ctx.button_behavior(id, rect).clicked);
        ctx.finish_frame();
    }

    #[test]
    fn release_outside_does_not_click() {
        let mut ctx = Context::new();
        let id = Id::from_str("btn");
        let rect = Rect::from_min_size(Vec2::ZERO, Vec2::splat(20.0));
        ctx.input_mut().set_mouse_pos(Vec2::splat(5.0));
        ctx.input_mut().set_mouse_button(MouseButton::Left, true);
        ctx.new_frame();
        ctx.button_behavior(id, rect);
        ctx.finish_frame();

        ctx.input_mut().set_mouse_pos(Vec2::splat(50.0));
        ctx.input_mut().set_mouse_button(MouseButton::Left, false);
        ctx.new_frame();
        assert!(!ctx.button_behavior(id, rect).clicked);
        ctx.finish_frame();
    }

    #[test]
    fn last_frame_popup_blocks_widgets_below() {
        let mut ctx = Context::new();
        let popup = Rect::from_min_size(Vec2::ZERO, Vec2::splat(30.0));
        ctx.new_frame();
        ctx.begin_popup_layer(popup);
        ctx.end_popup_layer();
        ctx.finish_frame();

        ctx.input_mut().set_mouse_pos(Vec2::splat(10.0));
        ctx.new_frame();
        let under = ctx.button_behavior(Id::from_str("under"), popup);
        assert!(!under.hovered);
        ctx.begin_popup_layer(popup);
        assert!(ctx.button_behavior(Id::from_str("inside"), popup).hovered);
        ctx.end_popup_layer();
        ctx.finish_frame();
    }

    #[test]
    fn scoped_ids_follow_the_stack() {
        let mut ctx = Context::new();
        ctx.push_id_str("Test Window");
        let id = ctx.make_id("Reset");
        ctx.pop_id();
        assert_eq!(id, Id::from_path("Test Window/Reset"));
        assert_eq!(ctx.make_id("Reset"), Id::from_str("Reset"));
    }
}
