//! Menu bar, menus and menu items; also the popup scope shared with combos.
//!
//! Only one popup is open at a time (`Context::open_popup`). Popup contents
//! are drawn on the overlay layer and scoped under the owner's ID, so the
//! "Reset" entry of the "File" menu in "Test Window" is
//! `"Test Window/File/Reset"`.

use crate::{
    context::WindowFrame,
    id::{parse_label, Id},
    input::MouseButton,
    item::{ItemKind, ItemStatus},
    layout::Layout,
    style::StyleColor,
    ui::Ui,
    Rect, Vec2,
};

const MIN_POPUP_W: f32 = 120.0;

// ─── Popup scope ─────────────────────────────────────────────────────────────

/// Start drawing popup contents for `owner` inside `rect`.
pub(crate) fn open_popup_scope(ui: &mut Ui<'_>, owner: Id, rect: Rect) {
    ui.ctx.begin_popup_layer(rect);

    let rounding = ui.ctx.style.frame_rounding;
    let bg       = ui.ctx.style.color(StyleColor::PopupBg);
    let border   = ui.ctx.style.color(StyleColor::Border);
    ui.ctx.draw_list.filled_rect(rect, rounding, bg);
    ui.ctx.draw_list.rect_outline(rect, 1.0, border);
    ui.ctx.draw_list.push_clip_rect(rect);

    let pad = ui.ctx.style.frame_padding;
    let layout = Layout::new(rect.min + Vec2::new(pad.0, pad.1), rect.width() - pad.0 * 2.0);
    ui.ctx.push_id(owner);
    ui.ctx.window_stack.push(WindowFrame { id: owner, layout, clip_rect: rect, menu_bar: None });
}

pub(crate) fn close_popup_scope(ui: &mut Ui<'_>) -> Option<WindowFrame> {
    let frame = ui.ctx.window_stack.pop();
    ui.ctx.draw_list.pop_clip_rect();
    ui.ctx.pop_id();
    ui.ctx.end_popup_layer();
    frame
}

/// Close `owner`'s popup when the mouse goes down outside every rect in `keep`.
/// Returns whether the popup is still open.
pub(crate) fn dismiss_on_outside_click(ui: &mut Ui<'_>, owner: Id, keep: &[Rect]) -> bool {
    if ui.ctx.open_popup != Some(owner) { return false; }
    let p = ui.ctx.input.mouse_pos;
    if ui.ctx.input.mouse_clicked(MouseButton::Left) && !keep.iter().any(|r| r.contains(p)) {
        ui.ctx.close_popups();
        return false;
    }
    true
}

// ─── Menu bar ────────────────────────────────────────────────────────────────

pub fn begin_menu_bar(ui: &mut Ui<'_>) -> bool {
    let bar = match ui.ctx.current_window_mut().and_then(|w| w.menu_bar.as_mut()) {
        Some(bar) => bar,
        None => {
            log::warn!("begin_menu_bar() needs a window with WindowFlags::MENU_BAR");
            return false;
        }
    };
    bar.active = true;
    let rect = bar.rect;
    // The bar sits outside the content clip.
    ui.ctx.draw_list.pop_clip_rect();
    ui.ctx.draw_list.push_clip_rect(rect);
    true
}

pub fn end_menu_bar(ui: &mut Ui<'_>) {
    let clip = match ui.ctx.current_window_mut() {
        Some(w) => {
            if let Some(bar) = w.menu_bar.as_mut() { bar.active = false; }
            w.clip_rect
        }
        None => return,
    };
    ui.ctx.draw_list.pop_clip_rect();
    ui.ctx.draw_list.push_clip_rect(clip);
}

// ─── Menus ───────────────────────────────────────────────────────────────────

pub fn begin_menu(ui: &mut Ui<'_>, label: &str) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let bar = match ui.ctx.current_window().and_then(|w| w.menu_bar) {
        Some(bar) if bar.active => bar,
        _ => {
            log::warn!("begin_menu({text:?}) outside begin_menu_bar()");
            return false;
        }
    };

    let fp   = ui.ctx.style.frame_padding;
    let fs   = ui.font_size();
    let tw   = ui.text_width(text);
    let rect = Rect::from_min_size(Vec2::new(bar.cursor_x, bar.rect.min.y), Vec2::new(tw + fp.0 * 2.0, bar.rect.height()));
    if let Some(b) = ui.ctx.current_window_mut().and_then(|w| w.menu_bar.as_mut()) {
        b.cursor_x = rect.max.x;
    }

    let i = ui.ctx.button_behavior(id, rect);
    let was_open = ui.ctx.open_popup == Some(id);
    if i.pressed {
        ui.ctx.open_popup = if was_open { None } else { Some(id) };
    } else if i.hovered && ui.ctx.open_popup.is_some() && !was_open {
        // Sliding across the bar switches menus.
        let other_is_menu = ui.ctx.open_popup
            .and_then(|p| ui.ctx.item(p))
            .is_some_and(|it| it.kind == ItemKind::Menu);
        if other_is_menu { ui.ctx.open_popup = Some(id); }
    }

    // Popup size is measured while drawing, so use last frame's.
    let stored = ui.ctx.get_storage(id).map(|s| Vec2::new(s.float[0], s.float[1]));
    let size = stored.unwrap_or(Vec2::new(MIN_POPUP_W, 0.0));
    let popup_rect = Rect::from_min_size(Vec2::new(rect.min.x, bar.rect.max.y), size);

    let open = dismiss_on_outside_click(ui, id, &[rect, popup_rect]);
    let status = if open { ItemStatus::OPENED } else { ItemStatus::empty() };
    ui.ctx.register_item(id, rect, text, ItemKind::Menu, status);

    if open || i.hovered {
        let col = if open { StyleColor::HeaderActive } else { StyleColor::HeaderHovered };
        let col = ui.ctx.style.color(col);
        ui.ctx.draw_list.filled_rect(rect, 0.0, col);
    }
    let tc = ui.ctx.style.color(StyleColor::Text);
    ui.draw_text(text, Vec2::new(rect.min.x + fp.0, rect.min.y + (rect.height() - fs) * 0.5), tc);

    if open {
        open_popup_scope(ui, id, popup_rect);
    }
    open
}

pub fn end_menu(ui: &mut Ui<'_>) {
    let frame = match close_popup_scope(ui) { Some(f) => f, None => return };
    let pad     = ui.ctx.style.frame_padding;
    let content = frame.layout.content_size();
    let width   = (content.x + pad.0 * 2.0).max(MIN_POPUP_W);
    let height  = content.y + pad.1 * 2.0;
    let s = ui.ctx.get_storage_mut(frame.id);
    s.float[0] = width;
    s.float[1] = height;
}

// ─── Menu items ──────────────────────────────────────────────────────────────

/// A menu entry; `check` draws a check-mark column. Closes the menu on click.
pub fn menu_item(ui: &mut Ui<'_>, label: &str, check: Option<bool>) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fp     = ui.ctx.style.frame_padding;
    let fs     = ui.font_size();
    let mark_w = if check.is_some() { fs + fp.0 } else { 0.0 };
    let tw     = ui.text_width(text);
    let h      = ui.frame_height();

    // Lay out at natural width so the popup can size itself, but hit-test
    // the whole row.
    let pos = match ui.layout_next(Vec2::new(mark_w + tw + fp.0 * 2.0, h)) { Some(p) => p, None => return false };
    let row_w = ui.ctx.current_window().map_or(0.0, |w| w.clip_rect.max.x) - pos.x;
    let rect = Rect::from_min_size(pos, Vec2::new(row_w.max(tw), h));

    let i = ui.ctx.button_behavior(id, rect);
    let mut status = ItemStatus::empty();
    if let Some(c) = check {
        status |= ItemStatus::CHECKABLE;
        if c { status |= ItemStatus::CHECKED; }
    }
    ui.ctx.register_item(id, rect, text, ItemKind::MenuItem, status);

    if i.hovered {
        let hc = ui.ctx.style.color(StyleColor::HeaderHovered);
        ui.ctx.draw_list.filled_rect(rect, 0.0, hc);
    }
    if check == Some(true) {
        let ck = ui.ctx.style.color(StyleColor::CheckMark);
        let c  = Vec2::new(pos.x + fp.0 + fs * 0.5, pos.y + h * 0.5);
        ui.ctx.draw_list.line(c + Vec2::new(-fs * 0.3, 0.0), c + Vec2::new(-fs * 0.05, fs * 0.3), 2.0, ck);
        ui.ctx.draw_list.line(c + Vec2::new(-fs * 0.05, fs * 0.3), c + Vec2::new(fs * 0.35, -fs * 0.25), 2.0, ck);
    }
    let tc = ui.ctx.style.color(StyleColor::Text);
    ui.draw_text(text, Vec2::new(pos.x + fp.0 + mark_w, pos.y + (h - fs) * 0.5), tc);

    if i.clicked { ui.ctx.close_popups(); }
    i.clicked
}
