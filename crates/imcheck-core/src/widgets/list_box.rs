//! Scrolling list box and selectable rows.

use crate::{
    context::WindowFrame,
    id::parse_label,
    item::{ItemKind, ItemStatus},
    layout::Layout,
    style::StyleColor,
    ui::Ui,
    Rect, Vec2,
};

const DEFAULT_ROWS: f32 = 4.25;
const WHEEL_STEP:   f32 = 20.0;

pub fn begin_list_box(ui: &mut Ui<'_>, label: &str, mut size: Vec2) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let sp = ui.ctx.style.item_spacing;
    let fp = ui.ctx.style.frame_padding;
    let tw = if text.is_empty() { 0.0 } else { ui.text_width(text) + sp.0 };
    if size.x <= 0.0 { size.x = (ui.available_width() - tw).max(60.0); }
    if size.y <= 0.0 { size.y = (ui.frame_height() + sp.1) * DEFAULT_ROWS + fp.1 * 2.0; }

    let pos = match ui.layout_next(Vec2::new(size.x + tw, size.y)) { Some(p) => p, None => return false };
    let rect = Rect::from_min_size(pos, size);

    let i = ui.ctx.button_behavior(id, rect);
    ui.ctx.register_item(id, rect, text, ItemKind::ListBox, ItemStatus::empty());

    // Scroll offset and last frame's content height live in storage.
    let (mut scroll, content_h) = ui.ctx.get_storage(id).map_or((0.0, 0.0), |s| (s.float[0], s.float[1]));
    if i.hovered && ui.ctx.input.mouse_wheel != 0.0 {
        scroll -= ui.ctx.input.mouse_wheel * WHEEL_STEP;
    }
    let max_scroll = (content_h + fp.1 * 2.0 - size.y).max(0.0);
    scroll = scroll.min(max_scroll).max(0.0);
    ui.ctx.get_storage_mut(id).float[0] = scroll;

    let rounding = ui.ctx.style.frame_rounding;
    let bg       = ui.ctx.style.color(StyleColor::FrameBg);
    let border   = ui.ctx.style.color(StyleColor::Border);
    ui.ctx.draw_list.filled_rect(rect, rounding, bg);
    ui.ctx.draw_list.rect_outline(rect, 1.0, border);

    if !text.is_empty() {
        let tc = ui.ctx.style.color(StyleColor::Text);
        ui.draw_text(text, Vec2::new(rect.max.x + sp.0, pos.y + fp.1), tc);
    }

    let inner = Rect::new(rect.min + Vec2::new(1.0, 1.0), rect.max - Vec2::new(1.0, 1.0));
    ui.ctx.draw_list.push_clip_rect(inner);
    let clip_rect = ui.ctx.draw_list.clip_rect().unwrap_or(inner);
    let start  = Vec2::new(rect.min.x + fp.0, rect.min.y + fp.1 - scroll);
    let layout = Layout::new(start, size.x - fp.0 * 2.0);
    ui.ctx.push_id(id);
    ui.ctx.window_stack.push(WindowFrame { id, layout, clip_rect, menu_bar: None });
    true
}

pub fn end_list_box(ui: &mut Ui<'_>) {
    let frame = match ui.ctx.window_stack.pop() { Some(f) => f, None => return };
    ui.ctx.pop_id();
    ui.ctx.draw_list.pop_clip_rect();

    ui.ctx.get_storage_mut(frame.id).float[1] = frame.layout.content_size().y;
}

/// A full-width row that highlights when `selected`. Returns `true` on click.
pub fn selectable(ui: &mut Ui<'_>, label: &str, selected: bool) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fs  = ui.font_size();
    let fp  = ui.ctx.style.frame_padding;
    let h   = ui.frame_height();
    let w   = ui.available_width();
    let pos = match ui.layout_next(Vec2::new(w, h)) { Some(p) => p, None => return false };
    let rect = Rect::from_min_size(pos, Vec2::new(w, h));

    let i = ui.ctx.button_behavior(id, rect);
    let status = if selected { ItemStatus::SELECTED } else { ItemStatus::empty() };
    ui.ctx.register_item(id, rect, text, ItemKind::Selectable, status);

    if selected || i.hovered {
        let col = if i.held {
            ui.ctx.style.color(StyleColor::HeaderActive)
        } else if i.hovered {
            ui.ctx.style.color(StyleColor::HeaderHovered)
        } else {
            ui.ctx.style.color(StyleColor::Header)
        };
        ui.ctx.draw_list.filled_rect(rect, 0.0, col);
    }

    let tc = ui.ctx.style.color(StyleColor::Text);
    ui.draw_text(text, Vec2::new(pos.x + fp.0, pos.y + (h - fs) * 0.5), tc);

    i.clicked
}
