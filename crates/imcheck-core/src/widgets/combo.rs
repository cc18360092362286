//! Combo-box (dropdown) widget.

use crate::{
    id::parse_label,
    item::{ItemKind, ItemStatus},
    style::StyleColor,
    ui::Ui,
    Rect, Vec2,
};

use super::{list_box::selectable, menu::{self, dismiss_on_outside_click}};

pub fn combo(
    ui:       &mut Ui<'_>,
    label:    &str,
    selected: &mut usize,
    items:    &[&str],
) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fs    = ui.font_size();
    let fp    = ui.ctx.style.frame_padding;
    let sp    = ui.ctx.style.item_spacing;
    let h     = ui.frame_height();
    let tw    = ui.text_width(text);
    let box_w = (ui.available_width() - tw - sp.0).max(60.0);
    let total = Vec2::new(box_w + sp.0 + tw, h);

    let pos = match ui.layout_next(total) { Some(p) => p, None => return false };
    let box_rect = Rect::from_min_size(pos, Vec2::new(box_w, h));

    let i = ui.ctx.button_behavior(id, box_rect);
    if i.pressed {
        let was_open = ui.ctx.open_popup == Some(id);
        ui.ctx.open_popup = if was_open { None } else { Some(id) };
    }

    let row_h      = h + sp.1;
    let popup_h    = items.len() as f32 * row_h - sp.1 + fp.1 * 2.0;
    let popup_rect = Rect::from_min_size(Vec2::new(pos.x, pos.y + h + 2.0), Vec2::new(box_w, popup_h.max(h)));
    let open = dismiss_on_outside_click(ui, id, &[box_rect, popup_rect]);

    let status = if open { ItemStatus::OPENED } else { ItemStatus::empty() };
    ui.ctx.register_item(id, box_rect, text, ItemKind::Combo, status);

    let bg = if i.hovered || open { ui.ctx.style.color(StyleColor::FrameBgHovered) }
             else                 { ui.ctx.style.color(StyleColor::FrameBg) };
    let rounding = ui.ctx.style.frame_rounding;
    let border   = ui.ctx.style.color(StyleColor::Border);
    let tc       = ui.ctx.style.color(StyleColor::Text);
    {
        let draw = &mut ui.ctx.draw_list;
        draw.filled_rect(box_rect, rounding, bg);
        draw.rect_outline(box_rect, 1.0, border);

        let ax = pos.x + box_w - fp.0 - 6.0;
        let ay = pos.y + h * 0.5;
        draw.triangle_filled(
            Vec2::new(ax - 4.0, ay - 2.0),
            Vec2::new(ax + 4.0, ay - 2.0),
            Vec2::new(ax, ay + 4.0),
            tc,
        );
    }

    let cur = items.get(*selected).copied().unwrap_or("");
    ui.draw_text(cur, Vec2::new(pos.x + fp.0, pos.y + (h - fs) * 0.5), tc);

    if !text.is_empty() {
        let lp = Vec2::new(pos.x + box_w + sp.0, pos.y + (h - fs) * 0.5);
        ui.draw_text(text, lp, tc);
    }

    if !open || items.is_empty() {
        return false;
    }

    let mut changed = false;
    menu::open_popup_scope(ui, id, popup_rect);
    for (idx, &item) in items.iter().enumerate() {
        if selectable(ui, item, idx == *selected) {
            *selected = idx;
            changed = true;
            ui.ctx.close_popups();
        }
    }
    menu::close_popup_scope(ui);

    changed
}
