//! Button widgets.

use crate::{
    id::parse_label,
    item::{ItemKind, ItemStatus},
    style::StyleColor,
    ui::Ui,
    Color, Rect, Vec2,
};

pub fn button(ui: &mut Ui<'_>, label: &str, mut size: Vec2) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fp   = ui.ctx.style.frame_padding;
    let fs   = ui.font_size();
    let tw   = ui.text_width(text);
    let auto = Vec2::new(tw + fp.0 * 2.0, fs + fp.1 * 2.0);
    if size.x <= 0.0 { size.x = auto.x; }
    if size.y <= 0.0 { size.y = auto.y; }

    let pos = match ui.layout_next(size) { Some(p) => p, None => return false };
    let rect = Rect::from_min_size(pos, size);

    let i = ui.ctx.button_behavior(id, rect);
    ui.ctx.register_item(id, rect, text, ItemKind::Button, ItemStatus::empty());

    let bg_col = if i.held && i.hovered {
        ui.ctx.style.color(StyleColor::ButtonActive)
    } else if i.hovered {
        ui.ctx.style.color(StyleColor::ButtonHovered)
    } else {
        ui.ctx.style.color(StyleColor::Button)
    };
    let rounding = ui.ctx.style.frame_rounding;
    let tc       = ui.ctx.style.color(StyleColor::Text);

    {
        let draw = &mut ui.ctx.draw_list;
        draw.filled_rect(rect, rounding, bg_col);
        draw.rect_outline(rect, 1.0, Color::from_hex(0x222222).with_alpha(0.6));
    }

    // Centered text
    let tp = Vec2::new(
        pos.x + (size.x - tw) * 0.5,
        pos.y + (size.y - fs) * 0.5,
    );
    ui.draw_text(text, tp, tc);

    i.clicked
}

pub fn small_button(ui: &mut Ui<'_>, label: &str) -> bool {
    let old = ui.ctx.style.frame_padding;
    ui.ctx.style.frame_padding = (old.0, 0.0);
    let r = button(ui, label, Vec2::ZERO);
    ui.ctx.style.frame_padding = old;
    r
}

/// Full-width toggle row. Returns whether the section is open this frame.
pub fn collapsing_header(ui: &mut Ui<'_>, label: &str) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let width = ui.available_width();
    let h     = ui.frame_height();
    let pos   = match ui.layout_next(Vec2::new(width, h)) { Some(p) => p, None => return false };
    let rect  = Rect::from_min_size(pos, Vec2::new(width, h));

    let i = ui.ctx.button_behavior(id, rect);
    let mut open = ui.ctx.get_storage(id).is_some_and(|s| s.open);
    if i.clicked {
        open = !open;
        ui.ctx.get_storage_mut(id).open = open;
    }
    let status = if open { ItemStatus::OPENED } else { ItemStatus::empty() };
    ui.ctx.register_item(id, rect, text, ItemKind::Header, status);

    let bg = if i.hovered {
        ui.ctx.style.color(StyleColor::HeaderHovered)
    } else {
        ui.ctx.style.color(StyleColor::Header)
    };
    let rounding = ui.ctx.style.frame_rounding;
    let tc       = ui.ctx.style.color(StyleColor::Text);

    {
        let draw = &mut ui.ctx.draw_list;
        draw.filled_rect(rect, rounding, bg);

        let arrow_x = pos.x + 6.0;
        let arrow_y = pos.y + h * 0.5;
        let (a, b, c) = if open {
            (Vec2::new(arrow_x, arrow_y - 3.0),
             Vec2::new(arrow_x + 6.0, arrow_y - 3.0),
             Vec2::new(arrow_x + 3.0, arrow_y + 3.0))
        } else {
            (Vec2::new(arrow_x, arrow_y - 4.0),
             Vec2::new(arrow_x + 6.0, arrow_y),
             Vec2::new(arrow_x, arrow_y + 4.0))
        };
        draw.triangle_filled(a, b, c, tc);
    }

    let tp = Vec2::new(pos.x + 20.0, pos.y + (h - ui.font_size()) * 0.5);
    ui.draw_text(text, tp, tc);

    open
}
