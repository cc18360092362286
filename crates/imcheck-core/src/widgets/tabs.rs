//! Tab-bar / tab-item widgets.
//!
//! The bar remembers its selected tab by ID; the first tab submitted wins
//! until another is clicked.

use crate::{
    id::{parse_label, Id},
    item::{ItemKind, ItemStatus},
    style::StyleColor,
    ui::Ui,
    Rect, Vec2,
};

/// Begin a tab bar. Always pair with `end_tab_bar` when this returns `true`.
pub fn begin_tab_bar(ui: &mut Ui<'_>, id_str: &str) -> bool {
    let bar_id = ui.ctx.make_id(id_str);
    let tab_h  = ui.frame_height();
    let avail  = ui.available_width();
    let pos = match ui.layout_next(Vec2::new(avail, tab_h)) { Some(p) => p, None => return false };

    let line = ui.ctx.style.color(StyleColor::TabActive);
    ui.ctx.draw_list.filled_rect(
        Rect::from_min_size(Vec2::new(pos.x, pos.y + tab_h - 1.0), Vec2::new(avail, 1.0)),
        0.0,
        line,
    );

    let s = ui.ctx.get_storage_mut(bar_id);
    s.float[0] = pos.x; // cursor x for the next tab
    s.float[1] = pos.y;
    // Forget a selection whose tab vanished last frame.
    if s.int[0] == 0 { s.id = Id::null(); }
    s.int[0] = 0;

    ui.ctx.push_id(bar_id);
    true
}

pub fn end_tab_bar(ui: &mut Ui<'_>) {
    ui.ctx.pop_id();
}

/// Render a single tab. Returns `true` if this tab is selected.
pub fn tab_item(ui: &mut Ui<'_>, label: &str) -> bool {
    let (text, id_src) = parse_label(label);
    let bar_id = match ui.ctx.id_stack.last().copied() {
        Some(id) => id,
        None => return false,
    };
    let item_id = bar_id.combine(Id::from_str(id_src));

    let (bar_x, bar_y, mut current) = ui.ctx.get_storage(bar_id)
        .map_or((0.0, 0.0, Id::null()), |s| (s.float[0], s.float[1], s.id));
    if current.is_null() { current = item_id; }

    let fs    = ui.font_size();
    let fp    = ui.ctx.style.frame_padding;
    let tab_h = ui.frame_height();
    let tab_w = ui.text_width(text) + fp.0 * 2.0 + 4.0;
    let tab_rect = Rect::from_min_size(Vec2::new(bar_x, bar_y), Vec2::new(tab_w, tab_h));

    let i = ui.ctx.button_behavior(item_id, tab_rect);
    if i.clicked { current = item_id; }
    let selected = current == item_id;

    {
        let s = ui.ctx.get_storage_mut(bar_id);
        s.id = current;
        s.float[0] = bar_x + tab_w + 2.0;
        if selected { s.int[0] = 1; }
    }

    let status = if selected { ItemStatus::SELECTED } else { ItemStatus::empty() };
    ui.ctx.register_item(item_id, tab_rect, text, ItemKind::Tab, status);

    let tab_col = if selected      { ui.ctx.style.color(StyleColor::TabActive) }
                  else if i.hovered { ui.ctx.style.color(StyleColor::TabHovered) }
                  else             { ui.ctx.style.color(StyleColor::Tab) };
    let rounding = ui.ctx.style.frame_rounding;
    ui.ctx.draw_list.filled_rect(tab_rect, rounding, tab_col);

    let tc = ui.ctx.style.color(StyleColor::Text);
    let tp = Vec2::new(tab_rect.min.x + fp.0 + 2.0, tab_rect.min.y + (tab_h - fs) * 0.5);
    ui.draw_text(text, tp, tc);

    selected
}
