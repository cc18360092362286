//! Single-line text input widget.
//!
//! Clicking focuses the field and puts the caret at the end. `Ctrl+A`
//! selects everything, so the next typed text or Backspace replaces it.
//! Enter, Escape or a click elsewhere drops focus.

use crate::{
    id::parse_label,
    input::{Key, MouseButton},
    item::{ItemKind, ItemStatus},
    style::StyleColor,
    ui::Ui,
    Rect, Vec2,
};

pub fn input_text(ui: &mut Ui<'_>, label: &str, buf: &mut String, capacity: usize) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fs  = ui.font_size();
    let fp  = ui.ctx.style.frame_padding;
    let h   = ui.frame_height();
    let tw  = ui.text_width(text);
    let sp  = ui.ctx.style.item_spacing;
    let box_w = (ui.available_width() - tw - sp.0).max(60.0);
    let total = Vec2::new(box_w + sp.0 + tw, h);

    let pos = match ui.layout_next(total) { Some(p) => p, None => return false };
    let box_rect = Rect::from_min_size(pos, Vec2::new(box_w, h));

    let i = ui.ctx.button_behavior(id, box_rect);
    if i.pressed {
        ui.ctx.get_storage_mut(id).active = false;
    }
    if ui.ctx.focus_item == Some(id)
        && ui.ctx.input.mouse_clicked(MouseButton::Left)
        && !i.hovered
    {
        ui.ctx.focus_item = None;
    }

    let focused = ui.ctx.focus_item == Some(id);
    let mut select_all = focused && ui.ctx.get_storage(id).is_some_and(|s| s.active);
    let mut changed = false;

    if focused {
        let input = &ui.ctx.input;
        if input.ctrl() && input.key_pressed(Key::A) {
            select_all = true;
        }
        if input.key_pressed(Key::Backspace) || input.key_pressed(Key::Delete) {
            if select_all {
                changed |= !buf.is_empty();
                buf.clear();
                select_all = false;
            } else if input.key_pressed(Key::Backspace) && buf.pop().is_some() {
                changed = true;
            }
        }
        if !input.text_input.is_empty() {
            if select_all {
                buf.clear();
                select_all = false;
            }
            changed |= push_bounded(buf, &input.text_input, capacity);
        }
        if input.key_pressed(Key::Enter) || input.key_pressed(Key::Escape) {
            ui.ctx.focus_item = None;
            select_all = false;
        }
        ui.ctx.get_storage_mut(id).active = select_all;
    }
    let focused = ui.ctx.focus_item == Some(id);

    ui.ctx.register_item(id, box_rect, text, ItemKind::InputText, ItemStatus::empty());

    // ── Drawing ───────────────────────────────────────────────────────────────

    let bg_col = if focused        { ui.ctx.style.color(StyleColor::FrameBgActive)  }
                 else if i.hovered { ui.ctx.style.color(StyleColor::FrameBgHovered) }
                 else              { ui.ctx.style.color(StyleColor::FrameBg) };
    let rounding   = ui.ctx.style.frame_rounding;
    let border_col = if focused { ui.ctx.style.color(StyleColor::SliderGrab) }
                     else       { ui.ctx.style.color(StyleColor::Border) };
    {
        let draw = &mut ui.ctx.draw_list;
        draw.filled_rect(box_rect, rounding, bg_col);
        draw.rect_outline(box_rect, if focused { 2.0 } else { 1.0 }, border_col);
    }

    let tc = ui.ctx.style.color(StyleColor::Text);
    let tp = Vec2::new(pos.x + fp.0, pos.y + (h - fs) * 0.5);
    let buf_w = ui.text_width(buf);
    if select_all && !buf.is_empty() {
        let sel = ui.ctx.style.color(StyleColor::TextSelectedBg);
        ui.ctx.draw_list.filled_rect(Rect::from_min_size(tp, Vec2::new(buf_w, fs)), 0.0, sel);
    }
    ui.ctx.draw_list.push_clip_rect(box_rect.shrink(1.0));
    ui.draw_text(buf, tp, tc);

    if focused && (ui.ctx.input.frame_count / 30) % 2 == 0 {
        let cx = tp.x + buf_w;
        ui.ctx.draw_list.line(Vec2::new(cx, pos.y + fp.1), Vec2::new(cx, pos.y + h - fp.1), 1.0, tc);
    }
    ui.ctx.draw_list.pop_clip_rect();

    if !text.is_empty() {
        let lp = Vec2::new(pos.x + box_w + sp.0, pos.y + (h - fs) * 0.5);
        ui.draw_text(text, lp, tc);
    }

    changed
}

/// Append `text` while the byte length stays within `capacity`.
/// Returns whether anything was appended.
fn push_bounded(buf: &mut String, text: &str, capacity: usize) -> bool {
    let mut pushed = false;
    for ch in text.chars() {
        if buf.len() + ch.len_utf8() > capacity { break; }
        buf.push(ch);
        pushed = true;
    }
    pushed
}

#[cfg(test)]
mod tests {
    use super::push_bounded;

    #[test]
    fn capacity_is_in_bytes_and_never_splits_a_char() {
        let mut buf = String::from("ab");
        assert!(push_bounded(&mut buf, "cé", 4));
        assert_eq!(buf, "abc");
        assert!(!push_bounded(&mut buf, "é", 4));
        assert_eq!(buf.len(), 3);
    }
}
