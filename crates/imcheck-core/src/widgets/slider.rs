//! Slider and drag widgets.

use crate::{
    id::parse_label,
    item::{ItemKind, ItemStatus},
    style::StyleColor,
    ui::Ui,
    Rect, Vec2,
};

/// Horizontal slider. The registered item rect is the track only, so a
/// driver can aim at a fraction of its width.
pub fn slider_float(ui: &mut Ui<'_>, label: &str, v: &mut f32, min: f32, max: f32) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fs  = ui.font_size();
    let fp  = ui.ctx.style.frame_padding;
    let h   = ui.frame_height();
    let tw  = ui.text_width(text);
    let sp  = ui.ctx.style.item_spacing;

    // Track width = available - label - spacing
    let track_w = (ui.available_width() - tw - sp.0).max(50.0);
    let total   = Vec2::new(track_w + sp.0 + tw, h);

    let pos = match ui.layout_next(total) { Some(p) => p, None => return false };
    let track_rect = Rect::from_min_size(pos, Vec2::new(track_w, h));

    let i = ui.ctx.button_behavior(id, track_rect);
    ui.ctx.register_item(id, track_rect, text, ItemKind::Slider, ItemStatus::empty());

    let mut changed = false;
    if i.held {
        let t = ((ui.ctx.input.mouse_pos.x - track_rect.min.x) / track_w).clamp(0.0, 1.0);
        let new_v = min + t * (max - min);
        if (*v - new_v).abs() > f32::EPSILON {
            *v = new_v;
            changed = true;
        }
    }

    let val_str  = format!("{:.3}", v);
    let vw       = ui.text_width(&val_str);
    let tc       = ui.ctx.style.color(StyleColor::Text);
    let vp       = Vec2::new(pos.x + (track_w - vw) * 0.5, pos.y + fp.1);
    let bg       = if i.hovered { ui.ctx.style.color(StyleColor::FrameBgHovered) }
                   else         { ui.ctx.style.color(StyleColor::FrameBg) };
    let rounding = ui.ctx.style.frame_rounding;
    let t        = if max != min { ((*v - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
    let filled_w = track_w * t;
    let grab_sz  = ui.ctx.style.grab_min_size.max(6.0);
    let grab_x   = (pos.x + filled_w - grab_sz * 0.5).min(pos.x + track_w - grab_sz).max(pos.x);
    let grab_rect = Rect::from_min_size(Vec2::new(grab_x, pos.y + 1.0), Vec2::new(grab_sz, h - 2.0));
    let fill_col  = ui.ctx.style.color(StyleColor::SliderGrab).with_alpha(0.35);
    let grab_col  = if i.held { ui.ctx.style.color(StyleColor::SliderGrabActive) }
                    else      { ui.ctx.style.color(StyleColor::SliderGrab) };

    {
        let draw = &mut ui.ctx.draw_list;
        draw.filled_rect(track_rect, rounding, bg);
        if filled_w > 0.0 {
            draw.filled_rect(Rect::from_min_size(pos, Vec2::new(filled_w, h)), rounding, fill_col);
        }
        draw.filled_rect(grab_rect, rounding, grab_col);
    }

    ui.draw_text(&val_str, vp, tc);

    let lp = Vec2::new(pos.x + track_w + sp.0, pos.y + (h - fs) * 0.5);
    ui.draw_text(text, lp, tc);

    changed
}

/// Value box changed by dragging horizontally. `min == max` means unbounded.
pub fn drag_float(ui: &mut Ui<'_>, label: &str, v: &mut f32, speed: f32, min: f32, max: f32) -> bool {
    let (text, id_src) = parse_label(label);
    let id = ui.ctx.make_id(id_src);

    let fs  = ui.font_size();
    let fp  = ui.ctx.style.frame_padding;
    let h   = ui.frame_height();
    let tw  = ui.text_width(text);
    let sp  = ui.ctx.style.item_spacing;
    let box_w = (ui.available_width() - tw - sp.0).max(50.0);
    let total = Vec2::new(box_w + sp.0 + tw, h);

    let pos = match ui.layout_next(total) { Some(p) => p, None => return false };
    let box_rect = Rect::from_min_size(pos, Vec2::new(box_w, h));

    let i = ui.ctx.button_behavior(id, box_rect);
    ui.ctx.register_item(id, box_rect, text, ItemKind::Slider, ItemStatus::empty());

    let mut changed = false;
    if i.held {
        let delta = ui.ctx.input.mouse_delta.x * speed;
        if delta.abs() > f32::EPSILON {
            let (lo, hi) = if min == max { (f32::NEG_INFINITY, f32::INFINITY) } else { (min, max) };
            *v = (*v + delta).clamp(lo, hi);
            changed = true;
        }
    }

    let bg       = if i.hovered { ui.ctx.style.color(StyleColor::FrameBgHovered) }
                   else         { ui.ctx.style.color(StyleColor::FrameBg) };
    let rounding = ui.ctx.style.frame_rounding;
    let border   = ui.ctx.style.color(StyleColor::Border);
    let val_str  = format!("{:.3}", v);
    let tc       = ui.ctx.style.color(StyleColor::Text);
    let vp       = Vec2::new(pos.x + fp.0, pos.y + (h - fs) * 0.5);

    {
        let draw = &mut ui.ctx.draw_list;
        draw.filled_rect(box_rect, rounding, bg);
        draw.rect_outline(box_rect, 1.0, border);
    }

    ui.draw_text(&val_str, vp, tc);

    let lp = Vec2::new(pos.x + box_w + sp.0, pos.y + (h - fs) * 0.5);
    ui.draw_text(text, lp, tc);

    changed
}
