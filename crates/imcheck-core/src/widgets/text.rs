//! Text helpers beyond the one-liners on `Ui`: wrapping and separators.

use crate::{style::StyleColor, ui::Ui, Color, Rect, Vec2};

/// Render text broken at word boundaries to fit `wrap_width` pixels.
pub fn text_wrapped(ui: &mut Ui<'_>, text: &str, wrap_width: f32, col: Color) {
    let fs    = ui.font_size();
    let space = ui.text_width(" ");
    let mut line   = String::new();
    let mut line_w = 0.0f32;

    for word in text.split_whitespace() {
        let ww  = ui.text_width(word);
        let gap = if line.is_empty() { 0.0 } else { space };
        if !line.is_empty() && line_w + gap + ww > wrap_width {
            flush_line(ui, &line, line_w, fs, col);
            line.clear();
            line_w = 0.0;
        }
        if !line.is_empty() { line.push(' '); line_w += space; }
        line.push_str(word);
        line_w += ww;
    }
    if !line.is_empty() {
        flush_line(ui, &line, line_w, fs, col);
    }
}

fn flush_line(ui: &mut Ui<'_>, line: &str, width: f32, fs: f32, col: Color) {
    if let Some(pos) = ui.layout_next(Vec2::new(width, fs)) {
        ui.draw_text(line, pos, col);
    }
}

pub fn separator(ui: &mut Ui<'_>) {
    let width = ui.available_width();
    let col   = ui.ctx.style.color(StyleColor::Separator);
    if let Some(pos) = ui.layout_next(Vec2::new(width, 1.0)) {
        ui.ctx.draw_list.filled_rect(Rect::from_min_size(pos, Vec2::new(width, 1.0)), 0.0, col);
    }
}

/// `── label ─────────` spanning the content width.
pub fn separator_text(ui: &mut Ui<'_>, label: &str) {
    let width = ui.available_width();
    let fs    = ui.font_size();
    let pad   = ui.ctx.style.item_spacing.0;
    let lead  = pad * 2.0;
    let tw    = ui.text_width(label);
    let pos = match ui.layout_next(Vec2::new(width, fs + 2.0)) { Some(p) => p, None => return };

    let sep = ui.ctx.style.color(StyleColor::Separator);
    let y   = pos.y + (fs + 2.0) * 0.5;
    let draw = &mut ui.ctx.draw_list;
    draw.filled_rect(Rect::from_min_size(Vec2::new(pos.x, y), Vec2::new(lead - pad * 0.5, 1.0)), 0.0, sep);
    let tail_x = pos.x + lead + tw + pad * 0.5;
    draw.filled_rect(Rect::new(Vec2::new(tail_x, y), Vec2::new(pos.x + width, y + 1.0)), 0.0, sep);

    let tc = ui.ctx.style.color(StyleColor::Text);
    ui.draw_text(label, Vec2::new(pos.x + lead, pos.y + 1.0), tc);
}
