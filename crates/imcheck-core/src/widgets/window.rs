//! Window widget: begin / end pair.

use crate::{
    context::{MenuBarLayout, WindowFrame, WindowState},
    id::parse_label,
    item::{ItemKind, ItemStatus},
    layout::Layout,
    style::StyleColor,
    ui::Ui,
    Rect, Vec2, WindowFlags,
};

const RESIZE_GRIP:  f32 = 10.0;
const CLOSE_BTN_SZ: f32 = 14.0;
const MIN_SIZE:     Vec2 = Vec2::new(120.0, 60.0);

const DEFAULT_POS:  Vec2 = Vec2::new(60.0, 60.0);
const DEFAULT_SIZE: Vec2 = Vec2::new(400.0, 300.0);

pub fn begin(
    ui:       &mut Ui<'_>,
    title:    &str,
    mut open: Option<&mut bool>,
    flags:    WindowFlags,
) -> bool {
    let (display_name, id_src) = parse_label(title);
    let win_id = ui.ctx.make_id(id_src);

    // Next-window hints only apply when the window is created.
    let next = std::mem::take(&mut ui.ctx.next_window);
    let ws = ui.ctx.windows.entry(win_id).or_insert_with(|| WindowState {
        pos:  next.pos.unwrap_or(DEFAULT_POS),
        size: next.size.unwrap_or(DEFAULT_SIZE),
        flags,
    });
    ws.flags = flags;
    let mut ws = ws.clone();

    let visible = open.as_deref().copied().unwrap_or(true);
    let title_h = if flags.contains(WindowFlags::NO_TITLE_BAR) { 0.0 } else { ui.ctx.style.window_title_height };

    if visible {
        // ── Title bar interaction ─────────────────────────────────────────────
        // The close button sits inside the title bar, so it claims the press first.
        let mut close_pressed = false;
        if title_h > 0.0 && !flags.contains(WindowFlags::NO_CLOSE_BUTTON) {
            if let Some(o) = open.as_deref_mut() {
                let close_rect = close_button_rect(&ws, title_h);
                let close_id   = win_id.child("#CLOSE");
                let close      = ui.ctx.button_behavior(close_id, close_rect);
                close_pressed = close.pressed;
                if close.clicked {
                    *o = false;
                }
                ui.ctx.register_item(close_id, close_rect, "#CLOSE", ItemKind::Button, ItemStatus::empty());
            }
        }

        if title_h > 0.0 && !close_pressed && !flags.contains(WindowFlags::NO_MOVE) {
            let title_rect = Rect::from_min_size(ws.pos, Vec2::new(ws.size.x, title_h));
            let drag = ui.ctx.button_behavior(win_id.child("#MOVE"), title_rect);
            // Cursor travel before the press is not part of the drag.
            if drag.held && !drag.pressed {
                let display = ui.ctx.input.display_size;
                ws.pos += ui.ctx.input.mouse_delta;
                ws.pos.x = ws.pos.x.min(display.x - 40.0).max(0.0);
                ws.pos.y = ws.pos.y.min(display.y - 40.0).max(0.0);
            }
        }

        // Resize (bottom-right grip)
        if !flags.contains(WindowFlags::NO_RESIZE) {
            let grip_rect = Rect::from_min_size(ws.pos + ws.size - Vec2::splat(RESIZE_GRIP), Vec2::splat(RESIZE_GRIP));
            let grip = ui.ctx.button_behavior(win_id.child("#RESIZE"), grip_rect);
            if grip.held && !grip.pressed {
                ws.size += ui.ctx.input.mouse_delta;
                ws.size = ws.size.max(MIN_SIZE);
            }
        }

        if let Some(w) = ui.ctx.windows.get_mut(&win_id) {
            w.pos  = ws.pos;
            w.size = ws.size;
        }
        ui.ctx.register_item(win_id, ws.rect(), display_name, ItemKind::Window, ItemStatus::empty());
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    let bar_h = if flags.contains(WindowFlags::MENU_BAR) { ui.frame_height() } else { 0.0 };
    let window_padding = ui.ctx.style.window_padding;

    if visible {
        let draw  = &mut ui.ctx.draw_list;
        let style = &ui.ctx.style;

        if !flags.contains(WindowFlags::NO_BACKGROUND) {
            draw.filled_rect(ws.rect(), style.window_rounding, style.color(StyleColor::WindowBg));
            draw.rect_outline(ws.rect(), 1.0, style.color(StyleColor::WindowBorder));
        }

        if title_h > 0.0 {
            let tb_rect = Rect::from_min_size(ws.pos, Vec2::new(ws.size.x, title_h));
            draw.filled_rect(tb_rect, style.window_rounding, style.color(StyleColor::TitleBar));

            if open.is_some() && !flags.contains(WindowFlags::NO_CLOSE_BUTTON) {
                let r  = close_button_rect(&ws, title_h).shrink(3.0);
                let tc = style.color(StyleColor::TitleBarText);
                draw.line(r.min, r.max, 1.5, tc);
                draw.line(Vec2::new(r.max.x, r.min.y), Vec2::new(r.min.x, r.max.y), 1.5, tc);
            }
        }

        if bar_h > 0.0 {
            let bar = Rect::from_min_size(Vec2::new(ws.pos.x, ws.pos.y + title_h), Vec2::new(ws.size.x, bar_h));
            draw.filled_rect(bar, 0.0, style.color(StyleColor::MenuBarBg));
        }

        if !flags.contains(WindowFlags::NO_RESIZE) {
            let rg = ws.pos + ws.size - Vec2::splat(RESIZE_GRIP);
            draw.triangle_filled(
                rg + Vec2::new(RESIZE_GRIP, 0.0),
                rg + Vec2::new(0.0, RESIZE_GRIP),
                rg + Vec2::splat(RESIZE_GRIP),
                style.color(StyleColor::ResizeGrip),
            );
        }
    }

    if visible && title_h > 0.0 && !display_name.is_empty() {
        let tp = Vec2::new(
            ws.pos.x + window_padding.0,
            ws.pos.y + (title_h - ui.font_size()) * 0.5,
        );
        let text_col = ui.ctx.style.color(StyleColor::TitleBarText);
        ui.draw_text(display_name, tp, text_col);
    }

    // ── Scope ─────────────────────────────────────────────────────────────────

    let top = ws.pos.y + title_h + bar_h;
    let clip_rect = if visible { Rect::new(Vec2::new(ws.pos.x, top), ws.rect().max) } else { Rect::ZERO };
    let content_start = Vec2::new(ws.pos.x + window_padding.0, top + window_padding.1);
    let layout = Layout::new(content_start, ws.size.x - window_padding.0 * 2.0);
    let menu_bar = (bar_h > 0.0).then(|| MenuBarLayout {
        rect:     Rect::from_min_size(Vec2::new(ws.pos.x, ws.pos.y + title_h), Vec2::new(ws.size.x, bar_h)),
        cursor_x: ws.pos.x + window_padding.0,
        active:   false,
    });

    ui.ctx.push_id(win_id);
    ui.ctx.draw_list.push_clip_rect(clip_rect);
    ui.ctx.window_stack.push(WindowFrame { id: win_id, layout, clip_rect, menu_bar });

    visible
}

pub fn end(ui: &mut Ui<'_>) {
    if ui.ctx.window_stack.pop().is_none() {
        log::warn!("end() called without a matching begin()");
        return;
    }
    ui.ctx.draw_list.pop_clip_rect();
    ui.ctx.pop_id();
}

fn close_button_rect(ws: &WindowState, title_h: f32) -> Rect {
    let pos = Vec2::new(
        ws.pos.x + ws.size.x - CLOSE_BTN_SZ - 4.0,
        ws.pos.y + (title_h - CLOSE_BTN_SZ) * 0.5,
    );
    Rect::from_min_size(pos, Vec2::splat(CLOSE_BTN_SZ))
}
