//! Widget implementations. The public entry points live on [`crate::Ui`].

pub mod button;
pub mod checkbox;
pub mod combo;
pub mod demo;
pub mod input_text;
pub mod list_box;
pub mod menu;
pub mod progress_bar;
pub mod slider;
pub mod tabs;
pub mod text;
pub mod window;

#[cfg(test)]
mod tests {
    use crate::{
        context::Context, draw_list::TextureId, input::{Key, Modifiers, MouseButton},
        renderer::{FontAtlas, GlyphInfo}, ui::Ui, ItemStatus, Vec2, WindowFlags,
    };

    /// Fixed-advance font so layout is predictable.
    struct Mono;

    impl FontAtlas for Mono {
        fn glyph(&self, _ch: char, size_px: f32) -> Option<GlyphInfo> {
            Some(GlyphInfo {
                uv_min: Vec2::ZERO,
                uv_max: Vec2::ONE,
                size: Vec2::new(size_px * 0.5, size_px),
                advance_x: size_px * 0.5,
                offset_y: 0.0,
            })
        }
        fn texture(&self) -> TextureId { TextureId::FONT }
    }

    type Body<S> = dyn Fn(&mut Ui<'_>, &mut S);

    fn frame<S>(ctx: &mut Context, s: &mut S, body: &Body<S>) {
        ctx.frame(&Mono, 1.0, |ui| {
            ui.set_next_window_size(Vec2::new(420.0, 420.0));
            if ui.begin("W", None, WindowFlags::MENU_BAR) { body(ui, s); }
            ui.end();
        });
    }

    fn click<S>(ctx: &mut Context, s: &mut S, body: &Body<S>, path: &str) {
        let at = ctx.find_item(path).filter(|i| i.is_visible()).map(|i| i.rect.center());
        let at = at.unwrap_or_else(|| panic!("{path} not registered"));
        ctx.input_mut().set_mouse_pos(at);
        frame(ctx, s, body);
        ctx.input_mut().set_mouse_button(MouseButton::Left, true);
        frame(ctx, s, body);
        ctx.input_mut().set_mouse_button(MouseButton::Left, false);
        frame(ctx, s, body);
    }

    fn new_ctx() -> Context {
        let mut ctx = Context::new();
        ctx.set_display_size(Vec2::new(800.0, 600.0));
        ctx
    }

    #[test]
    fn checkbox_is_registered_under_its_window() {
        let mut ctx = new_ctx();
        let mut on = false;
        let body: &Body<bool> = &|ui, v| { ui.checkbox("Check", v); };
        frame(&mut ctx, &mut on, body);
        let item = ctx.find_item("W/Check").expect("registered");
        assert!(item.status.contains(ItemStatus::CHECKABLE));
        assert!(!item.is_checked());

        click(&mut ctx, &mut on, body, "W/Check");
        assert!(on);
        assert!(ctx.find_item("W/Check").is_some_and(|i| i.is_checked()));
        click(&mut ctx, &mut on, body, "W/Check");
        assert!(!on);
    }

    #[test]
    fn combo_options_live_under_the_combo() {
        let mut ctx = new_ctx();
        let mut sel = 0usize;
        let body: &Body<usize> = &|ui, v| { ui.combo("Combo", v, &["A", "B", "C"]); };
        frame(&mut ctx, &mut sel, body);
        assert!(ctx.find_item("W/Combo/B").is_none());

        click(&mut ctx, &mut sel, body, "W/Combo");
        assert!(ctx.open_popup().is_some());
        click(&mut ctx, &mut sel, body, "W/Combo/B");
        assert_eq!(sel, 1);
        assert!(ctx.open_popup().is_none());
    }

    #[test]
    fn click_outside_closes_combo() {
        let mut ctx = new_ctx();
        let mut sel = 2usize;
        let body: &Body<usize> = &|ui, v| { ui.combo("Combo", v, &["A", "B", "C"]); };
        frame(&mut ctx, &mut sel, body);
        click(&mut ctx, &mut sel, body, "W/Combo");
        assert!(ctx.open_popup().is_some());

        ctx.input_mut().set_mouse_pos(Vec2::new(790.0, 590.0));
        ctx.input_mut().set_mouse_button(MouseButton::Left, true);
        frame(&mut ctx, &mut sel, body);
        assert!(ctx.open_popup().is_none());
        assert_eq!(sel, 2);
    }

    #[test]
    fn menu_item_fires_and_closes_the_menu() {
        let mut ctx = new_ctx();
        let mut hits = 0u32;
        let body: &Body<u32> = &|ui, n| {
            if ui.begin_menu_bar() {
                if ui.begin_menu("File") {
                    if ui.menu_item("Reset") { *n += 1; }
                    ui.end_menu();
                }
                ui.end_menu_bar();
            }
            ui.text("body");
        };
        frame(&mut ctx, &mut hits, body);
        click(&mut ctx, &mut hits, body, "W/File");
        assert!(ctx.find_item("W/File").is_some_and(|i| i.status.contains(ItemStatus::OPENED)));

        click(&mut ctx, &mut hits, body, "W/File/Reset");
        assert_eq!(hits, 1);
        frame(&mut ctx, &mut hits, body);
        assert!(ctx.find_item("W/File/Reset").is_none());
    }

    #[test]
    fn list_box_rows_are_selectable_by_path() {
        let mut ctx = new_ctx();
        let mut sel: i32 = -1;
        let body: &Body<i32> = &|ui, sel| {
            if ui.begin_list_box("##listbox", Vec2::ZERO) {
                for (i, label) in ["Item 1", "Item 2", "Item 3"].iter().enumerate() {
                    if ui.selectable(label, *sel == i as i32) { *sel = i as i32; }
                }
                ui.end_list_box();
            }
        };
        frame(&mut ctx, &mut sel, body);
        click(&mut ctx, &mut sel, body, "W/##listbox/Item 2");
        assert_eq!(sel, 1);
        frame(&mut ctx, &mut sel, body);
        assert!(ctx.find_item("W/##listbox/Item 2").is_some_and(|i| i.status.contains(ItemStatus::SELECTED)));
    }

    #[test]
    fn select_all_then_type_replaces_text() {
        let mut ctx = new_ctx();
        let mut text = String::from("old");
        let body: &Body<String> = &|ui, t| { ui.input_text_with_capacity("Text", t, 8); };
        frame(&mut ctx, &mut text, body);
        click(&mut ctx, &mut text, body, "W/Text");

        ctx.input_mut().set_modifiers(Modifiers::CTRL);
        ctx.input_mut().set_key(Key::A, true);
        frame(&mut ctx, &mut text, body);
        ctx.input_mut().set_key(Key::A, false);
        ctx.input_mut().set_modifiers(Modifiers::empty());
        ctx.input_mut().add_text_str("Hello Test");
        frame(&mut ctx, &mut text, body);
        assert_eq!(text, "Hello Te");

        ctx.input_mut().set_key(Key::Enter, true);
        frame(&mut ctx, &mut text, body);
        assert!(ctx.focused_item().is_none());
    }

    #[test]
    fn close_button_clears_open_flag() {
        let mut ctx = new_ctx();
        let mut open = true;
        let draw = |ctx: &mut Context, open: &mut bool| {
            ctx.frame(&Mono, 1.0, |ui| {
                if ui.begin("Closable", Some(open), WindowFlags::empty()) { ui.text("hi"); }
                ui.end();
            });
        };
        draw(&mut ctx, &mut open);
        let at = ctx.find_item("Closable/#CLOSE").map(|i| i.rect.center()).expect("close button");
        ctx.input_mut().set_mouse_pos(at);
        ctx.input_mut().set_mouse_button(MouseButton::Left, true);
        draw(&mut ctx, &mut open);
        ctx.input_mut().set_mouse_button(MouseButton::Left, false);
        draw(&mut ctx, &mut open);
        assert!(!open);
        draw(&mut ctx, &mut open);
        assert!(ctx.find_item("Closable").is_none());
    }

    #[test]
    fn title_bar_press_does_not_jump_the_window() {
        let mut ctx = new_ctx();
        let mut open = true;
        let draw = |ctx: &mut Context, open: &mut bool| {
            ctx.frame(&Mono, 1.0, |ui| {
                if ui.begin("Dragged", Some(open), WindowFlags::empty()) { ui.text("hi"); }
                ui.end();
            });
        };
        ctx.input_mut().set_mouse_pos(Vec2::new(900.0, 700.0));
        draw(&mut ctx, &mut open);
        let before = ctx.find_item("Dragged").map(|i| i.rect.min).expect("window");

        // Arrive and press in one frame, far from the previous cursor.
        ctx.input_mut().set_mouse_pos(before + Vec2::new(30.0, 4.0));
        ctx.input_mut().set_mouse_button(MouseButton::Left, true);
        draw(&mut ctx, &mut open);
        assert_eq!(ctx.find_item("Dragged").map(|i| i.rect.min), Some(before));

        ctx.input_mut().set_mouse_pos(before + Vec2::new(40.0, 9.0));
        draw(&mut ctx, &mut open);
        assert_eq!(ctx.find_item("Dragged").map(|i| i.rect.min), Some(before + Vec2::new(10.0, 5.0)));
        assert!(open);
    }

    #[test]
    fn popups_paint_on_the_overlay_layer() {
        let mut ctx = new_ctx();
        let mut sel = 0usize;
        let body: &Body<usize> = &|ui, v| { ui.combo("Combo", v, &["A", "B"]); };
        frame(&mut ctx, &mut sel, body);
        assert!(ctx.render_frame().layers[1].is_empty());
        click(&mut ctx, &mut sel, body, "W/Combo");
        assert!(!ctx.render_frame().layers[1].is_empty());
    }
}
