//! Built-in demo window exercising every widget.

use crate::{style::StyleColor, ui::Ui, Color, Vec2, WindowFlags};

const COMBO_ITEMS: [&str; 4] = ["Apple", "Banana", "Cherry", "Kiwi"];
const LIST_ITEMS:  [&str; 6] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta"];

/// Values owned by the demo window between frames.
#[derive(Debug, Clone)]
pub struct DemoState {
    clicks:   u32,
    check:    bool,
    slider:   f32,
    drag:     f32,
    count:    i32,
    text:     String,
    combo:    usize,
    list:     usize,
    progress: f32,
    show_frame: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            clicks:   0,
            check:    true,
            slider:   0.5,
            drag:     1.0,
            count:    3,
            text:     String::from("edit me"),
            combo:    0,
            list:     0,
            progress: 0.0,
            show_frame: true,
        }
    }
}

pub fn show_demo_window(ui: &mut Ui<'_>, open: &mut bool) {
    if !*open { return; }

    let mut st = std::mem::take(&mut ui.ctx.demo);
    ui.set_next_window_pos(Vec2::new(500.0, 60.0));
    ui.set_next_window_size(Vec2::new(360.0, 440.0));
    if ui.begin("Widget Demo", Some(open), WindowFlags::MENU_BAR) {
        contents(ui, &mut st);
    }
    ui.end();
    ui.ctx.demo = st;
}

fn contents(ui: &mut Ui<'_>, st: &mut DemoState) {
    if ui.begin_menu_bar() {
        if ui.begin_menu("Options") {
            ui.menu_item_toggle("Frame counter", &mut st.show_frame);
            if ui.menu_item("Reset values") { *st = DemoState::default(); }
            ui.end_menu();
        }
        ui.end_menu_bar();
    }

    ui.text_wrapped("Every widget the engine offers, each registered under this window's scope.");
    ui.separator();

    if ui.collapsing_header("Basic") {
        if ui.button("Click me") { st.clicks += 1; }
        ui.same_line(-1.0);
        ui.text(&format!("clicked {} times", st.clicks));

        let warn = ui.push_style_color(StyleColor::Button, Color::from_hex(0xb53a1e));
        if ui.small_button("Zero") { st.clicks = 0; }
        ui.pop_style_color(warn);

        ui.checkbox("Checkbox", &mut st.check);
        ui.input_text("Input", &mut st.text);
        ui.combo("Fruit", &mut st.combo, &COMBO_ITEMS);
    }

    if ui.collapsing_header("Sliders") {
        ui.slider_float("Float", &mut st.slider, 0.0, 1.0);
        ui.slider_int("Int", &mut st.count, 0, 10);
        ui.drag_float("Drag", &mut st.drag, 0.01, 0.0, 0.0);
        st.progress = (st.progress + 0.005) % 1.0;
        ui.progress_bar(st.progress, Vec2::ZERO, None);
    }

    if ui.collapsing_header("Lists") {
        if ui.begin_list_box("##demo_list", Vec2::ZERO) {
            for (i, item) in LIST_ITEMS.iter().enumerate() {
                if ui.selectable(item, st.list == i) { st.list = i; }
            }
            ui.end_list_box();
        }
    }

    if ui.begin_tab_bar("DemoTabs") {
        if ui.tab_item("About") {
            ui.text("imcheck immediate-mode engine");
            if st.show_frame {
                ui.text_disabled(&format!("frame {}", ui.frame_count()));
            }
        }
        if ui.tab_item("Style") {
            ui.separator_text("Spacing");
            let sp = ui.style().item_spacing;
            ui.text(&format!("item spacing: {:.0} x {:.0}", sp.0, sp.1));
        }
        ui.end_tab_bar();
    }
}
