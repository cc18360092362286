//! Application state and the "Test Window" that edits it.

use imcheck::{ui::Ui, Vec2, WindowFlags};

/// Byte capacity of the text field.
pub const TEXT_INPUT_CAPACITY: usize = 255;

pub const COMBO_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

const WINDOW_POS:  Vec2 = Vec2::new(60.0, 60.0);
const WINDOW_SIZE: Vec2 = Vec2::new(420.0, 520.0);

/// Values bound to the widgets in [`show_test_window`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub text_input:       String,
    pub checkbox_value:   bool,
    /// Always within `[0, 1]`.
    pub slider_value:     f32,
    /// Index into [`COMBO_OPTIONS`].
    pub combo_selection:  usize,
    /// Index into `items`, or -1 for none.
    pub selected_item:    i32,
    pub items:            Vec<String>,
    pub show_demo_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            text_input:       String::new(),
            checkbox_value:   false,
            slider_value:     0.5,
            combo_selection:  0,
            selected_item:    -1,
            items:            ["Item 1", "Item 2", "Item 3"].map(String::from).to_vec(),
            show_demo_window: false,
        }
    }
}

impl AppState {
    /// Restore the widget values. `items` and `show_demo_window` are kept.
    pub fn reset(&mut self) {
        self.text_input.clear();
        self.checkbox_value  = false;
        self.slider_value    = 0.5;
        self.combo_selection = 0;
        self.selected_item   = -1;
    }

    pub fn selected_label(&self) -> Option<&str> {
        usize::try_from(self.selected_item).ok()
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    pub fn combo_label(&self) -> &str {
        COMBO_OPTIONS.get(self.combo_selection).copied().unwrap_or(COMBO_OPTIONS[0])
    }
}

/// Draw the test window for one frame and apply whatever the user did.
pub fn show_test_window(ui: &mut Ui<'_>, state: &mut AppState) {
    ui.set_next_window_pos(WINDOW_POS);
    ui.set_next_window_size(WINDOW_SIZE);
    if ui.begin("Test Window", None, WindowFlags::MENU_BAR) {
        menu_bar(ui, state);

        ui.separator_text("Input Widgets");
        ui.input_text_with_capacity("Text Input", &mut state.text_input, TEXT_INPUT_CAPACITY);
        ui.checkbox("Test Checkbox", &mut state.checkbox_value);
        ui.slider_float("Slider", &mut state.slider_value, 0.0, 1.0);
        ui.combo("Combo", &mut state.combo_selection, &COMBO_OPTIONS);

        ui.separator_text("List Box");
        if ui.begin_list_box("##listbox", Vec2::ZERO) {
            let mut clicked = None;
            for (i, item) in state.items.iter().enumerate() {
                if ui.selectable(item, state.selected_item == i as i32) {
                    clicked = Some(i as i32);
                }
            }
            ui.end_list_box();
            if let Some(i) = clicked { state.selected_item = i; }
        }

        ui.separator_text("Actions");
        if ui.button("Reset") { state.reset(); }
        ui.same_line(-1.0);
        // Placeholder action.
        ui.button("Test Button");

        ui.separator_text("Status");
        ui.text(&format!("Checkbox: {}", state.checkbox_value));
        ui.text(&format!("Slider: {:.2}", state.slider_value));
        ui.text(&format!("Selected: {}", state.selected_item));
    }
    ui.end();

    if state.show_demo_window {
        ui.show_demo_window(&mut state.show_demo_window);
    }
}

fn menu_bar(ui: &mut Ui<'_>, state: &mut AppState) {
    if !ui.begin_menu_bar() { return; }
    if ui.begin_menu("File") {
        if ui.menu_item("Reset") { state.reset(); }
        // Exit is inert: the window's close button ends the app.
        ui.menu_item("Exit");
        ui.end_menu();
    }
    if ui.begin_menu("View") {
        ui.menu_item_toggle("Demo Window", &mut state.show_demo_window);
        ui.end_menu();
    }
    ui.end_menu_bar();
}

#[cfg(test)]
mod tests {
    use super::*;
    use imcheck::{soft::SoftRenderer, Context, ItemKind};

    #[test]
    fn reset_keeps_items_and_demo_flag() {
        let mut s = AppState {
            text_input: "abc".into(),
            checkbox_value: true,
            slider_value: 0.1,
            combo_selection: 2,
            selected_item: 1,
            show_demo_window: true,
            ..AppState::default()
        };
        s.reset();
        assert_eq!(s, AppState { show_demo_window: true, ..AppState::default() });
    }

    #[test]
    fn labels_follow_the_indices() {
        let mut s = AppState::default();
        assert_eq!(s.selected_label(), None);
        assert_eq!(s.combo_label(), "Option 1");
        s.selected_item = 2;
        s.combo_selection = 1;
        assert_eq!(s.selected_label(), Some("Item 3"));
        assert_eq!(s.combo_label(), "Option 2");
    }

    #[test]
    fn every_scripted_widget_is_registered() {
        let renderer = SoftRenderer::new(1280, 720).expect("renderer");
        let mut ctx = Context::new();
        ctx.set_display_size(Vec2::new(1280.0, 720.0));
        let mut state = AppState::default();
        ctx.frame(renderer.font(), 1.0, |ui| show_test_window(ui, &mut state));

        for path in [
            "Test Window/File",
            "Test Window/View",
            "Test Window/Text Input",
            "Test Window/Test Checkbox",
            "Test Window/Slider",
            "Test Window/Combo",
            "Test Window/##listbox/Item 2",
            "Test Window/Reset",
            "Test Window/Test Button",
        ] {
            let item = ctx.find_item(path);
            assert!(item.is_some_and(|i| i.is_visible()), "{path} missing or hidden");
        }
        assert_eq!(ctx.find_item("Test Window/Slider").map(|i| i.kind), Some(ItemKind::Slider));
    }
}
