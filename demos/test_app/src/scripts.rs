//! The scripted UI tests run against [`show_test_window`](crate::show_test_window).

use imcheck::test_engine::{check_approx, check_eq, TestEngine};

use crate::app::AppState;

pub const GROUP: &str = "Demo";

pub fn register_tests(engine: &mut TestEngine<AppState>) {
    engine.register(GROUP, "Basic Input")
        .set_ref("Test Window")
        .item_input_value("Text Input", "Hello Test")
        .check("text_input == \"Hello Test\"", |s| check_eq(s.text_input.as_str(), "Hello Test"));

    engine.register(GROUP, "Checkbox")
        .set_ref("Test Window")
        .item_click("Test Checkbox")
        .check("checkbox on", |s| check_eq(s.checkbox_value, true))
        .item_click("Test Checkbox")
        .check("checkbox off", |s| check_eq(s.checkbox_value, false));

    // Dirty the slider first so Reset has something to undo.
    engine.register(GROUP, "Button")
        .set_ref("Test Window")
        .slider_set("Slider", 0.9)
        .check("slider moved", |s| check_approx(s.slider_value, 0.9, 0.02))
        .item_click("Reset")
        .check("slider restored", |s| check_eq(s.slider_value, 0.5));

    engine.register(GROUP, "Combo")
        .set_ref("Test Window")
        .item_click("Combo")
        .item_click("Combo/Option 2")
        .check("combo_selection == 1", |s| check_eq(s.combo_selection, 1));

    engine.register(GROUP, "List")
        .set_ref("Test Window")
        .item_click("##listbox/Item 2")
        .check("selected_item == 1", |s| check_eq(s.selected_item, 1));

    engine.register(GROUP, "Menu")
        .set_ref("Test Window")
        .item_check("Test Checkbox")
        .check("checkbox on", |s| check_eq(s.checkbox_value, true))
        .menu_click("File/Reset")
        .check("checkbox reset", |s| check_eq(s.checkbox_value, false));

    engine.register(GROUP, "Slider")
        .set_ref("Test Window")
        .slider_set("Slider", 0.25)
        .check("slider ~ 0.25", |s| check_approx(s.slider_value, 0.25, 0.02));

    engine.register(GROUP, "Demo Window")
        .set_ref("Test Window")
        .menu_click("View/Demo Window")
        .check("demo window shown", |s| check_eq(s.show_demo_window, true))
        .item_click("/Widget Demo/#CLOSE")
        .check("demo window closed", |s| check_eq(s.show_demo_window, false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use imcheck::test_engine::EngineConfig;

    #[test]
    fn all_scripts_register_under_one_group() {
        let mut engine = TestEngine::new(EngineConfig::default());
        register_tests(&mut engine);
        let names: Vec<&str> = engine.tests().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["Basic Input", "Checkbox", "Button", "Combo", "List", "Menu", "Slider", "Demo Window"]
        );
        assert_eq!(engine.queue_group(GROUP), 8);
    }
}
