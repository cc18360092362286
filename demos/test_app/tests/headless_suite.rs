//! Runs the registered UI scripts headlessly through the frame driver.

use imcheck::{
    soft::SoftRenderer,
    test_engine::{EngineConfig, TestEngine, TestStatus},
    Context, Vec2,
};
use proptest::prelude::*;
use test_app::{run_batch, scripts::register_tests, show_test_window, AppState, LaunchConfig, TestApp};

fn batch(max_frames: u32) -> LaunchConfig {
    LaunchConfig { run_tests: true, headless: true, max_frames }
}

#[test]
fn every_script_passes_within_the_default_frame_limit() {
    let report = run_batch(&batch(100)).expect("headless backend");
    assert!(!report.cut_off, "ran out of frames: {report:?}");
    for (name, status) in &report.results {
        assert_eq!(*status, TestStatus::Passed, "{name}");
    }
    assert_eq!(report.summary.passed, 8);
}

#[test]
fn a_failing_script_does_not_stop_the_rest() {
    let mut app = TestApp::new(&batch(1));
    app.engine.register("Extra", "Missing widget")
        .set_ref("Test Window")
        .item_click("No Such Button");
    app.engine.queue_test("Extra", "Missing widget");

    let renderer = SoftRenderer::new(1280, 720).expect("renderer");
    let mut ctx = Context::new();
    ctx.set_display_size(Vec2::new(1280.0, 720.0));
    for _ in 0..300 {
        app.frame(&mut ctx, renderer.font());
        if app.engine.is_queue_empty() { break; }
    }

    let summary = app.engine.summary();
    assert_eq!(summary.passed, 8);
    assert_eq!(summary.failed, 1);
}

#[test]
fn single_script_leaves_state_as_checked() {
    let mut engine: TestEngine<AppState> =
        TestEngine::new(EngineConfig { setup: Some(AppState::reset), ..EngineConfig::default() });
    register_tests(&mut engine);
    engine.queue_test("Demo", "List");

    let renderer = SoftRenderer::new(1280, 720).expect("renderer");
    let mut ctx = Context::new();
    ctx.set_display_size(Vec2::new(1280.0, 720.0));
    let mut state = AppState::default();
    while !engine.is_queue_empty() {
        engine.pre_frame(&mut ctx, &mut state);
        ctx.frame(renderer.font(), 1.0, |ui| show_test_window(ui, &mut state));
        engine.post_frame(&mut ctx, &mut state);
    }
    assert_eq!(state.selected_item, 1);
    assert_eq!(state.selected_label(), Some("Item 2"));
}

// ─── Properties ──────────────────────────────────────────────────────────────

prop_compose! {
    fn any_state()(
        text in "[ -~]{0,255}",
        checkbox_value in any::<bool>(),
        slider_value in 0.0f32..=1.0,
        combo_selection in 0usize..3,
        selected_item in -1i32..3,
        show_demo_window in any::<bool>(),
    ) -> AppState {
        AppState {
            text_input: text,
            checkbox_value,
            slider_value,
            combo_selection,
            selected_item,
            show_demo_window,
            ..AppState::default()
        }
    }
}

proptest! {
    #[test]
    fn reset_always_restores_defaults(mut state in any_state()) {
        let demo = state.show_demo_window;
        state.reset();
        prop_assert_eq!(state, AppState { show_demo_window: demo, ..AppState::default() });
    }

    #[test]
    fn clicks_keep_selection_in_range(rows in proptest::collection::vec(0usize..3, 1..4)) {
        let renderer = SoftRenderer::new(1280, 720).expect("renderer");
        let mut ctx = Context::new();
        ctx.set_display_size(Vec2::new(1280.0, 720.0));
        let mut state = AppState::default();
        let frame = |ctx: &mut Context, state: &mut AppState| {
            ctx.frame(renderer.font(), 1.0, |ui| show_test_window(ui, state));
        };
        frame(&mut ctx, &mut state);

        for row in &rows {
            let path = format!("Test Window/##listbox/Item {}", row + 1);
            let at = ctx.find_item(&path).map(|i| i.rect.center());
            prop_assert!(at.is_some(), "{} not found", path);
            ctx.input_mut().set_mouse_pos(at.unwrap_or(Vec2::ZERO));
            frame(&mut ctx, &mut state);
            ctx.input_mut().set_mouse_button(imcheck::MouseButton::Left, true);
            frame(&mut ctx, &mut state);
            ctx.input_mut().set_mouse_button(imcheck::MouseButton::Left, false);
            frame(&mut ctx, &mut state);

            prop_assert!((-1..state.items.len() as i32).contains(&state.selected_item));
            prop_assert_eq!(state.selected_item, *row as i32);
        }
    }
}
