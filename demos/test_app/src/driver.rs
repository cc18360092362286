//! Frame driver: interactive window loop or a bounded headless batch.

use imcheck::{
    renderer::{FontAtlas, Renderer},
    soft::SoftRenderer,
    test_engine::{EngineConfig, TestEngine, TestStatus, TestSummary},
    winit::{self as backend, FrameHandler, WindowConfig, WinitError},
    Context, Vec2,
};

use crate::{app::{show_test_window, AppState}, cli::LaunchConfig, scripts::register_tests};

pub const WINDOW_TITLE: &str = "imcheck Test Application";
pub const WINDOW_SIZE:  (u32, u32) = (1280, 720);

/// Application state plus the engine that drives it.
pub struct TestApp {
    pub state:  AppState,
    pub engine: TestEngine<AppState>,
    /// Draw the engine's diagnostic window each frame.
    pub show_engine_window: bool,
}

impl TestApp {
    pub fn new(config: &LaunchConfig) -> Self {
        let mut engine: TestEngine<AppState> = TestEngine::new(EngineConfig {
            setup: Some(AppState::reset),
            ..EngineConfig::default()
        });
        register_tests(&mut engine);
        if config.run_tests { engine.queue_all(); }

        Self {
            state: AppState::default(),
            engine,
            show_engine_window: !config.headless,
        }
    }

    /// One frame: synthetic input, UI, then script checks.
    pub fn frame(&mut self, ctx: &mut Context, font: &dyn FontAtlas) {
        let Self { state, engine, show_engine_window } = self;
        engine.pre_frame(ctx, state);
        ctx.frame(font, 1.0, |ui| {
            show_test_window(ui, state);
            if *show_engine_window { engine.show_engine_window(ui); }
        });
        engine.post_frame(ctx, state);
    }
}

impl FrameHandler for TestApp {
    fn frame(&mut self, ctx: &mut Context, font: &dyn FontAtlas) {
        TestApp::frame(self, ctx, font);
    }

    /// A running script owns the pointer and keyboard.
    fn capture_input(&self) -> bool {
        self.engine.wants_input()
    }

    fn shutdown(&mut self, _ctx: &mut Context) {
        self.engine.stop();
        let s = self.engine.summary();
        log::info!("shutting down: {} passed, {} failed", s.passed, s.failed);
    }
}

/// Open the window and run until it is closed.
pub fn run_interactive(config: &LaunchConfig) -> Result<(), WinitError> {
    let mut ctx = Context::new();
    ctx.set_display_size(Vec2::new(WINDOW_SIZE.0 as f32, WINDOW_SIZE.1 as f32));
    let window = WindowConfig {
        title:   WINDOW_TITLE.to_owned(),
        size:    WINDOW_SIZE,
        visible: true,
    };
    backend::run(window, ctx, TestApp::new(config))
}

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Frames rendered.
    pub frames:  u32,
    /// The frame limit stopped the run before the queue drained.
    pub cut_off: bool,
    pub summary: TestSummary,
    pub results: Vec<(String, TestStatus)>,
}

impl BatchReport {
    pub fn status(&self, name: &str) -> Option<TestStatus> {
        self.results.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }
}

/// Render offscreen until the test queue is empty or `max_frames` is hit.
pub fn run_batch(config: &LaunchConfig) -> anyhow::Result<BatchReport> {
    let mut app = TestApp::new(config);
    let mut renderer = SoftRenderer::new(WINDOW_SIZE.0, WINDOW_SIZE.1)?;
    let mut ctx = Context::new();
    ctx.set_display_size(renderer.display_size());

    let max_frames = config.max_frames.max(1);
    let mut frames = 0;
    while frames < max_frames {
        frames += 1;
        app.frame(&mut ctx, renderer.font());
        renderer.begin_frame();
        renderer.render(ctx.render_frame());
        renderer.end_frame();
        if app.engine.is_queue_empty() { break; }
    }

    let cut_off = !app.engine.is_queue_empty();
    if cut_off {
        log::warn!("headless run stopped at the {max_frames}-frame limit with tests pending");
    }
    log::info!("headless run finished after {frames} frames");

    // Shutdown order: runner, backend, context, then the runner's storage.
    app.engine.stop();
    drop(renderer);
    drop(ctx);
    let report = BatchReport {
        frames,
        cut_off,
        summary: app.engine.summary(),
        results: app.engine.results().map(|r| (r.name.to_owned(), r.status)).collect(),
    };
    drop(app);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_stops_after_one_frame() {
        let report = run_batch(&LaunchConfig { headless: true, ..LaunchConfig::default() })
            .expect("batch");
        assert_eq!(report.frames, 1);
        assert!(!report.cut_off);
        assert_eq!(report.summary.passed + report.summary.failed, 0);
    }

    #[test]
    fn window_input_is_captured_only_while_a_script_runs() {
        let renderer = SoftRenderer::new(WINDOW_SIZE.0, WINDOW_SIZE.1).expect("renderer");
        let mut ctx = Context::new();
        ctx.set_display_size(renderer.display_size());
        let mut app = TestApp::new(&LaunchConfig { run_tests: true, ..LaunchConfig::default() });
        assert!(!app.capture_input());

        app.frame(&mut ctx, renderer.font());
        assert!(app.capture_input());
        app.engine.stop();
        assert!(!app.capture_input());
    }

    #[test]
    fn frame_limit_cuts_the_run_short() {
        let config = LaunchConfig { run_tests: true, headless: true, max_frames: 5 };
        let report = run_batch(&config).expect("batch");
        assert_eq!(report.frames, 5);
        assert!(report.cut_off);
        assert_eq!(report.summary.aborted, 1);
    }
}
