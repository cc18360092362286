//! The runner: queue, per-frame script execution and results.

use std::collections::VecDeque;

use imcheck_core::{
    input::{Key, Modifiers},
    Context, Vec2,
};

use crate::{
    ops::{self, InputOp},
    script::{resolve_path, Step, TestBuilder, TestCase},
    TestError, TestStatus,
};

pub struct EngineConfig<S> {
    /// Frames to keep looking for a referenced item before failing.
    pub item_timeout_frames: u32,
    /// Frames a single test may take in total.
    pub test_timeout_frames: u32,
    /// Runs against the state before every test.
    pub setup: Option<fn(&mut S)>,
}

impl<S> Default for EngineConfig<S> {
    fn default() -> Self {
        Self { item_timeout_frames: 30, test_timeout_frames: 600, setup: None }
    }
}

/// Counts over all registered tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestSummary {
    pub passed:  usize,
    pub failed:  usize,
    pub aborted: usize,
    pub not_run: usize,
}

/// Borrowed view of one test's last outcome.
#[derive(Debug, Clone, Copy)]
pub struct TestResult<'a> {
    pub group:  &'a str,
    pub name:   &'a str,
    pub status: TestStatus,
    pub error:  Option<&'a TestError>,
    pub frames: u32,
}

/// Work derived from one step, resolved against the item registry when it
/// reaches the front.
#[derive(Debug)]
enum Action {
    Click(String),
    Toggle(String, bool),
    Slide(String, f32),
    Ops(Vec<InputOp>),
    Wait(u32),
    Check(usize),
}

enum Progress {
    Continue,
    Done(Result<(), TestError>),
}

/// The test currently executing.
struct Run {
    case:      usize,
    next_step: usize,
    base:      String,
    actions:   VecDeque<Action>,
    ops:       VecDeque<InputOp>,
    wait:      u32,
    searching: u32,
    frames:    u32,
    /// Last synthetic pointer position; the script owns the cursor while it runs.
    cursor:    Option<Vec2>,
}

pub struct TestEngine<S> {
    config:        EngineConfig<S>,
    cases:         Vec<TestCase<S>>,
    queue:         VecDeque<usize>,
    run:           Option<Run>,
    release_input: bool,
}

impl<S> TestEngine<S> {
    pub fn new(config: EngineConfig<S>) -> Self {
        Self {
            config,
            cases: Vec::new(),
            queue: VecDeque::new(),
            run: None,
            release_input: false,
        }
    }

    pub fn config(&self) -> &EngineConfig<S> { &self.config }

    // ── Registration ──────────────────────────────────────────────────────────

    pub fn register(&mut self, group: &str, name: &str) -> TestBuilder<'_, S> {
        if self.find(group, name).is_some() {
            log::warn!("test {group}/{name} registered twice");
        }
        self.cases.push(TestCase::new(group, name));
        let last = self.cases.len() - 1;
        TestBuilder::new(&mut self.cases[last])
    }

    pub fn tests(&self) -> &[TestCase<S>] { &self.cases }

    fn find(&self, group: &str, name: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.group == group && c.name == name)
    }

    // ── Queue ─────────────────────────────────────────────────────────────────

    fn enqueue(&mut self, idx: usize) {
        if self.queue.contains(&idx) { return; }
        self.cases[idx].status = TestStatus::Queued;
        self.queue.push_back(idx);
    }

    pub fn queue_all(&mut self) {
        for idx in 0..self.cases.len() { self.enqueue(idx); }
        log::info!("queued {} test(s)", self.queue.len());
    }

    /// Returns how many tests the group holds.
    pub fn queue_group(&mut self, group: &str) -> usize {
        let idxs: Vec<usize> = (0..self.cases.len()).filter(|&i| self.cases[i].group == group).collect();
        for &idx in &idxs { self.enqueue(idx); }
        idxs.len()
    }

    pub fn queue_test(&mut self, group: &str, name: &str) -> bool {
        match self.find(group, name) {
            Some(idx) => { self.enqueue(idx); true }
            None => {
                log::warn!("no test named {group}/{name}");
                false
            }
        }
    }

    /// Nothing queued and nothing running.
    pub fn is_queue_empty(&self) -> bool { self.queue.is_empty() && self.run.is_none() }

    pub fn is_running(&self) -> bool { self.run.is_some() }

    /// Live input must not reach the context while this is true.
    pub fn wants_input(&self) -> bool { self.is_running() }

    /// Drop the queue and abort the running test.
    pub fn stop(&mut self) {
        for idx in self.queue.drain(..) {
            self.cases[idx].status = TestStatus::NotRun;
        }
        if let Some(run) = self.run.take() {
            let case = &mut self.cases[run.case];
            case.status = TestStatus::Aborted;
            case.frames = run.frames;
            log::info!("test {}: aborted", case.full_name());
            self.release_input = true;
        }
    }

    // ── Results ───────────────────────────────────────────────────────────────

    pub fn results(&self) -> impl Iterator<Item = TestResult<'_>> {
        self.cases.iter().map(|c| TestResult {
            group:  &c.group,
            name:   &c.name,
            status: c.status,
            error:  c.error.as_ref(),
            frames: c.frames,
        })
    }

    pub fn summary(&self) -> TestSummary {
        self.cases.iter().fold(TestSummary::default(), |mut s, c| {
            match c.status {
                TestStatus::Passed  => s.passed  += 1,
                TestStatus::Failed  => s.failed  += 1,
                TestStatus::Aborted => s.aborted += 1,
                _                   => s.not_run += 1,
            }
            s
        })
    }

    // ── Per-frame hooks ───────────────────────────────────────────────────────

    /// Call before building the frame: starts the next queued test and writes
    /// at most one synthetic input op into `ctx`.
    pub fn pre_frame(&mut self, ctx: &mut Context, state: &mut S) {
        if std::mem::take(&mut self.release_input) {
            ctx.input_mut().release_all();
        }
        if self.run.is_none() {
            self.start_next(ctx, state);
        }
        let Some(run) = self.run.as_mut() else { return };
        run.frames += 1;
        if let Some(at) = run.cursor {
            ctx.input_mut().set_mouse_pos(at);
        }
        if let Some(op) = run.ops.pop_front() {
            log::trace!("frame {}: {:?}", run.frames, op);
            if let InputOp::MouseMove(at) = &op { run.cursor = Some(*at); }
            op.apply(ctx);
        }
    }

    /// Call after the frame: advances the running script against the item
    /// registry and the state the frame left behind.
    pub fn post_frame(&mut self, ctx: &mut Context, state: &mut S) {
        let Some(mut run) = self.run.take() else { return };
        match self.advance(&mut run, ctx, state) {
            Progress::Continue     => self.run = Some(run),
            Progress::Done(result) => self.finish(run, result),
        }
    }

    fn start_next(&mut self, ctx: &mut Context, state: &mut S) {
        let Some(idx) = self.queue.pop_front() else { return };
        if let Some(setup) = self.config.setup { setup(state); }
        ctx.close_popups();
        ctx.input_mut().release_all();

        let case = &mut self.cases[idx];
        case.status = TestStatus::Running;
        case.error  = None;
        log::info!("test {}: start", case.full_name());

        self.run = Some(Run {
            case:      idx,
            next_step: 0,
            base:      String::new(),
            actions:   VecDeque::new(),
            ops:       VecDeque::new(),
            wait:      0,
            searching: 0,
            frames:    0,
            cursor:    None,
        });
    }

    fn finish(&mut self, run: Run, result: Result<(), TestError>) {
        let case = &mut self.cases[run.case];
        case.frames = run.frames;
        match result {
            Ok(()) => {
                case.status = TestStatus::Passed;
                log::info!("test {}: passed in {} frames", case.full_name(), run.frames);
            }
            Err(e) => {
                log::error!("test {}: {e}", case.full_name());
                case.status = TestStatus::Failed;
                case.error  = Some(e);
            }
        }
        self.release_input = true;

        if self.queue.is_empty() {
            let s = self.summary();
            log::info!("tests finished: {} passed, {} failed", s.passed, s.failed);
        }
    }

    fn advance(&self, run: &mut Run, ctx: &Context, state: &S) -> Progress {
        let case = &self.cases[run.case];
        if run.frames > self.config.test_timeout_frames {
            return Progress::Done(Err(TestError::Timeout { frames: run.frames }));
        }
        if !run.ops.is_empty() { return Progress::Continue; }
        if run.wait > 0 {
            run.wait -= 1;
            return Progress::Continue;
        }

        loop {
            let Some(action) = run.actions.pop_front() else {
                let Some(step) = case.steps.get(run.next_step) else {
                    return Progress::Done(Ok(()));
                };
                log::debug!("{}: step {} {:?}", case.full_name(), run.next_step, step);
                let index = run.next_step;
                run.next_step += 1;
                expand(run, step, index);
                continue;
            };

            match action {
                Action::Check(i) => {
                    let Some(Step::Check(description, f)) = case.steps.get(i) else { continue };
                    if let Err(reason) = f(state) {
                        return Progress::Done(Err(TestError::CheckFailed {
                            description: description.clone(),
                            reason,
                        }));
                    }
                    log::debug!("{}: check '{description}' ok", case.full_name());
                }
                Action::Wait(n) => {
                    if n > 0 {
                        run.wait = n - 1;
                        return Progress::Continue;
                    }
                }
                Action::Ops(ops) => {
                    run.ops.extend(ops);
                    return Progress::Continue;
                }
                Action::Click(ref path) | Action::Toggle(ref path, _) | Action::Slide(ref path, _) => {
                    let Some(item) = ctx.find_item(path).filter(|i| i.is_visible()) else {
                        run.searching += 1;
                        if run.searching >= self.config.item_timeout_frames {
                            return Progress::Done(Err(TestError::ItemNotFound {
                                path:   path.clone(),
                                frames: run.searching,
                            }));
                        }
                        run.actions.push_front(action);
                        return Progress::Continue;
                    };
                    run.searching = 0;
                    let rect = item.rect;
                    let target = match action {
                        Action::Toggle(_, want) if item.is_checked() == want => None,
                        Action::Slide(_, t) => Some(Vec2::new(rect.min.x + rect.width() * t, rect.center().y)),
                        _ => Some(rect.center()),
                    };
                    if let Some(at) = target {
                        run.ops.extend(ops::click(at));
                        return Progress::Continue;
                    }
                }
            }
        }
    }
}

/// Turn a script step into queued actions.
fn expand<S>(run: &mut Run, step: &Step<S>, index: usize) {
    if let Step::SetRef(p) = step {
        run.base = p.trim_matches('/').to_owned();
        return;
    }
    let base = run.base.as_str();
    let path = |p: &str| resolve_path(base, p);
    let actions: Vec<Action> = match step {
        Step::SetRef(_)      => Vec::new(),
        Step::ItemClick(p)   => vec![Action::Click(path(p))],
        Step::ItemCheck(p)   => vec![Action::Toggle(path(p), true)],
        Step::ItemUncheck(p) => vec![Action::Toggle(path(p), false)],
        Step::SliderSet(p, t) => vec![Action::Slide(path(p), *t)],
        Step::ItemInputValue(p, text) => {
            let mut typing = Vec::new();
            typing.extend(ops::key_press(Key::A, Modifiers::CTRL));
            typing.push(InputOp::Text(text.clone()));
            typing.extend(ops::key_press(Key::Enter, Modifiers::empty()));
            vec![Action::Click(path(p)), Action::Ops(typing)]
        }
        Step::MenuClick(p) => {
            let levels: Vec<&str> = p.split('/').filter(|s| !s.is_empty()).collect();
            (1..=levels.len()).map(|n| Action::Click(path(&levels[..n].join("/")))).collect()
        }
        Step::Yield(n)     => vec![Action::Wait(*n)],
        Step::Check(..)    => vec![Action::Check(index)],
    };
    run.actions.extend(actions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_eq;
    use imcheck_core::{
        draw_list::TextureId,
        renderer::{FontAtlas, GlyphInfo},
        ui::Ui,
        WindowFlags,
    };

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

    #[derive(Default)]
    struct Panel {
        on:     bool,
        clicks: u32,
        level:  f32,
        name:   String,
    }

    fn panel(ui: &mut Ui<'_>, s: &mut Panel) {
        ui.set_next_window_size(Vec2::new(400.0, 300.0));
        if ui.begin("Panel", None, WindowFlags::empty()) {
            ui.checkbox("Enabled", &mut s.on);
            if ui.button("Bump") { s.clicks += 1; }
            ui.slider_float("Level", &mut s.level, 0.0, 1.0);
            ui.input_text("Name", &mut s.name);
        }
        ui.end();
    }

    /// Runs frames until the queue drains; returns the frame count.
    fn drive(engine: &mut TestEngine<Panel>, state: &mut Panel, max: u32) -> u32 {
        let mut ctx = Context::new();
        ctx.set_display_size(Vec2::new(800.0, 600.0));
        for n in 1..=max {
            engine.pre_frame(&mut ctx, state);
            ctx.frame(&Mono, 1.0, |ui| panel(ui, state));
            engine.post_frame(&mut ctx, state);
            if engine.is_queue_empty() { return n; }
        }
        max
    }

    fn status(engine: &TestEngine<Panel>, name: &str) -> TestStatus {
        engine.results().find(|r| r.name == name).map_or(TestStatus::NotRun, |r| r.status)
    }

    #[test]
    fn clicks_toggle_and_type_through_the_registry() {
        let mut engine = TestEngine::new(EngineConfig::default());
        engine.register("T", "widgets")
            .set_ref("Panel")
            .item_click("Enabled")
            .check("on", |s: &Panel| check_eq(s.on, true))
            .item_check("Enabled")
            .check("still on", |s: &Panel| check_eq(s.on, true))
            .item_click("Bump")
            .item_click("Bump")
            .check("two clicks", |s: &Panel| check_eq(s.clicks, 2))
            .slider_set("Level", 0.25)
            .check("level", |s: &Panel| crate::check_approx(s.level, 0.25, 0.01))
            .item_input_value("Name", "Ada")
            .check("name", |s: &Panel| check_eq(s.name.as_str(), "Ada"));
        engine.queue_all();

        let mut state = Panel { name: "old".into(), ..Panel::default() };
        drive(&mut engine, &mut state, 200);
        let r = engine.results().next().map(|r| (r.status, r.error.cloned()));
        assert_eq!(r, Some((TestStatus::Passed, None)));
    }

    #[test]
    fn missing_item_fails_after_the_timeout() {
        let config = EngineConfig { item_timeout_frames: 5, ..EngineConfig::default() };
        let mut engine = TestEngine::new(config);
        engine.register("T", "ghost").item_click("Panel/Nope");
        engine.register("T", "after").check("runs", |_| Ok(()));
        engine.queue_all();

        let frames = drive(&mut engine, &mut Panel::default(), 100);
        assert!(frames < 20);
        assert_eq!(status(&engine, "ghost"), TestStatus::Failed);
        assert_eq!(status(&engine, "after"), TestStatus::Passed);
        let err = engine.results().find_map(|r| r.error.cloned());
        assert_eq!(err, Some(TestError::ItemNotFound { path: "Panel/Nope".into(), frames: 5 }));
    }

    #[test]
    fn failed_check_stops_the_script() {
        let mut engine = TestEngine::new(EngineConfig::default());
        engine.register("T", "wrong")
            .check("off", |s: &Panel| check_eq(s.on, true))
            .item_click("Panel/Bump");
        engine.queue_all();

        let mut state = Panel::default();
        drive(&mut engine, &mut state, 50);
        assert_eq!(status(&engine, "wrong"), TestStatus::Failed);
        assert_eq!(state.clicks, 0);
        assert_eq!(engine.summary(), TestSummary { failed: 1, ..TestSummary::default() });
    }

    #[test]
    fn setup_runs_before_each_test() {
        fn reset(s: &mut Panel) { *s = Panel::default(); }
        let config = EngineConfig { setup: Some(reset), ..EngineConfig::default() };
        let mut engine = TestEngine::new(config);
        for name in ["first", "second"] {
            engine.register("T", name)
                .item_click("Panel/Bump")
                .check("one click", |s: &Panel| check_eq(s.clicks, 1));
        }
        engine.queue_group("T");

        drive(&mut engine, &mut Panel::default(), 100);
        assert_eq!(engine.summary().passed, 2);
    }

    #[test]
    fn yield_waits_whole_frames() {
        let mut engine = TestEngine::new(EngineConfig::default());
        engine.register("T", "idle").yield_frames(10);
        engine.queue_test("T", "idle");
        let frames = drive(&mut engine, &mut Panel::default(), 100);
        assert_eq!(frames, 11);
    }

    #[test]
    fn stop_aborts_and_unqueues() {
        let mut engine = TestEngine::new(EngineConfig::default());
        engine.register("T", "long").yield_frames(100);
        engine.register("T", "next").check("never", |_| Ok(()));
        engine.queue_all();

        let mut ctx = Context::new();
        let mut state = Panel::default();
        engine.pre_frame(&mut ctx, &mut state);
        assert!(engine.is_running());
        engine.stop();

        assert!(engine.is_queue_empty());
        assert_eq!(status(&engine, "long"), TestStatus::Aborted);
        assert_eq!(status(&engine, "next"), TestStatus::NotRun);
        assert!(!engine.queue_test("T", "missing"));
    }

    #[test]
    fn stray_pointer_moves_do_not_redirect_clicks() {
        let mut engine = TestEngine::new(EngineConfig::default());
        engine.register("T", "bump twice")
            .set_ref("Panel")
            .item_click("Bump")
            .item_click("Bump")
            .check("two clicks", |s: &Panel| check_eq(s.clicks, 2));
        engine.queue_all();
        assert!(!engine.wants_input());

        let mut ctx = Context::new();
        ctx.set_display_size(Vec2::new(800.0, 600.0));
        let mut state = Panel::default();
        for _ in 0..100 {
            // A user's mouse lands between every scripted frame.
            ctx.input_mut().set_mouse_pos(Vec2::new(790.0, 590.0));
            engine.pre_frame(&mut ctx, &mut state);
            ctx.frame(&Mono, 1.0, |ui| panel(ui, &mut state));
            engine.post_frame(&mut ctx, &mut state);
            if engine.is_queue_empty() { break; }
            assert!(engine.wants_input());
        }
        assert_eq!(status(&engine, "bump twice"), TestStatus::Passed);
        assert_eq!(state.clicks, 2);
        assert!(!engine.wants_input());
    }
}
