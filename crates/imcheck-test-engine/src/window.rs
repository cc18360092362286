//! Diagnostic window listing registered tests and their last outcome.

use imcheck_core::{ui::Ui, Color, Vec2, WindowFlags};

use crate::{TestEngine, TestStatus};

const WINDOW_POS:  Vec2 = Vec2::new(880.0, 60.0);
const WINDOW_SIZE: Vec2 = Vec2::new(360.0, 400.0);

fn status_color(status: TestStatus) -> Color {
    match status {
        TestStatus::Passed  => Color::from_hex(0x5fbf5f),
        TestStatus::Failed  => Color::from_hex(0xe0503c),
        TestStatus::Running => Color::YELLOW,
        TestStatus::Aborted => Color::from_hex(0xd09030),
        TestStatus::Queued | TestStatus::NotRun => Color::from_hex(0x9a9a9a),
    }
}

impl<S> TestEngine<S> {
    /// Draw the "Test Engine" window: run controls plus one line per test.
    pub fn show_engine_window(&mut self, ui: &mut Ui<'_>) {
        ui.set_next_window_pos(WINDOW_POS);
        ui.set_next_window_size(WINDOW_SIZE);
        if ui.begin("Test Engine", None, WindowFlags::empty()) {
            let s = self.summary();
            ui.text(&format!(
                "{} tests: {} passed, {} failed",
                self.tests().len(), s.passed, s.failed
            ));
            if ui.button("Run All") { self.queue_all(); }
            ui.same_line(-1.0);
            if ui.button("Stop") { self.stop(); }

            ui.separator_text("Tests");
            let mut rerun = None;
            for r in self.results() {
                ui.text_colored(status_color(r.status), &format!("[{}]", r.status.as_str()));
                ui.same_line(-1.0);
                if ui.small_button(&format!("{}: {}", r.group, r.name)) {
                    rerun = Some((r.group.to_owned(), r.name.to_owned()));
                }
                if let Some(err) = r.error {
                    ui.text_disabled(&err.to_string());
                }
            }
            if let Some((group, name)) = rerun {
                self.queue_test(&group, &name);
            }
        }
        ui.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineConfig;
    use imcheck_core::{
        draw_list::TextureId,
        renderer::{FontAtlas, GlyphInfo},
        Context,
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

    #[test]
    fn each_test_gets_a_rerun_button() {
        let mut engine = TestEngine::<()>::new(EngineConfig::default());
        engine.register("Demo", "One").yield_frames(1);
        engine.register("Demo", "Two").yield_frames(1);

        let mut ctx = Context::new();
        ctx.set_display_size(Vec2::new(1280.0, 720.0));
        ctx.frame(&Mono, 1.0, |ui| engine.show_engine_window(ui));

        assert!(ctx.find_item("Test Engine/Run All").is_some());
        assert!(ctx.find_item("Test Engine/Demo: Two").is_some_and(|i| i.is_visible()));
    }
}
