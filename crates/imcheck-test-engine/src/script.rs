//! Test scripts and the chained builder used to register them.

use std::fmt;

use crate::{CheckResult, TestError, TestStatus};

pub type CheckFn<S> = Box<dyn Fn(&S) -> CheckResult>;

/// One scripted interaction. Paths are relative to the last [`Step::SetRef`]
/// unless they start with `/`.
pub enum Step<S> {
    SetRef(String),
    ItemClick(String),
    /// Focus a text field, select all, type the text, press Enter.
    ItemInputValue(String, String),
    /// Click each `/`-separated level: `"File/Reset"` opens File, then clicks Reset.
    MenuClick(String),
    ItemCheck(String),
    ItemUncheck(String),
    /// Drag a slider to a fraction of its track.
    SliderSet(String, f32),
    Yield(u32),
    Check(String, CheckFn<S>),
}

impl<S> fmt::Debug for Step<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetRef(p)              => write!(f, "SetRef({p:?})"),
            Self::ItemClick(p)           => write!(f, "ItemClick({p:?})"),
            Self::ItemInputValue(p, v)   => write!(f, "ItemInputValue({p:?}, {v:?})"),
            Self::MenuClick(p)           => write!(f, "MenuClick({p:?})"),
            Self::ItemCheck(p)           => write!(f, "ItemCheck({p:?})"),
            Self::ItemUncheck(p)         => write!(f, "ItemUncheck({p:?})"),
            Self::SliderSet(p, t)        => write!(f, "SliderSet({p:?}, {t})"),
            Self::Yield(n)               => write!(f, "Yield({n})"),
            Self::Check(d, _)            => write!(f, "Check({d:?})"),
        }
    }
}

/// A registered test and the outcome of its last run.
pub struct TestCase<S> {
    pub group:  String,
    pub name:   String,
    pub steps:  Vec<Step<S>>,
    pub status: TestStatus,
    pub error:  Option<TestError>,
    /// Frames the last run took.
    pub frames: u32,
}

impl<S> TestCase<S> {
    pub fn new(group: &str, name: &str) -> Self {
        Self {
            group:  group.to_owned(),
            name:   name.to_owned(),
            steps:  Vec::new(),
            status: TestStatus::NotRun,
            error:  None,
            frames: 0,
        }
    }

    pub fn full_name(&self) -> String { format!("{}/{}", self.group, self.name) }
}

/// Appends steps to a freshly registered [`TestCase`].
pub struct TestBuilder<'a, S> {
    case: &'a mut TestCase<S>,
}

impl<'a, S> TestBuilder<'a, S> {
    pub(crate) fn new(case: &'a mut TestCase<S>) -> Self { Self { case } }

    pub fn step(self, step: Step<S>) -> Self {
        self.case.steps.push(step);
        self
    }

    pub fn set_ref(self, path: &str) -> Self { self.step(Step::SetRef(path.to_owned())) }

    pub fn item_click(self, path: &str) -> Self { self.step(Step::ItemClick(path.to_owned())) }

    pub fn item_input_value(self, path: &str, text: &str) -> Self {
        self.step(Step::ItemInputValue(path.to_owned(), text.to_owned()))
    }

    pub fn menu_click(self, path: &str) -> Self { self.step(Step::MenuClick(path.to_owned())) }

    pub fn item_check(self, path: &str) -> Self { self.step(Step::ItemCheck(path.to_owned())) }

    pub fn item_uncheck(self, path: &str) -> Self { self.step(Step::ItemUncheck(path.to_owned())) }

    pub fn slider_set(self, path: &str, fraction: f32) -> Self {
        self.step(Step::SliderSet(path.to_owned(), fraction.clamp(0.0, 1.0)))
    }

    pub fn yield_frames(self, frames: u32) -> Self { self.step(Step::Yield(frames)) }

    pub fn check<F>(self, description: &str, f: F) -> Self
    where
        F: Fn(&S) -> CheckResult + 'static,
    {
        self.step(Step::Check(description.to_owned(), Box::new(f)))
    }
}

/// Join `path` onto the current reference. A leading `/` makes it absolute.
pub fn resolve_path(base: &str, path: &str) -> String {
    if let Some(abs) = path.strip_prefix('/') {
        return abs.to_owned();
    }
    let base = base.trim_end_matches('/');
    if base.is_empty() { path.to_owned() } else { format!("{base}/{path}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_onto_the_reference() {
        assert_eq!(resolve_path("Test Window", "Combo"), "Test Window/Combo");
        assert_eq!(resolve_path("Test Window/", "##listbox/Item 2"), "Test Window/##listbox/Item 2");
        assert_eq!(resolve_path("Test Window", "/Other/Button"), "Other/Button");
        assert_eq!(resolve_path("", "Solo"), "Solo");
    }

    #[test]
    fn builder_appends_in_order_and_clamps_slider_targets() {
        let mut case = TestCase::<u32>::new("G", "T");
        TestBuilder::new(&mut case)
            .set_ref("W")
            .slider_set("S", 1.5)
            .check("even", |n| if n % 2 == 0 { Ok(()) } else { Err("odd".into()) });

        assert_eq!(case.full_name(), "G/T");
        assert_eq!(case.steps.len(), 3);
        assert!(matches!(case.steps[1], Step::SliderSet(_, t) if t == 1.0));
        match &case.steps[2] {
            Step::Check(_, f) => assert!(f(&4).is_ok() && f(&3).is_err()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
