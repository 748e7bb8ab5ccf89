//! Drives fixtures through a convention and collects their results.

use serde::Serialize;

use crate::case::Case;
use crate::conventions::Convention;
use crate::fixture::FixtureType;
use crate::listener::Listener;
use crate::results::{CaseResult, CaseStatus};

/// Tally of finished cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result);
        }
        summary
    }

    pub fn record(&mut self, result: &CaseResult) {
        match result.status() {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Runs fixtures under one convention and reports to listeners.
pub struct Runner {
    convention: Convention,
    listeners: Vec<Box<dyn Listener>>,
    summary: RunSummary,
}

impl Runner {
    pub fn new(convention: Convention) -> Self {
        Self {
            convention,
            listeners: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn with_listener(mut self, listener: impl Listener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener>) {
        self.listeners.push(listener);
    }

    pub fn convention(&self) -> &Convention {
        &self.convention
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Runs every case of `fixture_type`, returning results in input order.
    ///
    /// Skipped cases never reach the convention's behaviors.
    pub fn run_fixture(&mut self, fixture_type: &FixtureType, cases: Vec<Case>) -> Vec<CaseResult> {
        let filter = self.convention.assertion_library();
        let mut results: Vec<Option<CaseResult>> = Vec::with_capacity(cases.len());
        let mut runnable = Vec::new();
        let mut positions = Vec::new();

        for case in cases {
            if case.skip_reason().is_some() {
                results.push(Some(case.into_result(filter)));
            } else {
                positions.push(results.len());
                results.push(None);
                runnable.push(case);
            }
        }

        log::debug!(
            "Running {} case(s) of {} under convention '{}'",
            runnable.len(),
            fixture_type.name(),
            self.convention.name()
        );
        self.convention
            .class_execution()
            .execute(fixture_type, &self.convention, &mut runnable);

        for (position, case) in positions.into_iter().zip(runnable) {
            results[position] = Some(case.into_result(filter));
        }

        let results: Vec<CaseResult> = results.into_iter().flatten().collect();
        for result in &results {
            self.summary.record(result);
            for listener in &mut self.listeners {
                listener.case_finished(result);
            }
        }
        results
    }

    /// Notifies listeners that the run is over and returns the final tally.
    pub fn finish(mut self) -> RunSummary {
        for listener in &mut self.listeners {
            listener.run_finished(&self.summary);
        }
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exception::Exception;
    use crate::fixture::Fixture;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Sample;

    impl Fixture for Sample {}

    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Listener for Recorder {
        fn case_finished(&mut self, result: &CaseResult) {
            self.0
                .borrow_mut()
                .push(format!("{} {}", result.status(), result.name()));
        }

        fn run_finished(&mut self, summary: &RunSummary) {
            self.0.borrow_mut().push(format!("total {}", summary.total()));
        }
    }

    #[test]
    fn test_results_keep_input_order_around_skips() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut runner = Runner::new(Convention::default()).with_listener(Recorder(events.clone()));

        let cases = vec![
            Case::new("first", |_: &mut Sample| Ok(())),
            Case::new("second", |_: &mut Sample| Ok(())).skip("not today"),
            Case::new("third", |_: &mut Sample| Err(Exception::new("Acme.Oops", "oops"))),
        ];
        let results = runner.run_fixture(&FixtureType::of::<Sample>(), cases);

        let names: Vec<_> = results.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(results[1].status(), CaseStatus::Skipped);
        assert_eq!(results[2].status(), CaseStatus::Failed);

        let summary = runner.finish();
        assert_eq!(summary, RunSummary { passed: 1, failed: 1, skipped: 1 });
        assert!(summary.has_failures());
        assert_eq!(
            *events.borrow(),
            ["Passed first", "Skipped second", "Failed third", "total 3"]
        );
    }

    #[test]
    fn test_summary_from_results() {
        let results = vec![
            CaseResult::passed("a", Default::default()),
            CaseResult::skipped("b", "why"),
        ];
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.total(), 2);
        assert!(!summary.has_failures());
    }
}
