//! # Casework Test Support
//!
//! Shared fixtures for the integration tests: nested exception chains shaped
//! like the ones a managed runtime produces, and a fixture that records its
//! own lifecycle.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use casework::{Case, Exception, Fixture, FixtureType, StackFrame};

/// Source file the helper frames point at.
pub const HERE: &str = file!();

/// Declaring type used for every helper frame.
pub const TESTS_TYPE: &str = "Acme.Tests.Results.ExceptionInfoTests";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// NullReferenceException("Null reference!") wrapping DivideByZeroException("Divide by zero!").
pub fn nested_exception() -> Exception {
    let cause = Exception::new("System.DivideByZeroException", "Divide by zero!")
        .frame(StackFrame::new(TESTS_TYPE, "GetNestedException").at(HERE, line!()));

    Exception::new("System.NullReferenceException", "Null reference!")
        .frame(StackFrame::new(TESTS_TYPE, "GetNestedException").at(HERE, line!()))
        .caused_by(cause)
}

/// ArgumentException wrapping ApplicationException wrapping NotImplementedException.
pub fn secondary_nested_exception() -> Exception {
    let innermost = Exception::new("System.NotImplementedException", "Not implemented!")
        .frame(StackFrame::new(TESTS_TYPE, "GetSecondaryNestedException").at(HERE, line!()));
    let middle = Exception::new("System.ApplicationException", "Application!")
        .frame(StackFrame::new(TESTS_TYPE, "GetSecondaryNestedException").at(HERE, line!()))
        .caused_by(innermost);

    Exception::new("System.ArgumentException", "Argument!")
        .frame(StackFrame::new(TESTS_TYPE, "GetSecondaryNestedException").at(HERE, line!()))
        .caused_by(middle)
}

/// A NotImplementedException that was never thrown, so it has no frames.
pub fn not_implemented() -> Exception {
    Exception::new(
        "System.NotImplementedException",
        "The method or operation is not implemented.",
    )
}

// =============================================================================
// LIFECYCLE TRACKING
// =============================================================================

pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

/// Fixture that writes "construct", case and "dispose" events to a shared log.
pub struct Tracked {
    pub id: usize,
    pub log: EventLog,
    pub fail_dispose: bool,
}

impl Fixture for Tracked {
    fn dispose(&mut self) -> Result<(), Exception> {
        self.log.borrow_mut().push(format!("dispose {}", self.id));
        if self.fail_dispose {
            return Err(Exception::new(
                "Acme.Tests.DisposeError",
                format!("dispose {} failed", self.id),
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TrackedOptions {
    /// Constructor attempts (1-based) that fail instead of building an instance.
    pub failing_constructions: Vec<usize>,
    pub fail_dispose: bool,
}

pub fn tracked_type(log: &EventLog, options: TrackedOptions) -> FixtureType {
    let log = log.clone();
    let attempts = Cell::new(0);
    FixtureType::new("Acme.Tests.Tracked", move || {
        let id = attempts.get() + 1;
        attempts.set(id);
        if options.failing_constructions.contains(&id) {
            log.borrow_mut().push(format!("construct {} failed", id));
            return Err(Exception::new(
                "Acme.Tests.ConstructionError",
                format!("construct {} failed", id),
            ));
        }
        log.borrow_mut().push(format!("construct {}", id));
        Ok(Tracked {
            id,
            log: log.clone(),
            fail_dispose: options.fail_dispose,
        })
    })
}

/// A case that logs "<name> on <id>" and succeeds.
pub fn passing_case(name: &'static str) -> Case {
    Case::new(name, move |fixture: &mut Tracked| {
        fixture.log.borrow_mut().push(format!("{} on {}", name, fixture.id));
        Ok(())
    })
}

/// A case that logs "<name> on <id>" and fails with `Acme.Tests.CaseError`.
pub fn failing_case(name: &'static str) -> Case {
    Case::new(name, move |fixture: &mut Tracked| {
        fixture.log.borrow_mut().push(format!("{} on {}", name, fixture.id));
        Err(Exception::new("Acme.Tests.CaseError", format!("{} failed", name)))
    })
}
