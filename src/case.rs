//! A single case and the exceptions it accumulates while it runs.

use std::fmt;
use std::time::Duration;

use crate::conventions::AssertionLibraryFilter;
use crate::exception::{guarded, Exception};
use crate::fixture::Fixture;
use crate::results::{CaseResult, ExceptionInfo};

/// Type name recorded when a case body is handed an instance of another fixture type.
pub const INSTANCE_MISMATCH: &str = "casework::InstanceMismatch";

type CaseBody = Box<dyn Fn(&mut dyn Fixture) -> Result<(), Exception>>;

/// One case of a fixture.
///
/// Exceptions are only ever appended. The case is consumed by
/// [`Case::into_result`], which produces exactly one [`CaseResult`].
pub struct Case {
    name: String,
    body: CaseBody,
    exceptions: Vec<Exception>,
    duration: Duration,
    skip_reason: Option<String>,
}

impl Case {
    pub fn new<T, F>(name: impl Into<String>, body: F) -> Self
    where
        T: Fixture,
        F: Fn(&mut T) -> Result<(), Exception> + 'static,
    {
        let body: CaseBody = Box::new(move |instance: &mut dyn Fixture| {
            match instance.downcast_mut::<T>() {
                Some(fixture) => body(fixture),
                None => Err(Exception::new(
                    INSTANCE_MISMATCH,
                    format!(
                        "Case expected an instance of {}.",
                        std::any::type_name::<T>()
                    ),
                )),
            }
        });

        Self {
            name: name.into(),
            body,
            exceptions: Vec::new(),
            duration: Duration::ZERO,
            skip_reason: None,
        }
    }

    /// Marks the case as skipped; it will not enter the pipeline.
    pub fn skip(mut self, reason: impl Into<String>) -> Self {
        self.skip_reason = Some(reason.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    pub fn exceptions(&self) -> &[Exception] {
        &self.exceptions
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn has_failed(&self) -> bool {
        !self.exceptions.is_empty()
    }

    pub fn add(&mut self, exception: Exception) {
        self.exceptions.push(exception);
    }

    pub fn add_all(&mut self, exceptions: impl IntoIterator<Item = Exception>) {
        self.exceptions.extend(exceptions);
    }

    /// Adds to the time spent running this case.
    pub fn record_duration(&mut self, elapsed: Duration) {
        self.duration += elapsed;
    }

    /// Runs the case body against `instance`. Panics come back as exceptions.
    pub fn invoke(&self, instance: &mut dyn Fixture) -> Result<(), Exception> {
        guarded(|| (self.body)(instance))
    }

    /// Finalizes the case.
    pub fn into_result(self, filter: &AssertionLibraryFilter) -> CaseResult {
        if let Some(reason) = self.skip_reason {
            return CaseResult::skipped(self.name, reason);
        }
        match ExceptionInfo::from_slice(&self.exceptions, filter) {
            Some(summary) => CaseResult::failed(self.name, self.duration, summary),
            None => CaseResult::passed(self.name, self.duration),
        }
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("exceptions", &self.exceptions)
            .field("duration", &self.duration)
            .field("skip_reason", &self.skip_reason)
            .finish_non_exhaustive()
    }
}
