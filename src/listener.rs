//! Listeners receive results as cases finish.
//!
//! Report writers live outside this crate; [`ConsoleListener`] is the one
//! built-in sink and prints colored PASS/FAIL/SKIP lines.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::results::{CaseResult, CaseStatus};
use crate::runner::RunSummary;

pub trait Listener {
    fn case_finished(&mut self, result: &CaseResult);

    fn run_finished(&mut self, _summary: &RunSummary) {}
}

/// Writes results to a terminal (or any [`WriteColor`] sink).
pub struct ConsoleListener<W: WriteColor> {
    out: W,
}

impl ConsoleListener<StandardStream> {
    pub fn stdout() -> Self {
        Self::new(StandardStream::stdout(ColorChoice::Auto))
    }
}

impl<W: WriteColor> ConsoleListener<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn label(&mut self, text: &str, color: Color) {
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(self.out, "{}", text);
        let _ = self.out.reset();
    }
}

impl<W: WriteColor> Listener for ConsoleListener<W> {
    fn case_finished(&mut self, result: &CaseResult) {
        match result.status() {
            CaseStatus::Passed => {
                self.label("PASS", Color::Green);
                let _ = writeln!(self.out, ": {}", result.name());
            }
            CaseStatus::Skipped => {
                self.label("SKIP", Color::Yellow);
                let _ = writeln!(
                    self.out,
                    ": {} ({})",
                    result.name(),
                    result.skip_reason().unwrap_or_default()
                );
            }
            CaseStatus::Failed => {
                self.label("FAIL", Color::Red);
                let _ = writeln!(self.out, ": {}", result.name());
                if let Some(summary) = result.exception_summary() {
                    if !summary.display_name().is_empty() {
                        let _ = writeln!(self.out, "{}", summary.display_name());
                    }
                    let _ = writeln!(self.out, "{}", summary.stack_trace());
                }
                let _ = writeln!(self.out);
            }
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        let _ = writeln!(
            self.out,
            "\nTest summary: total {}, passed {}, failed {}, skipped {}",
            summary.total(),
            summary.passed,
            summary.failed,
            summary.skipped
        );
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::AssertionLibraryFilter;
    use crate::exception::Exception;
    use crate::results::ExceptionInfo;
    use std::time::Duration;
    use termcolor::Buffer;

    fn printed(listener: ConsoleListener<Buffer>) -> String {
        String::from_utf8(listener.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let mut listener = ConsoleListener::new(Buffer::no_color());
        let summary = ExceptionInfo::from_slice(
            &[Exception::new("Acme.Oops", "it broke")],
            &AssertionLibraryFilter::new(),
        )
        .unwrap();
        let results = [
            CaseResult::passed("adds", Duration::ZERO),
            CaseResult::skipped("waits", "slow"),
            CaseResult::failed("breaks", Duration::ZERO, summary),
        ];
        for result in &results {
            listener.case_finished(result);
        }
        listener.run_finished(&RunSummary::from_results(&results));

        assert_eq!(
            printed(listener),
            concat!(
                "PASS: adds\n",
                "SKIP: waits (slow)\n",
                "FAIL: breaks\n",
                "Acme.Oops\n",
                "it broke\n",
                "\n",
                "\n",
                "\n",
                "Test summary: total 3, passed 1, failed 1, skipped 1\n",
            )
        );
    }

    #[test]
    fn test_filtered_display_name_is_not_printed() {
        let mut filter = AssertionLibraryFilter::new();
        filter.namespace("Acme");
        let summary =
            ExceptionInfo::from_slice(&[Exception::new("Acme.Oops", "it broke")], &filter).unwrap();
        let mut listener = ConsoleListener::new(Buffer::no_color());
        listener.case_finished(&CaseResult::failed("breaks", Duration::ZERO, summary));

        assert_eq!(printed(listener), "FAIL: breaks\nit broke\n\n\n");
    }
}
