//! Summaries of captured exceptions.
//!
//! An [`ExceptionInfo`] is built once, when a case's accumulated exceptions
//! are finalized, and never changes afterwards. Its `stack_trace` text is what
//! report writers print, so the separator lines and blank-line placement
//! produced here are part of the output contract:
//!
//! ```text
//! <primary message>
//! <primary frames>
//!
//! ------- Inner Exception: <type> -------
//! <inner message>
//! <inner frames>
//!
//! ===== Secondary Exception: <type> =====
//! <secondary message>
//! <secondary frames>
//! ```

use serde::Serialize;

use crate::conventions::AssertionLibraryFilter;
use crate::exception::Exception;

/// Immutable summary of one exception chain, plus any secondary chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionInfo {
    display_name: String,
    #[serde(rename = "type")]
    type_name: String,
    message: String,
    stack_trace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    inner_exception: Option<Box<ExceptionInfo>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    secondary: Vec<ExceptionInfo>,
}

impl ExceptionInfo {
    /// Summarizes a single exception and its cause chain.
    ///
    /// `stack_trace` holds only this exception's (filtered) frames.
    pub fn new(exception: &Exception, filter: &AssertionLibraryFilter) -> Self {
        Self {
            display_name: filter.display_name(exception),
            type_name: exception.type_name().to_string(),
            message: exception.message().to_string(),
            stack_trace: filter.filter_stack_trace(exception),
            inner_exception: exception
                .cause()
                .map(|cause| Box::new(Self::new(cause, filter))),
            secondary: Vec::new(),
        }
    }

    /// Summarizes a primary exception followed by secondary ones.
    ///
    /// Name, type and message come from the primary. The stack trace is the
    /// compound rendering of every chain. The root keeps the primary's inner
    /// exception only when there are no secondaries.
    pub fn from_exceptions<'a>(
        primary: &Exception,
        secondary: impl IntoIterator<Item = &'a Exception>,
        filter: &AssertionLibraryFilter,
    ) -> Self {
        let primary = Self::new(primary, filter);
        let secondary: Vec<Self> = secondary
            .into_iter()
            .map(|exception| Self::new(exception, filter))
            .collect();
        let stack_trace = compound_stack_trace(&primary, &secondary);
        let inner_exception = if secondary.is_empty() {
            primary.inner_exception
        } else {
            None
        };

        Self {
            display_name: primary.display_name,
            type_name: primary.type_name,
            message: primary.message,
            stack_trace,
            inner_exception,
            secondary,
        }
    }

    /// Summarizes `exceptions`, treating the first as primary.
    ///
    /// Returns `None` when there is nothing to summarize.
    pub fn from_slice(exceptions: &[Exception], filter: &AssertionLibraryFilter) -> Option<Self> {
        let (primary, secondary) = exceptions.split_first()?;
        Some(Self::from_exceptions(primary, secondary, filter))
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }

    pub fn inner_exception(&self) -> Option<&ExceptionInfo> {
        self.inner_exception.as_deref()
    }

    pub fn secondary(&self) -> &[ExceptionInfo] {
        &self.secondary
    }

    /// Walks the inner exceptions below this one, outermost first.
    pub fn inner_chain(&self) -> impl Iterator<Item = &ExceptionInfo> {
        std::iter::successors(self.inner_exception(), |info| info.inner_exception())
    }
}

fn compound_stack_trace(primary: &ExceptionInfo, secondary: &[ExceptionInfo]) -> String {
    let mut out = String::new();

    for (index, exception) in std::iter::once(primary).chain(secondary).enumerate() {
        if index > 0 {
            out.push_str("\n\n");
            out.push_str(&format!(
                "===== Secondary Exception: {} =====\n",
                exception.type_name
            ));
        }
        push_section(&mut out, exception);

        for inner in exception.inner_chain() {
            out.push_str("\n\n");
            out.push_str(&format!(
                "------- Inner Exception: {} -------\n",
                inner.type_name
            ));
            push_section(&mut out, inner);
        }
    }

    out
}

fn push_section(out: &mut String, exception: &ExceptionInfo) {
    out.push_str(&exception.message);
    out.push('\n');
    out.push_str(&exception.stack_trace);
}
