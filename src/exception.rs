//! Owned failure values captured by the execution pipeline.
//!
//! Everything that can go wrong while a case is processed (a constructor
//! returning an error, a case body panicking, a fixture failing to release
//! its resources) is turned into an [`Exception`]: a fully-qualified type
//! name, a message, the frames it was raised from, and an optional cause.
//! Summarization later turns these into `ExceptionInfo` trees.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Type name recorded for panics caught while running fixture code.
pub const PANIC_TYPE: &str = "core::panic::Panic";

/// Type name recorded for error sources whose concrete type is erased.
pub const UNKNOWN_SOURCE_TYPE: &str = "core::error::Error";

// ============================================================================
// STACK FRAMES
// ============================================================================

/// One frame of the call stack an exception was raised through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub declaring_type: String,
    pub member: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    pub fn new(declaring_type: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            member: member.into(),
            file: None,
            line: None,
        }
    }

    /// Attaches a source location.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Attaches a source file without a line number.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self.line = None;
        self
    }

    /// Namespace of the type that declares this frame's member.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.declaring_type)
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.declaring_type.contains("::") {
            "::"
        } else {
            "."
        };
        write!(
            f,
            "   at {}{}{}()",
            self.declaring_type, separator, self.member
        )?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " in {}:line {}", file, line),
            (Some(file), None) => write!(f, " in {}", file),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// EXCEPTIONS
// ============================================================================

/// A captured failure together with its cause chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    type_name: String,
    message: String,
    frames: Vec<StackFrame>,
    cause: Option<Box<Exception>>,
}

impl Exception {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            frames: Vec::new(),
            cause: None,
        }
    }

    /// Appends a frame. Frames are kept innermost first.
    pub fn frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Sets the exception this one wraps.
    pub fn caused_by(mut self, cause: Exception) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Captures a typed error and its `source()` chain.
    pub fn from_error<E: Error + 'static>(error: &E) -> Self {
        if let Some(exception) = (error as &dyn Any).downcast_ref::<Exception>() {
            return exception.clone();
        }
        Self {
            type_name: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            frames: Vec::new(),
            cause: error.source().map(|source| Box::new(Self::from_source(source))),
        }
    }

    fn from_source(error: &(dyn Error + 'static)) -> Self {
        if let Some(exception) = error.downcast_ref::<Exception>() {
            return exception.clone();
        }
        Self {
            type_name: UNKNOWN_SOURCE_TYPE.to_string(),
            message: error.to_string(),
            frames: Vec::new(),
            cause: error.source().map(|source| Box::new(Self::from_source(source))),
        }
    }

    /// Converts a `catch_unwind` payload into an exception.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self::new(PANIC_TYPE, message)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The type name without its last segment.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.type_name)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn cause(&self) -> Option<&Exception> {
        self.cause.as_deref()
    }

    /// Unfiltered rendering of the frames, one per line.
    pub fn stack_trace(&self) -> String {
        self.frames
            .iter()
            .map(StackFrame::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Runs fixture code, turning a panic into an [`Exception`].
pub(crate) fn guarded<T>(f: impl FnOnce() -> Result<T, Exception>) -> Result<T, Exception> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(Exception::from_panic(payload)),
    }
}

/// Returns the namespace part of a `.` or `::` separated type name.
///
/// Generic arguments are ignored, so `alloc::vec::Vec<core::num::ParseIntError>`
/// lives in `alloc::vec`.
pub fn namespace_of(type_name: &str) -> &str {
    let head = match type_name.find('<') {
        Some(generics) => &type_name[..generics],
        None => type_name,
    };
    let dot = head.rfind('.');
    let colons = head.rfind("::");
    match (dot, colons) {
        (Some(d), Some(c)) => &head[..d.max(c)],
        (Some(d), None) => &head[..d],
        (None, Some(c)) => &head[..c],
        (None, None) => "",
    }
}
