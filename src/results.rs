//! Results handed to reporting: per-case outcomes and exception summaries.

pub mod case_result;
pub mod exception_info;

pub use case_result::{CaseResult, CaseStatus};
pub use exception_info::ExceptionInfo;
