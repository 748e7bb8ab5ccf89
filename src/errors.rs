//! Casework error handling.
//!
//! Case failures never surface as errors; they are recorded on the case. The
//! only fallible operation is loading a convention configuration.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[diagnostic(url(docsrs))]
pub enum ConfigError {
    #[error("Failed to read convention file '{}'", path.display())]
    #[diagnostic(code(casework::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid convention configuration: {source}")]
    #[diagnostic(
        code(casework::config::parse),
        help("expected keys: name, lifecycle (per_case | per_fixture), assertion_library")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    pub(crate) fn parse(name: &str, content: &str, source: serde_yaml::Error) -> Self {
        let span = source
            .location()
            .map(|location| SourceSpan::from((location.index(), 1)));
        ConfigError::Parse {
            src: NamedSource::new(name, content.to_string()),
            span,
            source,
        }
    }
}
