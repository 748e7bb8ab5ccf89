use crate::exception::{namespace_of, Exception};

/// Suppresses noise contributed by assertion libraries and other helper code.
///
/// Exceptions whose type lives in a registered namespace keep their type name
/// but lose their display name, and stack frames declared there render as
/// empty lines. Registration only ever adds to what is filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertionLibraryFilter {
    namespaces: Vec<String>,
    types: Vec<String>,
}

impl AssertionLibraryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters every type in `prefix` and in the namespaces nested below it.
    pub fn namespace(&mut self, prefix: impl Into<String>) -> &mut Self {
        let prefix = prefix.into();
        if !prefix.is_empty() && !self.namespaces.contains(&prefix) {
            self.namespaces.push(prefix);
        }
        self
    }

    /// Filters a single fully-qualified type.
    pub fn type_name(&mut self, full_name: impl Into<String>) -> &mut Self {
        let full_name = full_name.into();
        if !full_name.is_empty() && !self.types.contains(&full_name) {
            self.types.push(full_name);
        }
        self
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// True when a registered prefix equals `namespace` or encloses it.
    pub fn is_filtered(&self, namespace: &str) -> bool {
        self.namespaces
            .iter()
            .any(|prefix| encloses(prefix, namespace))
    }

    pub fn is_filtered_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name) || self.is_filtered(namespace_of(type_name))
    }

    /// The name shown for an exception, empty when its type is filtered.
    pub fn display_name(&self, exception: &Exception) -> String {
        if self.is_filtered_type(exception.type_name()) {
            String::new()
        } else {
            exception.type_name().to_string()
        }
    }

    /// Renders the exception's frames, blanking those declared in filtered code.
    ///
    /// Blank lines stay in place so the output lines up with the raw trace.
    pub fn filter_stack_trace(&self, exception: &Exception) -> String {
        exception
            .frames()
            .iter()
            .map(|frame| {
                if self.is_filtered_type(&frame.declaring_type) {
                    String::new()
                } else {
                    frame.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn encloses(prefix: &str, namespace: &str) -> bool {
    match namespace.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with("::"),
        None => false,
    }
}
