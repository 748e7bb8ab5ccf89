//! Conventions: the configuration bundle that selects a fixture's lifecycle.

use std::fmt;

use crate::behaviors::{
    CreateInstancePerCase, CreateInstancePerFixture, ExecuteCases, InstanceBehavior, TypeBehavior,
};
use crate::fixture::{DefaultFactory, Factory};

mod assertion_library;
pub mod config;

pub use assertion_library::AssertionLibraryFilter;
pub use config::{ConventionConfig, Lifecycle};

/// Selects how fixtures are constructed and how their cases are executed.
pub struct Convention {
    name: String,
    factory: Box<dyn Factory>,
    class_execution: Box<dyn TypeBehavior>,
    instance_execution: Box<dyn InstanceBehavior>,
    assertion_library: AssertionLibraryFilter,
}

impl Default for Convention {
    /// A fresh instance per case, built by the fixture's own constructor.
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            factory: Box::new(DefaultFactory),
            class_execution: Box::new(CreateInstancePerCase),
            instance_execution: Box::new(ExecuteCases),
            assertion_library: AssertionLibraryFilter::new(),
        }
    }
}

impl Convention {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ConventionConfig) -> Self {
        let mut convention = Self::new(config.name.clone());
        convention = match config.lifecycle {
            Lifecycle::PerCase => convention.with_class_execution(CreateInstancePerCase),
            Lifecycle::PerFixture => convention.with_class_execution(CreateInstancePerFixture),
        };
        for namespace in &config.assertion_library.namespaces {
            convention.assertion_library.namespace(namespace.as_str());
        }
        for type_name in &config.assertion_library.types {
            convention.assertion_library.type_name(type_name.as_str());
        }
        convention
    }

    pub fn with_factory(mut self, factory: impl Factory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    pub fn with_class_execution(mut self, behavior: impl TypeBehavior + 'static) -> Self {
        self.class_execution = Box::new(behavior);
        self
    }

    pub fn with_instance_execution(mut self, behavior: impl InstanceBehavior + 'static) -> Self {
        self.instance_execution = Box::new(behavior);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> &dyn Factory {
        self.factory.as_ref()
    }

    pub fn class_execution(&self) -> &dyn TypeBehavior {
        self.class_execution.as_ref()
    }

    pub fn instance_execution(&self) -> &dyn InstanceBehavior {
        self.instance_execution.as_ref()
    }

    pub fn assertion_library(&self) -> &AssertionLibraryFilter {
        &self.assertion_library
    }

    /// Registration happens before any case runs.
    pub fn assertion_library_mut(&mut self) -> &mut AssertionLibraryFilter {
        &mut self.assertion_library
    }
}

impl fmt::Debug for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Convention")
            .field("name", &self.name)
            .field("assertion_library", &self.assertion_library)
            .finish_non_exhaustive()
    }
}
