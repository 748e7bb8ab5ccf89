//! Casework runs the cases of a fixture through a pluggable lifecycle
//! pipeline and summarizes every failure it captures along the way.
//!
//! A [`Convention`] picks how fixtures are constructed ([`Factory`]), how
//! instances are managed around cases ([`TypeBehavior`]) and how cases run
//! against an instance ([`InstanceBehavior`]). The [`Runner`] applies it to a
//! [`FixtureType`] and its [`Case`]s and hands back one [`CaseResult`] each.

pub use crate::behaviors::{
    CreateInstancePerCase, CreateInstancePerFixture, ExecuteCases, InstanceBehavior, TypeBehavior,
};
pub use crate::case::Case;
pub use crate::conventions::{AssertionLibraryFilter, Convention, ConventionConfig, Lifecycle};
pub use crate::errors::ConfigError;
pub use crate::exception::{Exception, StackFrame};
pub use crate::fixture::{DefaultFactory, Factory, Fixture, FixtureType};
pub use crate::listener::{ConsoleListener, Listener};
pub use crate::results::{CaseResult, CaseStatus, ExceptionInfo};
pub use crate::runner::{RunSummary, Runner};

pub mod behaviors;
pub mod case;
pub mod conventions;
pub mod errors;
pub mod exception;
pub mod fixture;
pub mod listener;
pub mod results;
pub mod runner;
