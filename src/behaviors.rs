//! Execution behaviors: the pluggable steps of a fixture's lifecycle.
//!
//! A [`TypeBehavior`] decides how instances of a fixture type are created
//! and released around its cases. An [`InstanceBehavior`] runs cases against
//! an instance that already exists. Conventions pick one of each.
//!
//! Neither kind of behavior fails: every problem is recorded on the case it
//! belongs to.

use crate::case::Case;
use crate::conventions::Convention;
use crate::exception::{guarded, Exception};
use crate::fixture::{construction_failed, Fixture, FixtureType};

mod create_instance_per_case;
mod create_instance_per_fixture;
mod execute_cases;

pub use create_instance_per_case::CreateInstancePerCase;
pub use create_instance_per_fixture::CreateInstancePerFixture;
pub use execute_cases::ExecuteCases;

/// Runs all cases of a fixture type, managing instance lifecycles.
pub trait TypeBehavior {
    fn execute(&self, fixture_type: &FixtureType, convention: &Convention, cases: &mut [Case]);
}

/// Runs cases against a constructed instance.
pub trait InstanceBehavior {
    fn execute(
        &self,
        fixture_type: &FixtureType,
        instance: &mut dyn Fixture,
        cases: &mut [Case],
        convention: &Convention,
    );
}

/// Builds an instance through the convention's factory.
///
/// A panicking factory fails like any other, and a factory that fails
/// without an exception yields a placeholder, so `Err` is never empty.
fn construct(
    fixture_type: &FixtureType,
    convention: &Convention,
) -> Result<Box<dyn Fixture>, Vec<Exception>> {
    match guarded(|| Ok(convention.factory().construct(fixture_type))) {
        Ok(Ok(instance)) => Ok(instance),
        Ok(Err(exceptions)) if exceptions.is_empty() => {
            Err(vec![construction_failed(fixture_type)])
        }
        Ok(Err(exceptions)) => Err(exceptions),
        Err(panic) => Err(vec![panic]),
    }
}

/// Hands `cases` to the convention's instance behavior, catching its panics.
fn execute_instance(
    fixture_type: &FixtureType,
    instance: &mut dyn Fixture,
    cases: &mut [Case],
    convention: &Convention,
) -> Result<(), Exception> {
    guarded(|| {
        convention
            .instance_execution()
            .execute(fixture_type, instance, cases, convention);
        Ok(())
    })
}
