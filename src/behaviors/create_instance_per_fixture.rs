use super::{construct, execute_instance, TypeBehavior};
use crate::case::Case;
use crate::conventions::Convention;
use crate::fixture::{self, FixtureType};

/// Shares one instance across all cases of the fixture.
///
/// Construction and disposal failures concern every case, so each case
/// receives a copy of them. So does a panic from the instance behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateInstancePerFixture;

impl TypeBehavior for CreateInstancePerFixture {
    fn execute(&self, fixture_type: &FixtureType, convention: &Convention, cases: &mut [Case]) {
        if cases.is_empty() {
            return;
        }

        log::debug!(
            "Constructing shared {} for {} case(s)",
            fixture_type.name(),
            cases.len()
        );

        let mut instance = match construct(fixture_type, convention) {
            Ok(instance) => instance,
            Err(exceptions) => {
                log::warn!("Could not construct shared {}", fixture_type.name());
                for case in cases.iter_mut() {
                    case.add_all(exceptions.iter().cloned());
                }
                return;
            }
        };

        if let Err(exception) = execute_instance(fixture_type, &mut *instance, cases, convention) {
            log::warn!(
                "Instance behavior panicked on shared {}: {}",
                fixture_type.name(),
                exception
            );
            for case in cases.iter_mut() {
                case.add(exception.clone());
            }
        }

        if let Err(exception) = fixture::dispose(instance) {
            log::warn!(
                "Disposing shared {} failed: {}",
                fixture_type.name(),
                exception
            );
            for case in cases.iter_mut() {
                case.add(exception.clone());
            }
        }
    }
}
