use std::slice;

use super::{construct, execute_instance, TypeBehavior};
use crate::case::Case;
use crate::conventions::Convention;
use crate::fixture::{self, FixtureType};

/// Gives every case a fresh instance: construct, execute, dispose.
///
/// A case whose instance cannot be constructed fails with the construction
/// exceptions alone; it is neither executed nor disposed. Disposal failures
/// are recorded after any execution failure of the same case.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateInstancePerCase;

impl TypeBehavior for CreateInstancePerCase {
    fn execute(&self, fixture_type: &FixtureType, convention: &Convention, cases: &mut [Case]) {
        for case in cases.iter_mut() {
            log::debug!(
                "Constructing {} for case '{}'",
                fixture_type.name(),
                case.name()
            );

            let mut instance = match construct(fixture_type, convention) {
                Ok(instance) => instance,
                Err(exceptions) => {
                    log::warn!(
                        "Could not construct {} for case '{}' ({} exception(s))",
                        fixture_type.name(),
                        case.name(),
                        exceptions.len()
                    );
                    case.add_all(exceptions);
                    continue;
                }
            };

            if let Err(exception) = execute_instance(
                fixture_type,
                &mut *instance,
                slice::from_mut(case),
                convention,
            ) {
                log::warn!(
                    "Instance behavior panicked during case '{}': {}",
                    case.name(),
                    exception
                );
                case.add(exception);
            }

            if let Err(exception) = fixture::dispose(instance) {
                log::warn!(
                    "Disposing {} after case '{}' failed: {}",
                    fixture_type.name(),
                    case.name(),
                    exception
                );
                case.add(exception);
            }
        }
    }
}
