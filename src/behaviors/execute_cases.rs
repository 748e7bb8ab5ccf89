use std::time::Instant;

use super::InstanceBehavior;
use crate::case::Case;
use crate::conventions::Convention;
use crate::fixture::{Fixture, FixtureType};

/// Invokes each case body in order, timing it and recording its failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteCases;

impl InstanceBehavior for ExecuteCases {
    fn execute(
        &self,
        fixture_type: &FixtureType,
        instance: &mut dyn Fixture,
        cases: &mut [Case],
        _convention: &Convention,
    ) {
        for case in cases.iter_mut() {
            log::trace!("Running {}::{}", fixture_type.name(), case.name());

            let started = Instant::now();
            let outcome = case.invoke(&mut *instance);
            case.record_duration(started.elapsed());

            if let Err(exception) = outcome {
                log::debug!("Case '{}' failed: {}", case.name(), exception);
                case.add(exception);
            }
        }
    }
}
