//! Fixture instances, fixture types and the factories that construct them.

use std::any::Any;
use std::fmt;

use crate::exception::{guarded, Exception};

/// Type name recorded when a factory fails without saying why.
pub const CONSTRUCTION_FAILED: &str = "casework::ConstructionFailed";

/// Upcast helper implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An instance of a fixture type, owned by the pipeline for one lifecycle.
///
/// Fixtures that hold resources override [`Fixture::dispose`]; it is called
/// exactly once per constructed instance.
pub trait Fixture: AsAny {
    fn dispose(&mut self) -> Result<(), Exception> {
        Ok(())
    }
}

impl dyn Fixture {
    pub fn downcast_mut<T: Fixture>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

/// Releases an instance, capturing a failing or panicking `dispose`.
pub fn dispose(mut instance: Box<dyn Fixture>) -> Result<(), Exception> {
    guarded(|| instance.dispose())
}

type Constructor = Box<dyn Fn() -> Result<Box<dyn Fixture>, Exception>>;

/// Identity of a fixture type plus its default way of being constructed.
pub struct FixtureType {
    name: String,
    constructor: Constructor,
}

impl FixtureType {
    /// Uses `T::default()` as the constructor and the Rust type name as identity.
    pub fn of<T: Fixture + Default>() -> Self {
        Self::new(std::any::type_name::<T>(), || Ok(T::default()))
    }

    pub fn new<T, F>(name: impl Into<String>, constructor: F) -> Self
    where
        T: Fixture,
        F: Fn() -> Result<T, Exception> + 'static,
    {
        Self {
            name: name.into(),
            constructor: Box::new(move || {
                constructor().map(|instance| Box::new(instance) as Box<dyn Fixture>)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the constructor directly. Panics are not caught here.
    pub fn instantiate(&self) -> Result<Box<dyn Fixture>, Exception> {
        (self.constructor)()
    }
}

impl fmt::Debug for FixtureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// Constructs fixture instances.
///
/// On failure the factory returns every exception raised while trying.
pub trait Factory {
    fn construct(&self, fixture_type: &FixtureType) -> Result<Box<dyn Fixture>, Vec<Exception>>;
}

impl<F> Factory for F
where
    F: Fn(&FixtureType) -> Result<Box<dyn Fixture>, Vec<Exception>>,
{
    fn construct(&self, fixture_type: &FixtureType) -> Result<Box<dyn Fixture>, Vec<Exception>> {
        self(fixture_type)
    }
}

/// Calls the fixture type's own constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl Factory for DefaultFactory {
    fn construct(&self, fixture_type: &FixtureType) -> Result<Box<dyn Fixture>, Vec<Exception>> {
        guarded(|| fixture_type.instantiate()).map_err(|exception| vec![exception])
    }
}

/// Placeholder exception for a factory that failed with an empty list.
pub(crate) fn construction_failed(fixture_type: &FixtureType) -> Exception {
    Exception::new(
        CONSTRUCTION_FAILED,
        format!(
            "Factory failed to construct {} without reporting an exception.",
            fixture_type.name()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    impl Fixture for Counter {}

    struct Leaky;

    impl Fixture for Leaky {
        fn dispose(&mut self) -> Result<(), Exception> {
            panic!("handle already closed")
        }
    }

    #[test]
    fn test_default_factory_constructs() {
        let fixture_type = FixtureType::of::<Counter>();
        let mut instance = DefaultFactory.construct(&fixture_type).ok().expect("instance");

        let counter = instance.downcast_mut::<Counter>().expect("a Counter");
        counter.hits += 1;
        assert_eq!(counter.hits, 1);
        assert!(fixture_type.name().ends_with("Counter"));
    }

    #[test]
    fn test_default_factory_captures_errors_and_panics() {
        let failing = FixtureType::new("Acme.Failing", || {
            Err::<Counter, _>(Exception::new("Acme.SetupError", "no database"))
        });
        let exceptions = DefaultFactory.construct(&failing).err().expect("failure");
        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].message(), "no database");

        let panicking = FixtureType::new("Acme.Panicking", || -> Result<Counter, Exception> {
            panic!("constructor exploded")
        });
        let exceptions = DefaultFactory.construct(&panicking).err().expect("failure");
        assert_eq!(exceptions[0].message(), "constructor exploded");
    }

    #[test]
    fn test_downcast_to_wrong_type_is_none() {
        let mut instance: Box<dyn Fixture> = Box::new(Counter::default());
        assert!(instance.downcast_mut::<Leaky>().is_none());
    }

    #[test]
    fn test_dispose_captures_panics() {
        let exception = dispose(Box::new(Leaky)).unwrap_err();
        assert_eq!(exception.message(), "handle already closed");
        assert!(dispose(Box::new(Counter::default())).is_ok());
    }
}
