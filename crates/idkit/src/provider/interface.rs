use std::sync::Arc;

use crate::provider::Provider;

/// One algorithm's view of a single representation `T`.
///
/// Implementations carry their own synchronization: `generate` is called
/// concurrently from any number of threads through shared references.
pub trait IdSource<T>: Send + Sync {
    /// Produces the next id. Infallible: on an internal failure a source
    /// returns the zero value of `T`.
    fn generate(&self) -> T;

    /// A best-effort structural check of `id`.
    fn validate(&self, id: &T) -> bool;
}

/// An [`IdSource`] assembled from two closures.
///
/// # Example
///
/// ```
/// use idkit::{IdSource, SourceFn};
///
/// let source = SourceFn::new(|| String::from("fixed"), |id: &String| id == "fixed");
/// let id: String = source.generate();
/// assert!(source.validate(&id));
/// ```
pub struct SourceFn<G, V> {
    generate: G,
    validate: V,
}

impl<G, V> SourceFn<G, V> {
    pub const fn new(generate: G, validate: V) -> Self {
        Self { generate, validate }
    }
}

impl<T, G, V> IdSource<T> for SourceFn<G, V>
where
    G: Fn() -> T + Send + Sync,
    V: Fn(&T) -> bool + Send + Sync,
{
    fn generate(&self) -> T {
        (self.generate)()
    }

    fn validate(&self, id: &T) -> bool {
        (self.validate)(id)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for i64 {}
}

/// The id representations a [`Provider`] can vend: `String` and `i64`.
///
/// Sealed; the two capability slots are fixed.
pub trait IdKind: sealed::Sealed + Send + Sync + Sized + 'static {
    #[doc(hidden)]
    fn slot(provider: &Provider) -> Option<&Arc<dyn IdSource<Self>>>;
}

impl IdKind for String {
    fn slot(provider: &Provider) -> Option<&Arc<dyn IdSource<Self>>> {
        provider.as_string()
    }
}

impl IdKind for i64 {
    fn slot(provider: &Provider) -> Option<&Arc<dyn IdSource<Self>>> {
        provider.as_number()
    }
}
