use core::fmt;
use std::sync::Arc;

use crate::provider::{IdKind, IdSource, Provider};

/// A cheap, clonable handle producing ids of type `T` from one provider.
///
/// Every call re-enters the provider's source, so handles may be obtained
/// and dropped freely and shared across threads.
pub struct Generator<T: IdKind> {
    provider: Arc<Provider>,
    source: Arc<dyn IdSource<T>>,
}

impl<T: IdKind> Generator<T> {
    /// Returns `None` if `provider` does not vend `T`.
    pub fn from_provider(provider: Arc<Provider>) -> Option<Self> {
        let source = Arc::clone(T::slot(&provider)?);
        Some(Self { provider, source })
    }

    /// The name the provider was registered under.
    pub fn name(&self) -> &str {
        self.provider.name()
    }

    /// Bit size of the id; 0 for variable length ids.
    pub fn size(&self) -> u32 {
        self.provider.size()
    }

    /// Fixed character width of the string form, if any.
    pub fn width(&self) -> Option<usize> {
        self.provider.width()
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    pub fn generate(&self) -> T {
        self.source.generate()
    }

    pub fn validate(&self, id: &T) -> bool {
        self.source.validate(id)
    }
}

impl<T: IdKind> Clone for Generator<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            source: Arc::clone(&self.source),
        }
    }
}

impl<T: IdKind> fmt::Debug for Generator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name())
            .field("size", &self.size())
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
