//! Process-wide directory of id providers.
//!
//! Providers are registered by name; the most recent registration also
//! becomes the default. Lookups hand out typed [`Generator`] handles and
//! return `None` for unknown names or missing capabilities.
//!
//! ```
//! use idkit::registry;
//!
//! // `number` is always available, even before any provider is installed.
//! let generator = registry::get::<String>("number").unwrap();
//! assert!(registry::validate("number", &generator.generate()));
//! assert!(registry::get::<String>("absent").is_none());
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use parking_lot::RwLock;
#[cfg(feature = "tracing")]
use tracing::debug;

use crate::provider::{Generator, IdKind, Provider};

#[derive(Default)]
struct Inner {
    providers: HashMap<Arc<str>, Arc<Provider>>,
    default: Option<Arc<str>>,
}

/// A name to provider map with a last-registered default.
///
/// Reads take a shared lock; registration takes the write lock briefly.
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Inserts `provider`, replacing any provider with the same name, and
    /// makes it the default.
    pub fn register(&self, provider: Provider) {
        let name = Arc::clone(provider.name_arc());
        let provider = Arc::new(provider);

        let mut inner = self.inner.write();
        let replaced = inner.providers.insert(Arc::clone(&name), provider).is_some();
        inner.default = Some(Arc::clone(&name));
        drop(inner);

        #[cfg(feature = "tracing")]
        if replaced {
            debug!(name = %name, "replaced id provider");
        } else {
            debug!(name = %name, "registered id provider");
        }
        #[cfg(not(feature = "tracing"))]
        let _ = replaced;
    }

    /// Returns a `T` generator for `name`, or `None` if the name is unknown
    /// or the provider does not vend `T`.
    pub fn get<T: IdKind>(&self, name: &str) -> Option<Generator<T>> {
        let provider = self.provider(name)?;
        Generator::from_provider(provider)
    }

    /// [`Self::get`] against the most recently registered name.
    pub fn default<T: IdKind>(&self) -> Option<Generator<T>> {
        let provider = {
            let inner = self.inner.read();
            let name = inner.default.as_ref()?;
            Arc::clone(inner.providers.get(name)?)
        };
        Generator::from_provider(provider)
    }

    /// Validates `id` with the string generator of `name`. `false` when the
    /// provider is missing or has no string form.
    pub fn validate(&self, name: &str, id: &str) -> bool {
        self.provider(name)
            .and_then(|p| p.as_string().map(|source| source.validate(&id.to_owned())))
            .unwrap_or(false)
    }

    /// The shared provider registered under `name`.
    pub fn provider(&self, name: &str) -> Option<Arc<Provider>> {
        self.inner.read().providers.get(name).cloned()
    }

    /// Name of the current default provider.
    pub fn default_name(&self) -> Option<String> {
        self.inner.read().default.as_deref().map(str::to_owned)
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .read()
            .providers
            .keys()
            .map(|name| name.to_string())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().providers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.read().providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().providers.is_empty()
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .field("default", &self.default_name())
            .finish()
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    let registry = Registry::new();
    registry.register(crate::providers::number::fallback());
    registry
});

/// The process-wide registry, seeded with the `number` provider.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Registers `provider` in the global registry. See [`Registry::register`].
pub fn register(provider: Provider) {
    GLOBAL.register(provider);
}

/// See [`Registry::get`].
pub fn get<T: IdKind>(name: &str) -> Option<Generator<T>> {
    GLOBAL.get(name)
}

/// See [`Registry::default`].
pub fn default<T: IdKind>() -> Option<Generator<T>> {
    GLOBAL.default()
}

/// See [`Registry::validate`].
pub fn validate(name: &str, id: &str) -> bool {
    GLOBAL.validate(name, id)
}

/// See [`Registry::default_name`].
pub fn default_name() -> Option<String> {
    GLOBAL.default_name()
}

/// See [`Registry::names`].
pub fn names() -> Vec<String> {
    GLOBAL.names()
}

/// See [`Registry::contains`].
pub fn contains(name: &str) -> bool {
    GLOBAL.contains(name)
}
