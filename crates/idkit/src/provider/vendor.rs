use core::fmt;
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    provider::{Generator, IdKind, IdSource},
};

/// A named vendor of id generators.
///
/// `size` is the bit width of the id (0 when the length varies) and `width`
/// the character count of the string form when that is fixed. At least one of
/// the two capability slots is always populated.
pub struct Provider {
    name: Arc<str>,
    size: u32,
    width: Option<usize>,
    as_string: Option<Arc<dyn IdSource<String>>>,
    as_number: Option<Arc<dyn IdSource<i64>>>,
}

impl Provider {
    /// Starts building a provider called `name` with the given bit size.
    ///
    /// # Example
    ///
    /// ```
    /// use idkit::{Provider, SourceFn};
    ///
    /// let provider = Provider::builder("constant", 0)
    ///     .string(SourceFn::new(|| String::from("x"), |id: &String| id == "x"))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(provider.name(), "constant");
    /// assert!(provider.supports::<String>());
    /// assert!(!provider.supports::<i64>());
    /// ```
    pub fn builder(name: impl Into<Arc<str>>, size: u32) -> ProviderBuilder {
        ProviderBuilder {
            name: name.into(),
            size,
            width: None,
            as_string: None,
            as_number: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    pub const fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn as_string(&self) -> Option<&Arc<dyn IdSource<String>>> {
        self.as_string.as_ref()
    }

    pub fn as_number(&self) -> Option<&Arc<dyn IdSource<i64>>> {
        self.as_number.as_ref()
    }

    /// Returns `true` if the provider vends ids of type `T`.
    pub fn supports<T: IdKind>(&self) -> bool {
        T::slot(self).is_some()
    }

    /// Returns a handle for `T`, or `None` when the slot is empty.
    pub fn generator<T: IdKind>(self: &Arc<Self>) -> Option<Generator<T>> {
        Generator::from_provider(Arc::clone(self))
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("width", &self.width)
            .field("string", &self.as_string.is_some())
            .field("number", &self.as_number.is_some())
            .finish()
    }
}

/// Builder for [`Provider`].
#[must_use]
pub struct ProviderBuilder {
    name: Arc<str>,
    size: u32,
    width: Option<usize>,
    as_string: Option<Arc<dyn IdSource<String>>>,
    as_number: Option<Arc<dyn IdSource<i64>>>,
}

impl ProviderBuilder {
    /// Declares the fixed character width of the string form.
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Fills the string slot.
    pub fn string(self, source: impl IdSource<String> + 'static) -> Self {
        self.string_arc(Arc::new(source))
    }

    /// Fills the string slot with an already shared source.
    pub fn string_arc(mut self, source: Arc<dyn IdSource<String>>) -> Self {
        self.as_string = Some(source);
        self
    }

    /// Fills the `i64` slot.
    pub fn number(self, source: impl IdSource<i64> + 'static) -> Self {
        self.number_arc(Arc::new(source))
    }

    /// Fills the `i64` slot with an already shared source.
    pub fn number_arc(mut self, source: Arc<dyn IdSource<i64>>) -> Self {
        self.as_number = Some(source);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::NoCapability`] if neither slot was filled.
    pub fn build(self) -> Result<Provider> {
        if self.as_string.is_none() && self.as_number.is_none() {
            return Err(Error::NoCapability {
                name: self.name.to_string(),
            });
        }
        Ok(Provider {
            name: self.name,
            size: self.size,
            width: self.width,
            as_string: self.as_string,
            as_number: self.as_number,
        })
    }
}
