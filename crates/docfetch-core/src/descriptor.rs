//! Identifies one documentation page.

use std::fmt;

use crate::{Error, Result};

/// The key that selects a single API documentation page.
///
/// All three segments are used verbatim in the cache path and the request
/// URL. They are not checked for path or URL safety; producing safe values is
/// the caller's job.
///
/// ```rust
/// use docfetch_core::ItemDescriptor;
///
/// let item = ItemDescriptor::new("System.String", "netcore", "net6.0")?;
/// assert_eq!(item.query_key(), "System.String");
/// # Ok::<(), docfetch_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    query_key: String,
    pack_name: String,
    framework_moniker: String,
}

impl ItemDescriptor {
    /// Build a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any segment is empty or whitespace.
    pub fn new(
        query_key: impl Into<String>,
        pack_name: impl Into<String>,
        framework_moniker: impl Into<String>,
    ) -> Result<Self> {
        let descriptor = Self {
            query_key: query_key.into(),
            pack_name: pack_name.into(),
            framework_moniker: framework_moniker.into(),
        };
        for (field, value) in [
            ("query key", &descriptor.query_key),
            ("pack name", &descriptor.pack_name),
            ("framework moniker", &descriptor.framework_moniker),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("Item {field} must not be empty")));
            }
        }
        Ok(descriptor)
    }

    /// Lookup key understood by the documentation site, e.g. `System.String`.
    #[must_use]
    pub fn query_key(&self) -> &str {
        &self.query_key
    }

    /// Name of the reference pack that owns the item, e.g. `netcore`.
    #[must_use]
    pub fn pack_name(&self) -> &str {
        &self.pack_name
    }

    /// Target framework moniker, e.g. `net6.0`.
    #[must_use]
    pub fn framework_moniker(&self) -> &str {
        &self.framework_moniker
    }
}

impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.pack_name, self.framework_moniker, self.query_key
        )
    }
}
