//! Exact-then-substring lookup over a reference catalog.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::future::Future;

/// An item that the fallback search can match against.
pub trait CatalogItem {
    /// Text searched by the fallback (a course title, a template name, ...).
    fn label(&self) -> &str;
}

/// Identifier plus display name, as served by catalog listings.
///
/// Deserializes from `{"id", "name"}` as well as the course listing shape
/// `{"course_id", "name"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct CatalogEntry {
    #[serde(alias = "course_id")]
    id: String,
    #[serde(alias = "course")]
    name: String,
}

impl CatalogEntry {
    /// Create an entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl CatalogItem for CatalogEntry {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Result of [`FallbackResolver::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult<T = CatalogEntry> {
    /// The exact lookup hit.
    ExactMatch(JsonValue),
    /// The exact lookup missed; these catalog items contain the key.
    /// Never empty, in catalog order.
    FallbackMatches(Vec<T>),
    /// Neither the exact lookup nor the search found anything.
    NotFound,
}

impl<T> LookupResult<T> {
    /// Whether nothing was found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Items whose label contains `key`, ignoring case, in catalog order.
///
/// The key is searched for inside each label, never the other way round, so
/// a key longer than every label matches nothing.
///
/// # Example
///
/// ```
/// use tidings_cache::{CatalogEntry, search};
///
/// let catalog = vec![
///     CatalogEntry::new("CMSC131", "Object-Oriented Programming I"),
///     CatalogEntry::new("CMSC132", "Object-Oriented Programming II"),
///     CatalogEntry::new("MATH140", "Calculus I"),
/// ];
/// let hits = search("object-oriented", &catalog);
/// assert_eq!(hits.len(), 2);
/// ```
pub fn search<T: CatalogItem + Clone>(key: &str, catalog: &[T]) -> Vec<T> {
    let needle = key.to_lowercase();
    catalog
        .iter()
        .filter(|item| item.label().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Exact lookup with a substring-search fallback.
///
/// The resolver owns no state. Expensive catalog fetches are the caller's
/// to cache, typically by wrapping them in a [`ResourceCache`](crate::ResourceCache).
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackResolver;

impl FallbackResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve `key`.
    ///
    /// `exact_fetch` returns `Ok(Some(payload))` on a hit and `Ok(None)` on a
    /// miss. Only on a miss is `catalog_fetch` called.
    ///
    /// # Errors
    ///
    /// Propagates the error of either function unchanged, typically a
    /// `FetchError`.
    #[tracing::instrument(skip(self, catalog_fetch, exact_fetch))]
    pub async fn resolve<T, E, C, CFut, X, XFut>(
        &self,
        key: &str,
        catalog_fetch: C,
        exact_fetch: X,
    ) -> Result<LookupResult<T>, E>
    where
        T: CatalogItem + Clone,
        C: FnOnce() -> CFut,
        CFut: Future<Output = Result<Vec<T>, E>>,
        X: FnOnce(String) -> XFut,
        XFut: Future<Output = Result<Option<JsonValue>, E>>,
    {
        if let Some(payload) = exact_fetch(key.to_string()).await? {
            tracing::debug!("Exact match");
            return Ok(LookupResult::ExactMatch(payload));
        }

        let catalog = catalog_fetch().await?;
        let matches = search(key, &catalog);
        tracing::debug!(
            catalog_size = catalog.len(),
            matches = matches.len(),
            "Exact lookup missed, searched catalog"
        );

        if matches.is_empty() {
            Ok(LookupResult::NotFound)
        } else {
            Ok(LookupResult::FallbackMatches(matches))
        }
    }
}
