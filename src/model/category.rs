//! Case-normalized category identifiers.
//!
//! Category names arrive as free-form strings from the host's domain model.
//! This newtype trims them once at the boundary and compares/hashes through a
//! cached casefold, so the matching core can use ordinary map lookups instead
//! of scattering case-insensitive comparisons through the pipeline.

use serde::{Deserialize, Serialize};

/// A trimmed category name comparing and hashing case-insensitively while
/// preserving the original spelling for display and export.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CategoryName {
    raw: String,
    folded: String,
}

impl CategoryName {
    pub fn new(name: impl AsRef<str>) -> Self {
        let raw = name.as_ref().trim().to_string();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The casefolded form used for comparisons and map keys.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl PartialEq for CategoryName {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for CategoryName {}

impl std::hash::Hash for CategoryName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl From<String> for CategoryName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CategoryName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.raw
    }
}

impl std::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
