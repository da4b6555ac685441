//! Identity of a model participant: the host model or one of its links.

use serde::{Deserialize, Serialize};

/// Which of the two geometry sources a reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    Host,
    Link,
}

/// Reference to a model participant.
///
/// Equality and [`ModelRef::stable_key`] depend only on `kind` and
/// `link_instance_id`; the display name is presentation-only and may change
/// between sessions without invalidating stored keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRef {
    pub kind: ModelKind,
    pub link_instance_id: Option<i64>,
    pub display_name: String,
}

impl ModelRef {
    pub fn host(display_name: impl Into<String>) -> Self {
        Self {
            kind: ModelKind::Host,
            link_instance_id: None,
            display_name: display_name.into(),
        }
    }

    pub fn link(link_instance_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            kind: ModelKind::Link,
            link_instance_id: Some(link_instance_id),
            display_name: display_name.into(),
        }
    }

    /// Deterministic string identity, stable across sessions: `"host"` for
    /// the host model, `"link:<id>"` for a link. A link reference without an
    /// id yields `"link:unknown"`.
    pub fn stable_key(&self) -> String {
        match self.kind {
            ModelKind::Host => "host".to_string(),
            ModelKind::Link => match self.link_instance_id {
                Some(id) => format!("link:{id}"),
                None => "link:unknown".to_string(),
            },
        }
    }
}

impl Default for ModelRef {
    fn default() -> Self {
        Self::host("Host Model")
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.link_instance_id == other.link_instance_id
    }
}

impl Eq for ModelRef {}

impl std::hash::Hash for ModelRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.link_instance_id.hash(state);
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_key_ignores_display_name() {
        let a = ModelRef::link(5, "Link: Plumbing");
        let b = ModelRef::link(5, "Link: Plumbing (reloaded)");
        assert_eq!(a, b);
        assert_eq!(a.stable_key(), "link:5");
        assert_eq!(b.stable_key(), a.stable_key());
    }

    #[test]
    fn host_and_link_keys_differ() {
        assert_eq!(ModelRef::host("Host").stable_key(), "host");
        assert_ne!(ModelRef::host("x"), ModelRef::link(1, "x"));
    }

    #[test]
    fn link_without_id_has_fallback_key() {
        let orphan = ModelRef {
            kind: ModelKind::Link,
            link_instance_id: None,
            display_name: "detached".into(),
        };
        assert_eq!(orphan.stable_key(), "link:unknown");
    }
}
