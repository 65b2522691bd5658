//! Catalog of coding-assistant profiles.
//!
//! The catalog is loaded once at startup from a JSON document (an array of
//! profiles) and never mutated afterwards. Any schema problem is a startup
//! error.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog document embedded in the binary, used when no path is configured.
const BUNDLED_CATALOG: &str = include_str!("../../data/agents.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog entry #{index} in {origin}: {source}")]
    InvalidEntry {
        origin: String,
        index: usize,
        #[source]
        source: ProfileError,
    },

    #[error("Duplicate agent id '{id}' in {origin}")]
    DuplicateId { origin: String, id: String },
}

/// Problem with a single profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("agent id is empty")]
    EmptyId,

    #[error("agent '{0}' has an empty name")]
    EmptyName(String),
}

/// One coding assistant the engine can recommend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Unique identifier, also the tie-break key when scores are equal
    pub id: String,
    /// Display name
    pub name: String,
    /// Supported languages (membership is case-insensitive)
    pub languages: Vec<String>,
    /// Strength tags, in catalog order
    pub strengths: Vec<String>,
    /// Task categories the agent is best at, in catalog order
    #[serde(alias = "bestFor")]
    pub best_for: Vec<String>,
}

impl AgentProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            languages: Vec::new(),
            strengths: Vec::new(),
            best_for: Vec::new(),
        }
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strengths<I, S>(mut self, strengths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strengths = strengths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_best_for<I, S>(mut self, best_for: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.best_for = best_for.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive language membership.
    pub fn supports_language(&self, language: &str) -> bool {
        let wanted = language.to_lowercase();
        self.languages.iter().any(|l| l.to_lowercase() == wanted)
    }

    /// Check the fields a recommendation cannot be built without.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.id.trim().is_empty() {
            return Err(ProfileError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName(self.id.clone()));
        }
        Ok(())
    }
}

/// Immutable snapshot of every known agent, in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<AgentProfile>,
}

impl Catalog {
    /// Load the catalog from `path`, or the bundled document when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Self::from_json(&contents, &path.display().to_string())?
            }
            None => Self::bundled()?,
        };

        tracing::info!(
            "Loaded agent catalog with {} profiles from {}",
            catalog.len(),
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "bundled data/agents.json".to_string())
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG, "bundled catalog")
    }

    /// Parse and validate a JSON array of profiles. `origin` only labels errors.
    pub fn from_json(contents: &str, origin: &str) -> Result<Self, CatalogError> {
        let profiles: Vec<AgentProfile> =
            serde_json::from_str(contents).map_err(|source| CatalogError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        Self::validated(profiles, origin)
    }

    /// Build a catalog from already-constructed profiles.
    pub fn from_profiles(profiles: Vec<AgentProfile>) -> Result<Self, CatalogError> {
        Self::validated(profiles, "in-memory catalog")
    }

    fn validated(profiles: Vec<AgentProfile>, origin: &str) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, profile) in profiles.iter().enumerate() {
            profile
                .validate()
                .map_err(|source| CatalogError::InvalidEntry {
                    origin: origin.to_string(),
                    index,
                    source,
                })?;
            if !seen.insert(profile.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    origin: origin.to_string(),
                    id: profile.id.clone(),
                });
            }
        }
        Ok(Self { profiles })
    }

    /// All profiles, in load order.
    pub fn all(&self) -> &[AgentProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_AGENTS: &str = r#"[
        {"id": "a", "name": "Agent A", "languages": ["Python"], "strengths": ["testing"], "best_for": ["debugging"]},
        {"id": "b", "name": "Agent B", "languages": ["Go"], "strengths": ["concurrency"], "bestFor": ["backend"]}
    ]"#;

    #[test]
    fn from_json_keeps_load_order_and_accepts_both_spellings() {
        let catalog = Catalog::from_json(TWO_AGENTS, "test").unwrap();
        let ids: Vec<_> = catalog.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(catalog.all()[1].best_for, vec!["backend"]);
    }

    #[test]
    fn missing_field_is_fatal() {
        let json = r#"[{"id": "a", "name": "Agent A", "languages": ["Python"], "strengths": []}]"#;
        let err = Catalog::from_json(json, "test").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("best_for"));
    }

    #[test]
    fn duplicate_id_is_fatal() {
        let json = r#"[
            {"id": "a", "name": "One", "languages": [], "strengths": [], "best_for": []},
            {"id": "a", "name": "Two", "languages": [], "strengths": [], "best_for": []}
        ]"#;
        match Catalog::from_json(json, "test") {
            Err(CatalogError::DuplicateId { id, .. }) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn blank_id_or_name_is_fatal() {
        let err = Catalog::from_profiles(vec![AgentProfile::new(" ", "Nameless")]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidEntry {
                index: 0,
                source: ProfileError::EmptyId,
                ..
            }
        ));

        let err = Catalog::from_profiles(vec![
            AgentProfile::new("ok", "Fine"),
            AgentProfile::new("x", ""),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn supports_language_is_case_insensitive() {
        let profile = AgentProfile::new("a", "A").with_languages(["Python", "TypeScript"]);
        assert!(profile.supports_language("python"));
        assert!(profile.supports_language("TYPESCRIPT"));
        assert!(!profile.supports_language("Go"));
        assert!(!profile.supports_language(""));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_AGENTS.as_bytes()).unwrap();

        let catalog = Catalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = Catalog::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn bundled_catalog_covers_prompted_task_types() {
        use crate::analyzer::{SemanticAnalysis, EXAMPLE_TASK_TYPES};
        use crate::recommend::{score, TaskRequest};

        let catalog = Catalog::bundled().unwrap();
        let task = TaskRequest::new("x");
        for task_type in EXAMPLE_TASK_TYPES {
            let analysis = SemanticAnalysis {
                task_type: task_type.to_string(),
                ..Default::default()
            };
            let matched: Vec<&str> = catalog
                .all()
                .iter()
                .filter(|agent| score(&task, agent, Some(&analysis)).breakdown.task_type_match)
                .map(|agent| agent.id.as_str())
                .collect();
            assert!(!matched.is_empty(), "no bundled agent is best for {task_type}");
        }
    }

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = Catalog::load(None).unwrap();
        assert!(!catalog.is_empty());
        for profile in catalog.all() {
            assert!(!profile.languages.is_empty(), "{} has no languages", profile.id);
        }
    }
}
