use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::Domain;
use crate::assets::{SCENARIOS_TOML, SCENARIOS_TOML_NAME};
use crate::tables::TableError;

/// One playable scenario: identity plus the numbers a new session starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub domain: Domain,
    pub objectives: Vec<String>,
    #[serde(default)]
    pub initial_state: BTreeMap<String, i64>,
}

/// Read-only scenario registry. Hosts use it to seed sessions; resolution
/// never consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    pub fn from_toml(text: &str) -> Result<Self, TableError> {
        let catalog: ScenarioCatalog = toml::from_str(text).map_err(|source| TableError::Parse {
            file: SCENARIOS_TOML_NAME.to_string(),
            source,
        })?;
        let mut seen = std::collections::BTreeSet::new();
        for s in &catalog.scenarios {
            if !seen.insert(s.id.as_str()) {
                return Err(TableError::Invalid {
                    path: format!("scenarios.{}", s.id),
                    reason: "duplicate scenario id".into(),
                });
            }
        }
        Ok(catalog)
    }

    pub fn embedded() -> Result<Self, TableError> {
        Self::from_toml(SCENARIOS_TOML)
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn for_domain(&self, domain: Domain) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(move |s| s.domain == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Fresh copy of a scenario's starting values for a new session.
    pub fn initial_state(&self, id: &str) -> Option<BTreeMap<String, i64>> {
        self.get(id).map(|s| s.initial_state.clone())
    }
}
