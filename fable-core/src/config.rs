use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::assets::{
    read_verified_or_embedded, table_path, TableOrigin, CRISIS_TOML_NAME, NEGOTIATION_TOML_NAME,
    SURVIVAL_TOML_NAME,
};
use contracts::tables::DomainTables;

use crate::engine::Resolver;
use crate::random::{EntropySource, RandomSource, SeededSource};

pub const CONFIG_FILE_NAME: &str = "fable.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub rng: RngConfig,
}

impl EngineConfig {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        let mut cfg = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str::<EngineConfig>(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        } else {
            tracing::info!(
                "No config file found at {}. Using EngineConfig::default().",
                path.display()
            );
            EngineConfig::default()
        };
        cfg.resolve_paths(root);
        Ok(cfg)
    }

    fn resolve_paths(&mut self, root: &Path) {
        self.tables.path = absolutize(root, &self.tables.path);
    }

    /// Seeded source when `[rng] seed` is set, process entropy otherwise.
    ///
    /// A fixed seed makes every call replay the same draws, which is what
    /// deterministic test runs want and live play does not.
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.rng.seed {
            Some(seed) => Box::new(SeededSource::new(seed)),
            None => Box::new(EntropySource::new()),
        }
    }

    /// Load the balance tables this config points at.
    pub fn load_tables(&self) -> Result<DomainTables> {
        if !self.tables.use_files {
            return DomainTables::embedded().context("parsing embedded tables");
        }
        let dir = &self.tables.path;
        let read = |name: &str| -> Result<String> {
            let path = table_path(dir, name);
            let (text, origin) = read_verified_or_embedded(&path, name, self.tables.locked)?;
            if origin == TableOrigin::Modified {
                tracing::warn!("table {} differs from the embedded copy; using local edits", path.display());
            }
            Ok(text.into_owned())
        };
        let survival = read(SURVIVAL_TOML_NAME)?;
        let negotiation = read(NEGOTIATION_TOML_NAME)?;
        let crisis = read(CRISIS_TOML_NAME)?;
        DomainTables::from_sources(&survival, &negotiation, &crisis)
            .with_context(|| format!("loading tables from {}", dir.display()))
    }
}

impl Resolver {
    pub fn from_config(cfg: &EngineConfig) -> Result<Self> {
        Ok(Resolver::new(cfg.load_tables()?))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "SystemConfig::default_name")]
    pub name: String,
    #[serde(default = "SystemConfig::default_version")]
    pub version: String,
}

impl SystemConfig {
    fn default_name() -> String {
        "fable".to_string()
    }

    fn default_version() -> String {
        "0.1.0".to_string()
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            version: Self::default_version(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    #[serde(default = "TablesConfig::default_path")]
    pub path: PathBuf,
    /// Read tables from `path` instead of the compiled-in copies.
    #[serde(default)]
    pub use_files: bool,
    /// Restore the embedded copy whenever a file on disk drifts from it.
    #[serde(default)]
    pub locked: bool,
}

impl TablesConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("tables")
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            use_files: false,
            locked: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RngConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

fn absolutize(root: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        root.join(value)
    }
}
