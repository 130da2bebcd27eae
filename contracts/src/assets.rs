use anyhow::{Context, Result};
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// === Embedded balance tables ===
pub const SURVIVAL_TOML_NAME: &str = "survival.toml";
pub const SURVIVAL_TOML: &str = include_str!("../assets/survival.toml");
pub const NEGOTIATION_TOML_NAME: &str = "negotiation.toml";
pub const NEGOTIATION_TOML: &str = include_str!("../assets/negotiation.toml");
pub const CRISIS_TOML_NAME: &str = "crisis.toml";
pub const CRISIS_TOML: &str = include_str!("../assets/crisis.toml");
pub const SCENARIOS_TOML_NAME: &str = "scenarios.toml";
pub const SCENARIOS_TOML: &str = include_str!("../assets/scenarios.toml");

const EMBEDDED: [(&str, &str); 4] = [
    (SURVIVAL_TOML_NAME, SURVIVAL_TOML),
    (NEGOTIATION_TOML_NAME, NEGOTIATION_TOML),
    (CRISIS_TOML_NAME, CRISIS_TOML),
    (SCENARIOS_TOML_NAME, SCENARIOS_TOML),
];

/// Return the embedded text for a known table file, if any.
pub fn default_table_text(name: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, text)| *text)
}

/// Seed missing default tables into a destination directory (idempotent).
/// Returns a list of files that were created.
pub fn write_default_tables(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create_dir_all({:?})", dir))?;

    let mut created = Vec::new();

    for (name, text) in EMBEDDED {
        let path = dir.join(name);
        if !path.exists() {
            fs::write(&path, text).with_context(|| format!("write {:?}", path))?;
            created.push(name.to_string());
        }
    }

    Ok(created)
}

/// Whether a table read came back as the embedded copy or as a local edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrigin {
    Embedded,
    /// File on disk identical to the embedded copy.
    Verified,
    /// File on disk that differs from the embedded copy (unlocked mode).
    Modified,
    /// File on disk with no embedded counterpart.
    Unknown,
}

/// Verified reader with “locked” mode.
///
/// - If `path` exists:
///   - compare blake3(file) with blake3(embedded) when an embedded copy exists;
///   - match → file contents, `Verified`;
///   - mismatch and `locked` → overwrite the file with the embedded copy and
///     return it, `Embedded`;
///   - mismatch and not locked → file contents, `Modified` (callers log it).
/// - If `path` is missing and an embedded copy exists, write it (best effort)
///   and return it.
/// - With no embedded copy for `name`, read the file or return empty.
pub fn read_verified_or_embedded(
    path: &Path,
    name: &str,
    locked: bool,
) -> Result<(Cow<'static, str>, TableOrigin)> {
    let embedded_opt = default_table_text(name);

    if path.exists() {
        let file_bytes = fs::read(path).with_context(|| format!("read {:?}", path))?;
        let local = || -> Cow<'static, str> {
            Cow::Owned(String::from_utf8_lossy(&file_bytes).to_string())
        };
        let Some(embedded) = embedded_opt else {
            return Ok((local(), TableOrigin::Unknown));
        };
        if blake3::hash(&file_bytes) == blake3::hash(embedded.as_bytes()) {
            return Ok((local(), TableOrigin::Verified));
        }
        if locked {
            // Auto-heal: restore canonical embedded
            fs::write(path, embedded).with_context(|| format!("restore embedded {:?}", path))?;
            return Ok((Cow::Borrowed(embedded), TableOrigin::Embedded));
        }
        return Ok((local(), TableOrigin::Modified));
    }

    match embedded_opt {
        Some(embedded) => {
            // Best-effort seed; the caller still gets the embedded text.
            if let Err(err) = seed_file(path, embedded) {
                tracing::warn!("could not seed {}: {err:#}", path.display());
            }
            Ok((Cow::Borrowed(embedded), TableOrigin::Embedded))
        }
        None => Ok((Cow::Owned(String::new()), TableOrigin::Unknown)),
    }
}

fn seed_file(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create_dir_all({:?})", dir))?;
    }
    fs::write(path, text).with_context(|| format!("write {:?}", path))
}

/// Convenience: resolve `<root>/<name>`
pub fn table_path(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}
