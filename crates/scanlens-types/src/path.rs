use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical scan-root-relative path, as used for report keys.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - no leading `/` (keys are relative to the scan root)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ScanPath(String);

impl ScanPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        while v.starts_with('/') {
            v = v.trim_start_matches('/').to_string();
        }
        Self(v)
    }

    /// The relative key for `path` under `root`, or `None` when `path` is
    /// not inside `root`.
    pub fn relative_to(root: &Utf8Path, path: &Utf8Path) -> Option<ScanPath> {
        path.strip_prefix(root).ok().map(|p| ScanPath::new(p.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }
}

impl std::fmt::Display for ScanPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScanPath {
    fn from(value: &str) -> Self {
        ScanPath::new(value)
    }
}
