//! What makes a directory a project root, and the defaults `init` appends
//! to an existing manifest.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File names that identify a project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    /// Version-control metadata that must exist at the root (`.git`).
    pub vcs_marker: String,
    /// The project's manifest file (`pyproject.toml`).
    pub manifest: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            vcs_marker: ".git".into(),
            manifest: "pyproject.toml".into(),
        }
    }
}

impl ProjectLayout {
    pub fn vcs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.vcs_marker)
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest)
    }
}

/// Sentinel comment that marks a manifest as already initialised.
pub const DEFAULTS_MARKER: &str = "# slam: defaults applied";

const STANDARD_BLOCK: &str = r#"
[tool.isort]
profile = "black"
src_paths = ["src", "test"]

[tool.black]
line-length = 100

[tool.autoflake]
remove-all-unused-imports = true
in-place = true
recursive = true

[tool.pytest.ini_options]
testpaths = ["test"]
"#;

/// A block of manifest text appended once by `init`.
///
/// The marker is written as the first line of the appended block, so a
/// second `init` can tell the manifest has already been touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDefaults {
    marker: String,
    body: String,
}

impl ManifestDefaults {
    pub fn new(marker: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            body: body.into(),
        }
    }

    /// Tool configuration for isort, black, autoflake and pytest.
    pub fn standard() -> Self {
        Self::new(DEFAULTS_MARKER, STANDARD_BLOCK)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_applied_to(&self, manifest: &str) -> bool {
        manifest.contains(&self.marker)
    }

    /// `manifest` followed by the marker line and the block.
    pub fn append_to(&self, manifest: &str) -> String {
        let mut out = String::with_capacity(manifest.len() + self.marker.len() + self.body.len() + 2);
        out.push_str(manifest);
        if !manifest.is_empty() && !manifest.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.marker);
        out.push('\n');
        out.push_str(self.body.trim_start_matches('\n'));
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
