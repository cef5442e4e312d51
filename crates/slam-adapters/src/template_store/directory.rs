//! Filesystem-backed template store.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── default/
//! │   ├── pyproject.toml
//! │   └── src/
//! │       └── ${PACKAGE_NAME}/
//! │           └── cli.py
//! └── flask/
//!     └── ...
//! ```
//!
//! Each subdirectory of the root is a template named after the directory.
//! Entries are enumerated depth-first in file-name order, so a template
//! always renders in the same sequence.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use slam_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Template, TemplateFile},
    error::SlamResult,
};

/// Loads templates from subdirectories of `root`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the tree under `dir` as a template called `name`.
    #[instrument(skip_all, fields(template = name, dir = %dir.display()))]
    pub fn load_dir(name: &str, dir: &Path) -> SlamResult<Template> {
        let load_error = |reason: String| ApplicationError::TemplateLoad {
            name: name.to_string(),
            reason,
        };

        let mut template = Template::new(name);
        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| load_error(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(dir)
                .map_err(|e| load_error(e.to_string()))?;
            let path = normalize_path(relative)
                .ok_or_else(|| load_error(format!("non UTF-8 path {}", relative.display())))?;

            if entry.file_type().is_dir() {
                template.push(TemplateFile::directory(path));
            } else if entry.file_type().is_file() {
                let body = fs::read_to_string(entry.path())
                    .map_err(|e| load_error(format!("{path}: {e}")))?;
                template.push(TemplateFile::file(path, body));
            } else {
                warn!(path = %entry.path().display(), "skipping non-regular template entry");
            }
        }

        debug!(entries = template.len(), "template loaded");
        Ok(template)
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn list(&self) -> SlamResult<Vec<String>> {
        if !self.root.is_dir() {
            debug!(root = %self.root.display(), "template directory missing");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|e| ApplicationError::FilesystemError {
            path: self.root.clone(),
            reason: e.to_string(),
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();
        Ok(names)
    }

    fn get(&self, name: &str) -> SlamResult<Template> {
        let not_found = || ApplicationError::TemplateNotFound {
            name: name.to_string(),
        };

        // A name is a single directory component, never a path.
        let mut components = Path::new(name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(not_found().into());
        }

        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(not_found().into());
        }
        Self::load_dir(name, &dir)
    }
}

/// Relative path with `/` separators on every platform.
fn normalize_path(path: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = path.components().map(|c| c.as_os_str().to_str()).collect();
    parts.map(|p| p.join("/"))
}
