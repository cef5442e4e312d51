//! Scaffold Service - template application and manifest initialisation.
//!
//! Both operations are additive:
//! 1. `apply` renders a template and writes only paths that do not exist.
//! 2. `init_existing` appends a defaults block to a manifest exactly once,
//!    via a staged copy renamed over the original.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{PreconditionFailure, ports::Filesystem},
    domain::{ManifestDefaults, ProjectLayout, SubstitutionMap, Template},
    error::SlamResult,
};

/// Applies templates and manifest defaults to a project root.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    layout: ProjectLayout,
}

impl ScaffoldService {
    pub fn new(filesystem: Box<dyn Filesystem>, layout: ProjectLayout) -> Self {
        Self { filesystem, layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Check that `target` is a project root without a manifest.
    pub fn check_new_project(&self, target: &Path) -> SlamResult<()> {
        if !self.filesystem.exists(&self.layout.vcs_path(target)) {
            return Err(PreconditionFailure::NotProjectRoot {
                path: target.to_path_buf(),
                marker: self.layout.vcs_marker.clone(),
            }
            .into());
        }

        let manifest = self.layout.manifest_path(target);
        if self.filesystem.exists(&manifest) {
            return Err(PreconditionFailure::ManifestExists { path: manifest }.into());
        }
        Ok(())
    }

    /// Materialize `template` into `target`, returning the files created.
    ///
    /// Every entry is rendered before the first write, so an unresolved
    /// placeholder leaves `target` untouched. Existing destinations are
    /// skipped with a warning.
    #[instrument(
        skip_all,
        fields(template = %template.name, target = %target.display())
    )]
    pub fn apply(
        &self,
        template: &Template,
        target: &Path,
        values: &SubstitutionMap,
    ) -> SlamResult<Vec<PathBuf>> {
        self.check_new_project(target)?;

        let rendered = template.render(values)?;
        debug!(entries = rendered.len(), "template rendered");

        let mut created = Vec::new();
        for entry in rendered {
            let destination = target.join(&entry.path);
            debug!(path = %destination.display(), "processing");

            let Some(content) = entry.content else {
                if !self.filesystem.exists(&destination) {
                    self.filesystem.create_dir_all(&destination)?;
                }
                continue;
            };

            if let Some(parent) = destination.parent() {
                if !self.filesystem.exists(parent) {
                    self.filesystem.create_dir_all(parent)?;
                }
            }

            if self.filesystem.exists(&destination) {
                warn!(path = %destination.display(), "Skipping existing file");
                continue;
            }

            self.filesystem.write_file(&destination, &content)?;
            info!(path = %destination.display(), "Created");
            created.push(destination);
        }

        Ok(created)
    }

    /// The files `apply` would consider, each with whether it already
    /// exists in `target`. Nothing is written.
    #[instrument(skip_all, fields(template = %template.name))]
    pub fn preview(
        &self,
        template: &Template,
        target: &Path,
        values: &SubstitutionMap,
    ) -> SlamResult<Vec<(PathBuf, bool)>> {
        let rendered = template.render(values)?;
        Ok(rendered
            .into_iter()
            .filter(|entry| entry.content.is_some())
            .map(|entry| {
                let exists = self.filesystem.exists(&target.join(&entry.path));
                (entry.path, exists)
            })
            .collect())
    }

    /// Append `defaults` to the manifest at `manifest`, once.
    ///
    /// The original is copied to `<manifest>.bak`, the updated text is
    /// written to a staged file beside it, and the staged file is renamed
    /// over the manifest. The manifest is never written in place.
    #[instrument(skip_all, fields(manifest = %manifest.display()))]
    pub fn init_existing(&self, manifest: &Path, defaults: &ManifestDefaults) -> SlamResult<()> {
        if !self.filesystem.exists(manifest) {
            return Err(PreconditionFailure::ManifestMissing {
                path: manifest.to_path_buf(),
            }
            .into());
        }

        let original = self.filesystem.read_to_string(manifest)?;
        if defaults.is_applied_to(&original) {
            warn!(marker = defaults.marker(), "defaults already present");
            return Err(PreconditionFailure::DefaultsAlreadyApplied {
                path: manifest.to_path_buf(),
            }
            .into());
        }

        let backup = sibling(manifest, "bak");
        self.filesystem.copy(manifest, &backup)?;
        info!(backup = %backup.display(), "backed up manifest");

        let staged = sibling(manifest, &format!("{}.staged", uuid::Uuid::new_v4().simple()));
        let result = self
            .filesystem
            .write_file(&staged, &defaults.append_to(&original))
            .and_then(|()| self.filesystem.rename(&staged, manifest));

        if let Err(e) = result {
            if self.filesystem.exists(&staged) {
                if let Err(cleanup) = self.filesystem.remove_file(&staged) {
                    warn!(error = %cleanup, path = %staged.display(), "failed to remove staged manifest");
                }
            }
            return Err(e);
        }

        info!("defaults applied");
        Ok(())
    }
}

/// `pyproject.toml` + `bak` → `pyproject.toml.bak`, in the same directory.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
