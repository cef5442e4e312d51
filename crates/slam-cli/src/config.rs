//! Application configuration.
//!
//! [`AppConfig`] is what the layered sources say; [`Settings`] is what a
//! command actually runs with, after CLI flags are applied on top. Both are
//! built once in `main` and passed down; the core crate never sees either.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied in [`Settings::resolve`])
//! 2. Environment variables, `SLAM__SECTION__KEY`
//!    (e.g. `SLAM__TOOLCHAIN__PACKAGE_MANAGER=/opt/poetry`)
//! 3. Config file: `--config`, else `<project>/slam.toml`, else the user
//!    config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use slam_core::domain::{ProjectLayout, Toolchain};

use crate::cli::{GlobalArgs, LogLevel};

/// Name of the per-project config file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "slam.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which tools run, and how.
    pub toolchain: Toolchain,
    /// What identifies a project root.
    pub layout: ProjectLayout,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of user templates, searched before the built-in ones.
    pub dir: Option<PathBuf>,
    /// Template used by `slam new` without `--template`.
    pub default: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: None,
            default: slam_adapters::template_store::DEFAULT_TEMPLATE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from `file` (if any) and the environment on top of
    /// the built-in defaults.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );

        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("SLAM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Pick the config file: `explicit` if given, else the first of
    /// `<project_root>/slam.toml` and [`Self::user_config_path`] that exists.
    pub fn locate(explicit: Option<&Path>, project_root: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let project = project_root.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }
        Self::user_config_path().filter(|p| p.is_file())
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "slam").map(|d| d.config_dir().join("config.toml"))
    }
}

/// Everything a command needs to know, resolved once.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Stream tool output rather than capture it.
    pub verbose: bool,
    pub log_level: LogLevel,
    pub project_root: PathBuf,
    pub toolchain: Toolchain,
    pub layout: ProjectLayout,
    pub templates_dir: Option<PathBuf>,
    pub default_template: String,
    /// The config file that was loaded, if any.
    pub config_file: Option<PathBuf>,
    /// The merged configuration, for `slam config`.
    pub config: AppConfig,
}

impl Settings {
    /// Apply CLI flags on top of the loaded configuration.
    pub fn resolve(
        args: &GlobalArgs,
        config: AppConfig,
        project_root: PathBuf,
        config_file: Option<PathBuf>,
    ) -> Self {
        let mut toolchain = config.toolchain.clone();
        if let Some(pm) = &args.package_manager {
            toolchain = toolchain.with_package_manager(pm.clone());
        }

        Self {
            verbose: args.verbose,
            log_level: args.log_level.unwrap_or_default(),
            project_root,
            toolchain,
            layout: config.layout.clone(),
            templates_dir: config.templates.dir.clone(),
            default_template: config.templates.default.clone(),
            config_file,
            config,
        }
    }
}
