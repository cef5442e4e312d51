//! `slam config`: show the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, Settings},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, settings: &Settings, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(settings, &key)?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            let serialised = toml::to_string_pretty(&effective(settings)).map_err(|e| {
                CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            output.data(serialised.trim_end())?;
        }

        ConfigCommands::Path => match &settings.config_file {
            Some(path) => output.data(&path.display().to_string())?,
            None => {
                output.info("No config file loaded; using defaults")?;
                if let Some(path) = AppConfig::user_config_path() {
                    output.data(&path.display().to_string())?;
                }
            }
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// The loaded configuration with CLI overrides folded back in.
fn effective(settings: &Settings) -> AppConfig {
    let mut config = settings.config.clone();
    config.toolchain = settings.toolchain.clone();
    config.layout = settings.layout.clone();
    config
}

fn get_config_value(settings: &Settings, key: &str) -> CliResult<String> {
    let config = effective(settings);
    let tc = &config.toolchain;
    let value = match key {
        "toolchain.package_manager" => tc.package_manager.clone(),
        "toolchain.run_through_package_manager" => tc.run_through_package_manager.to_string(),
        "toolchain.sorter" => tc.sorter.to_string(),
        "toolchain.import_remover" => tc.import_remover.to_string(),
        "toolchain.formatter" => tc.formatter.to_string(),
        "toolchain.test_runner" => tc.test_runner.to_string(),
        "layout.vcs_marker" => config.layout.vcs_marker,
        "layout.manifest" => config.layout.manifest,
        "templates.dir" => config
            .templates
            .dir
            .map(|d| d.display().to_string())
            .unwrap_or_default(),
        "templates.default" => config.templates.default,
        "output.no_color" => config.output.no_color.to_string(),
        _ => {
            return Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            });
        }
    };
    Ok(value)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::GlobalArgs;

    fn settings(package_manager: Option<&str>) -> Settings {
        let args = GlobalArgs {
            package_manager: package_manager.map(str::to_owned),
            ..GlobalArgs::default()
        };
        Settings::resolve(&args, AppConfig::default(), PathBuf::from("/p"), None)
    }

    #[test]
    fn get_known_key() {
        assert_eq!(
            get_config_value(&settings(None), "toolchain.package_manager").unwrap(),
            "poetry"
        );
        assert_eq!(
            get_config_value(&settings(None), "layout.manifest").unwrap(),
            "pyproject.toml"
        );
    }

    #[test]
    fn flag_overrides_show_up() {
        assert_eq!(
            get_config_value(&settings(Some("/opt/poetry")), "toolchain.package_manager")
                .unwrap(),
            "/opt/poetry"
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        assert!(matches!(
            get_config_value(&settings(None), "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn list_is_valid_toml() {
        let text = toml::to_string_pretty(&effective(&settings(None))).unwrap();
        assert!(text.contains("package_manager = \"poetry\""));
    }
}
