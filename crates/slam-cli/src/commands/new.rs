//! Implementation of the `slam new` command.
//!
//! Responsibility: resolve the template and substitution values, call the
//! core scaffold service, and display results.

use std::path::Path;

use tracing::{debug, info, instrument};

use slam_adapters::LocalFilesystem;
use slam_core::{
    application::{ScaffoldService, ports::TemplateStore},
    domain::SubstitutionMap,
    error::SlamError,
};

use crate::{
    cli::NewArgs,
    config::Settings,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `slam new` command.
///
/// Dispatch sequence:
/// 1. Resolve project name and substitution values
/// 2. Load the template
/// 3. Check the project root preconditions
/// 4. Early-exit if `--dry-run`
/// 5. Confirm with user unless `--yes` or `--quiet`
/// 6. Apply the template
#[instrument(skip_all, fields(template = tracing::field::Empty))]
pub fn execute(args: NewArgs, settings: &Settings, output: &OutputManager) -> CliResult<()> {
    let root = &settings.project_root;

    // 1. Values
    let name = match &args.name {
        Some(name) => name.clone(),
        None => project_name(root)?,
    };
    let values = substitutions(&name, &args.vars)?;
    debug!(project = %name, values = values.len(), "substitutions resolved");

    // 2. Template
    let template_name = args
        .template
        .clone()
        .unwrap_or_else(|| settings.default_template.clone());
    tracing::Span::current().record("template", template_name.as_str());
    let template = super::template_store(settings, args.templates_dir.as_deref())
        .get(&template_name)?;

    // 3. Preconditions
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()), settings.layout.clone());
    service.check_new_project(root)?;

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        let planned = service.preview(&template, root, &values)?;
        output.header(&format!(
            "Dry run: '{template_name}' would write into {}",
            root.display()
        ))?;
        for (path, exists) in planned {
            if exists {
                output.warning(&format!("skip    {} (exists)", path.display()))?;
            } else {
                output.print(&format!("  create  {}", path.display()))?;
            }
        }
        return Ok(());
    }

    // 5. Confirm
    if !args.yes && !output.is_quiet() {
        let prompt = format!(
            "Apply template '{template_name}' to {} as '{name}'?",
            root.display()
        );
        if !output.confirm(&prompt, true)? {
            return Err(CliError::Cancelled);
        }
    }

    // 6. Apply
    info!(project = %name, path = %root.display(), "scaffold started");
    let result = service.apply(&template, root, &values).map_err(CliError::from);
    if let Ok(created) = &result {
        for path in created {
            let shown = path.strip_prefix(root).unwrap_or(path);
            output.info(&format!("Created {}", shown.display()))?;
        }
    }
    super::report(output, "new", result).map(|_| ())
}

/// The project root's directory name.
fn project_name(root: &Path) -> CliResult<String> {
    let absolute = std::path::absolute(root)?;
    absolute
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::InvalidInput {
            message: format!(
                "cannot derive a project name from {}; pass --name",
                root.display()
            ),
            source: None,
        })
}

/// Standard values for `name`, then each `KEY=VALUE` from `--var`.
fn substitutions(name: &str, vars: &[String]) -> CliResult<SubstitutionMap> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "project name cannot be empty".into(),
            source: None,
        });
    }

    let mut values = SubstitutionMap::for_project(name);
    for pair in vars {
        values.insert_pair(pair).map_err(SlamError::from)?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_from_directory() {
        assert_eq!(project_name(Path::new("/work/my-tool")).unwrap(), "my-tool");
    }

    #[test]
    fn vars_extend_standard_values() {
        let values = substitutions("my-tool", &["AUTHOR=me".to_string()]).unwrap();
        assert_eq!(values.get("PROJECT_NAME"), Some("my-tool"));
        assert_eq!(values.get("PACKAGE_NAME"), Some("my_tool"));
        assert_eq!(values.get("AUTHOR"), Some("me"));
    }

    #[test]
    fn vars_can_override_standard_values() {
        let values = substitutions("my-tool", &["PACKAGE_NAME=tool".to_string()]).unwrap();
        assert_eq!(values.get("PACKAGE_NAME"), Some("tool"));
    }

    #[test]
    fn malformed_var_is_user_error() {
        let err = substitutions("x", &["NOEQUALS".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(
            substitutions(" ", &[]),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
