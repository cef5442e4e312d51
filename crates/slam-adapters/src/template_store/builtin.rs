//! Templates that ship inside the `slam` binary.

use slam_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::Template,
    error::SlamResult,
};

/// Name of the template used when `slam new` is given no `--template`.
pub const DEFAULT_TEMPLATE: &str = "default";

// Sorted by path, the same order a directory walk produces.
const DEFAULT_FILES: &[(&str, &str)] = &[
    (
        "README.md",
        include_str!("../../templates/default/README.md"),
    ),
    (
        "pyproject.toml",
        include_str!("../../templates/default/pyproject.toml"),
    ),
    (
        "src/${PACKAGE_NAME}/__init__.py",
        include_str!("../../templates/default/src/${PACKAGE_NAME}/__init__.py"),
    ),
    (
        "src/${PACKAGE_NAME}/cli.py",
        include_str!("../../templates/default/src/${PACKAGE_NAME}/cli.py"),
    ),
    (
        "test/test_${PACKAGE_NAME}.py",
        include_str!("../../templates/default/test/test_${PACKAGE_NAME}.py"),
    ),
];

/// Read-only store over the compiled-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplateStore;

impl BuiltinTemplateStore {
    pub fn new() -> Self {
        Self
    }

    fn build(name: &str) -> Option<Template> {
        let files = match name {
            DEFAULT_TEMPLATE => DEFAULT_FILES,
            _ => return None,
        };
        Some(
            files
                .iter()
                .fold(Template::new(name), |t, (path, body)| t.with_file(*path, *body)),
        )
    }
}

impl TemplateStore for BuiltinTemplateStore {
    fn list(&self) -> SlamResult<Vec<String>> {
        Ok(vec![DEFAULT_TEMPLATE.to_string()])
    }

    fn get(&self, name: &str) -> SlamResult<Template> {
        Self::build(name).ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }
}
