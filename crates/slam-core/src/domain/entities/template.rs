//! Template domain model.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Template (Entity)                            │
//! │  ├─ name: String                              │
//! │  └─ files: Vec<TemplateFile>                  │
//! │       ├─ path: "src/${PACKAGE_NAME}/cli.py"   │
//! │       └─ content: File(text) | Directory      │
//! └───────────────────────────────────────────────┘
//!                    │ render(&SubstitutionMap)
//!                    ▼
//! ┌───────────────────────────────────────────────┐
//! │  Vec<RenderedEntry>  (relative, validated)    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Placeholders follow shell-style `${NAME}` / `$NAME` syntax with `$$` as
//! the escape for a literal dollar sign. Substitution is strict: a
//! placeholder with no value is an error, never passed through.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use chrono::Datelike;

use crate::domain::DomainError;

// ============================================================================
// Template
// ============================================================================

/// What a template entry materializes as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    /// A file whose text may contain placeholders.
    File(String),
    /// A directory that should exist even if nothing is written into it.
    Directory,
}

/// One entry of a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the template root, `/`-separated, may contain
    /// placeholders.
    pub path: String,
    pub content: TemplateContent,
}

impl TemplateFile {
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: TemplateContent::File(content.into()),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: TemplateContent::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.content, TemplateContent::Directory)
    }
}

/// A named tree of template entries, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    files: Vec<TemplateFile>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push(TemplateFile::file(path, content));
        self
    }

    pub fn with_directory(mut self, path: impl Into<String>) -> Self {
        self.files.push(TemplateFile::directory(path));
        self
    }

    pub fn push(&mut self, file: TemplateFile) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Substitute every path and every file body.
    ///
    /// Nothing is returned unless every entry rendered, so callers can write
    /// the result knowing no placeholder is left unresolved.
    pub fn render(&self, values: &SubstitutionMap) -> Result<Vec<RenderedEntry>, DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyTemplate {
                name: self.name.clone(),
            });
        }

        self.files
            .iter()
            .map(|file| {
                let path = values.substitute(&file.path, &format!("path '{}'", file.path))?;
                let path = validate_relative(&path)?;
                let content = match &file.content {
                    TemplateContent::File(body) => {
                        Some(values.substitute(body, &format!("file '{}'", file.path))?)
                    }
                    TemplateContent::Directory => None,
                };
                Ok(RenderedEntry { path, content })
            })
            .collect()
    }
}

/// A template entry after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    /// Relative destination path; never absolute, never contains `..`.
    pub path: PathBuf,
    /// `None` for directories.
    pub content: Option<String>,
}

fn validate_relative(path: &str) -> Result<PathBuf, DomainError> {
    let candidate = Path::new(path);
    if path.is_empty() {
        return Err(DomainError::InvalidTemplate("empty destination path".into()));
    }
    if candidate.is_absolute() || path.starts_with('/') || path.starts_with('\\') {
        return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
    }

    let mut clean = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(DomainError::PathEscapesTarget { path: path.into() });
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
            }
        }
    }
    if clean.as_os_str().is_empty() {
        return Err(DomainError::InvalidTemplate(format!(
            "destination path '{path}' is empty after normalisation"
        )));
    }
    Ok(clean)
}

// ============================================================================
// SubstitutionMap
// ============================================================================

/// Placeholder name → replacement text.
///
/// A `BTreeMap` keeps listings and debug output stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    values: BTreeMap<String, String>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard variables for a project called `project_name`.
    ///
    /// | Variable       | Example (`"My App"`) |
    /// |----------------|----------------------|
    /// | `PROJECT_NAME` | `My App`             |
    /// | `PACKAGE_NAME` | `my_app`             |
    /// | `YEAR`         | current year         |
    pub fn for_project(project_name: &str) -> Self {
        Self::new()
            .with("PROJECT_NAME", project_name)
            .with("PACKAGE_NAME", to_snake_case(project_name))
            .with("YEAR", chrono::Local::now().year().to_string())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse and insert a `KEY=VALUE` pair. The key is trimmed, the value is
    /// kept verbatim.
    pub fn insert_pair(&mut self, pair: &str) -> Result<(), DomainError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| DomainError::InvalidSubstitution { pair: pair.into() })?;
        let key = key.trim();
        if !is_identifier(key) {
            return Err(DomainError::InvalidSubstitution { pair: pair.into() });
        }
        self.insert(key, value);
        Ok(())
    }

    /// Replace every placeholder in `text`.
    ///
    /// `location` only feeds error messages.
    pub fn substitute(&self, text: &str, location: &str) -> Result<String, DomainError> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                out.push('$');
                rest = tail;
            } else if let Some(braced) = after.strip_prefix('{') {
                let end = braced.find('}').ok_or_else(|| DomainError::MalformedPlaceholder {
                    location: location.into(),
                    reason: "unterminated '${'".into(),
                })?;
                let name = &braced[..end];
                if !is_identifier(name) {
                    return Err(DomainError::MalformedPlaceholder {
                        location: location.into(),
                        reason: format!("'${{{name}}}' is not a valid name"),
                    });
                }
                out.push_str(self.lookup(name, location)?);
                rest = &braced[end + 1..];
            } else {
                let len = identifier_len(after);
                if len == 0 {
                    return Err(DomainError::MalformedPlaceholder {
                        location: location.into(),
                        reason: "'$' must be followed by a name, '{' or '$'".into(),
                    });
                }
                out.push_str(self.lookup(&after[..len], location)?);
                rest = &after[len..];
            }
        }

        out.push_str(rest);
        Ok(out)
    }

    fn lookup(&self, name: &str, location: &str) -> Result<&str, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::UnresolvedPlaceholder {
                name: name.into(),
                location: location.into(),
            })
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && identifier_len(s) == s.len()
}

/// Byte length of the identifier prefix of `s` (`[A-Za-z_][A-Za-z0-9_]*`).
fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

// ============================================================================
// Case conversion
// ============================================================================

/// Convert a project name to a Python-importable package name.
///
/// | Input          | Output           |
/// |----------------|------------------|
/// | "MyApp"        | "my_app"         |
/// | "my-app"       | "my_app"         |
/// | "HTTPRequest"  | "http_request"   |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Split on `_`, `-`, `.`, whitespace, camelCase transitions and acronym
/// boundaries (`HTTPRequest` → `http`, `request`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> SubstitutionMap {
        SubstitutionMap::new()
            .with("PACKAGE_NAME", "foo")
            .with("PROJECT_NAME", "Foo Tool")
    }

    #[test]
    fn braced_and_bare_placeholders() {
        let out = values()
            .substitute("${PACKAGE_NAME}.cli and $PROJECT_NAME!", "test")
            .unwrap();
        assert_eq!(out, "foo.cli and Foo Tool!");
    }

    #[test]
    fn dollar_escape() {
        let out = values().substitute("cost: $$5", "test").unwrap();
        assert_eq!(out, "cost: $5");
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let err = values().substitute("${AUTHOR}", "file 'README.md'").unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPlaceholder {
                name: "AUTHOR".into(),
                location: "file 'README.md'".into(),
            }
        );
    }

    #[test]
    fn malformed_placeholders_are_errors() {
        let v = values();
        assert!(matches!(
            v.substitute("${PACKAGE_NAME", "t"),
            Err(DomainError::MalformedPlaceholder { .. })
        ));
        assert!(matches!(
            v.substitute("${not valid}", "t"),
            Err(DomainError::MalformedPlaceholder { .. })
        ));
        assert!(matches!(
            v.substitute("trailing $", "t"),
            Err(DomainError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let text = "plain text, no substitutions\n";
        assert_eq!(values().substitute(text, "t").unwrap(), text);
    }

    #[test]
    fn bare_placeholder_stops_at_non_identifier() {
        let out = values().substitute("$PACKAGE_NAME/cli.py", "t").unwrap();
        assert_eq!(out, "foo/cli.py");
    }

    #[test]
    fn insert_pair_parses_key_value() {
        let mut v = SubstitutionMap::new();
        v.insert_pair("AUTHOR=Ada Lovelace").unwrap();
        v.insert_pair(" URL =https://x?a=b").unwrap();
        assert_eq!(v.get("AUTHOR"), Some("Ada Lovelace"));
        assert_eq!(v.get("URL"), Some("https://x?a=b"));
        assert!(v.insert_pair("novalue").is_err());
        assert!(v.insert_pair("1BAD=x").is_err());
    }

    #[test]
    fn for_project_derives_package_name() {
        let v = SubstitutionMap::for_project("My-Cool App");
        assert_eq!(v.get("PROJECT_NAME"), Some("My-Cool App"));
        assert_eq!(v.get("PACKAGE_NAME"), Some("my_cool_app"));
        assert!(v.get("YEAR").is_some());
    }

    #[test]
    fn snake_case_conversions() {
        assert_eq!(to_snake_case("MyApp"), "my_app");
        assert_eq!(to_snake_case("my-app"), "my_app");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("poetry.slam"), "poetry_slam");
    }

    #[test]
    fn render_substitutes_paths_and_content() {
        let template = Template::new("t")
            .with_file("src/${PACKAGE_NAME}/cli.py", "import ${PACKAGE_NAME}\n")
            .with_directory("test");
        let rendered = template.render(&values()).unwrap();

        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].path, PathBuf::from("src/foo/cli.py"));
        assert_eq!(rendered[0].content.as_deref(), Some("import foo\n"));
        assert_eq!(rendered[1].path, PathBuf::from("test"));
        assert!(rendered[1].content.is_none());
    }

    #[test]
    fn render_rejects_escaping_paths() {
        let v = SubstitutionMap::new().with("NAME", "../outside");
        let template = Template::new("t").with_file("${NAME}/x", "");
        assert!(matches!(
            template.render(&v),
            Err(DomainError::PathEscapesTarget { .. })
        ));

        let v = SubstitutionMap::new().with("NAME", "/etc");
        let template = Template::new("t").with_file("${NAME}/passwd", "");
        assert!(matches!(
            template.render(&v),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn render_empty_template_fails() {
        assert!(matches!(
            Template::new("empty").render(&values()),
            Err(DomainError::EmptyTemplate { .. })
        ));
    }
}
