//! Template storage adapters.
//!
//! - [`BuiltinTemplateStore`]: templates compiled into the binary.
//! - [`DirectoryTemplateStore`]: one subdirectory per template on disk.
//! - [`LayeredTemplateStore`]: several stores searched in order, so user
//!   templates can shadow the built-in ones.

mod builtin;
mod directory;

pub use builtin::{BuiltinTemplateStore, DEFAULT_TEMPLATE};
pub use directory::DirectoryTemplateStore;

use std::collections::BTreeSet;

use tracing::debug;

use slam_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::Template,
    error::{SlamError, SlamResult},
};

/// Searches each store in order; the first store that has a template wins.
pub struct LayeredTemplateStore {
    layers: Vec<Box<dyn TemplateStore>>,
}

impl LayeredTemplateStore {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a store searched after every store added before it.
    pub fn with_layer(mut self, store: impl TemplateStore + 'static) -> Self {
        self.layers.push(Box::new(store));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayeredTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for LayeredTemplateStore {
    fn list(&self) -> SlamResult<Vec<String>> {
        let mut names = BTreeSet::new();
        for layer in &self.layers {
            names.extend(layer.list()?);
        }
        Ok(names.into_iter().collect())
    }

    fn get(&self, name: &str) -> SlamResult<Template> {
        for (index, layer) in self.layers.iter().enumerate() {
            match layer.get(name) {
                Ok(template) => {
                    debug!(name, layer = index, "template resolved");
                    return Ok(template);
                }
                Err(SlamError::Application(ApplicationError::TemplateNotFound { .. })) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(ApplicationError::TemplateNotFound {
            name: name.to_string(),
        }
        .into())
    }
}
