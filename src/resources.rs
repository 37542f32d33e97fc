//! Named templates and the readiness signal.
//!
//! The field does nothing until resources report ready. Whatever loads the
//! templates (the built-in generator here, an asset loader elsewhere) fills
//! the registry and then calls [`Resources::mark_ready`] once.

use std::collections::HashMap;

use tracing::debug;

use crate::error::ResourceError;
use crate::scene::{template, Node};

/// Registry of template nodes keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    templates: HashMap<String, Node>,
    ready: bool,
}

impl Resources {
    /// Empty, not-yet-ready registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in neuron template, already ready.
    pub fn with_defaults() -> Self {
        let mut resources = Self::new();
        resources.insert(template::NEURON, template::neuron());
        resources.mark_ready();
        resources
    }

    /// Register (or replace) a template.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        debug!(template = %name, meshes = node.paintable_count(), "Registered template");
        self.templates.insert(name, node);
    }

    /// Signal that loading has finished.
    ///
    /// Returns `true` only for the call that flipped the registry to ready.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready {
            return false;
        }
        self.ready = true;
        debug!(templates = self.templates.len(), "Resources ready");
        true
    }

    /// Whether [`mark_ready`](Self::mark_ready) has been called.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// `true` when no template is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Fetch a template that can be instantiated.
    ///
    /// Fails if the registry is not ready, the name is unknown, or the
    /// template has no mesh the flash animation could color.
    pub fn template(&self, name: &str) -> Result<&Node, ResourceError> {
        if !self.ready {
            return Err(ResourceError::NotReady);
        }
        let node = self
            .templates
            .get(name)
            .ok_or_else(|| ResourceError::Missing(name.to_string()))?;
        if node.paintable_count() == 0 {
            return Err(ResourceError::NoPaintablePrimitives(name.to_string()));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_until_marked() {
        let mut res = Resources::new();
        res.insert("neuron", template::neuron());
        assert_eq!(res.template("neuron").unwrap_err(), ResourceError::NotReady);

        assert!(res.mark_ready());
        assert!(!res.mark_ready());
        assert!(res.template("neuron").is_ok());
    }

    #[test]
    fn test_missing_template() {
        let res = Resources::with_defaults();
        assert_eq!(
            res.template("mouse").unwrap_err(),
            ResourceError::Missing("mouse".into())
        );
    }

    #[test]
    fn test_template_without_meshes_rejected() {
        let mut res = Resources::new();
        res.insert("empty", Node::group("empty"));
        res.mark_ready();
        assert_eq!(
            res.template("empty").unwrap_err(),
            ResourceError::NoPaintablePrimitives("empty".into())
        );
    }
}
