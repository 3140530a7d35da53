//! # Editor Plugins
//!
//! A plugin extends the event-action pipeline by appending interceptors to
//! the lists collected so far. Plugins are applied in registration order, so
//! later plugins see (and must preserve) everything earlier ones added.

use crate::event_actions::ProviderProps;

/// Extension of the event-action pipeline
pub trait EditorPlugin<S>: Send + Sync {
    /// Unique plugin name
    fn name(&self) -> &str;

    /// Return `props` with this plugin's interceptors appended
    fn extend(&self, props: ProviderProps<S>) -> ProviderProps<S>;
}

/// Registered plugins, in mount order
pub struct PluginRegistry<S> {
    plugins: Vec<Box<dyn EditorPlugin<S>>>,
}

impl<S> PluginRegistry<S> {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Mount a plugin. A plugin with the same name is replaced in place.
    pub fn register(&mut self, plugin: Box<dyn EditorPlugin<S>>) {
        tracing::info!(plugin = plugin.name(), "mounting editor plugin");

        match self.plugins.iter().position(|p| p.name() == plugin.name()) {
            Some(index) => self.plugins[index] = plugin,
            None => self.plugins.push(plugin),
        }
    }

    /// Unmount and drop a plugin by name
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|p| p.name() != name);
        let removed = self.plugins.len() != before;

        if removed {
            tracing::info!(plugin = name, "unmounted editor plugin");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Collect interceptor lists from every plugin, starting from `props`
    pub fn props_from(&self, props: ProviderProps<S>) -> ProviderProps<S> {
        self.plugins
            .iter()
            .fold(props, |props, plugin| plugin.extend(props))
    }

    pub fn props(&self) -> ProviderProps<S> {
        self.props_from(ProviderProps::default())
    }
}

impl<S> Default for PluginRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
