//! Tool instantiation by id.

use super::Tool;
use super::registry::ToolRegistry;
use crate::settings::ToolSettings;
use crate::ui::SettingsView;

/// Stateless constructor front-end over a [`ToolRegistry`].
///
/// Unknown identifiers never fail loudly: they log a warning and yield
/// `None` (or a neutral settings view) so tool switching stays responsive.
#[derive(Debug, Clone, Copy)]
pub struct ToolFactory<'r> {
    registry: &'r ToolRegistry,
}

impl ToolFactory<'static> {
    /// Factory over the process-wide registry.
    pub fn global() -> Self {
        Self {
            registry: ToolRegistry::global(),
        }
    }
}

impl<'r> ToolFactory<'r> {
    pub fn new(registry: &'r ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ToolRegistry {
        self.registry
    }

    /// New tool instance with `settings` shallow-merged over the registry
    /// defaults, or `None` for an unknown id.
    pub fn create_instance(&self, id: &str, settings: &ToolSettings) -> Option<Box<dyn Tool>> {
        match self.registry.get(id) {
            Some(def) => {
                log::debug!("Creating tool instance '{}'", id);
                Some(def.instantiate(settings))
            }
            None => {
                log::warn!("Unknown tool id '{}'", id);
                None
            }
        }
    }

    /// Settings panel description for `id`, or a neutral placeholder for an
    /// unknown id.
    pub fn create_settings_view(&self, id: &str, settings: &ToolSettings) -> SettingsView {
        match self.create_instance(id, settings) {
            Some(tool) => tool.render_settings(),
            None => SettingsView::none(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Resolved;

    #[test]
    fn unknown_id_yields_none() {
        let registry = ToolRegistry::builtin();
        let factory = ToolFactory::new(&registry);
        assert!(factory.create_instance("nonexistent-tool", &ToolSettings::default()).is_none());
        assert!(factory
            .create_settings_view("nonexistent-tool", &ToolSettings::default())
            .is_empty());
    }

    #[test]
    fn caller_size_overrides_brush_default() {
        let registry = ToolRegistry::builtin();
        let factory = ToolFactory::new(&registry);
        let brush = factory
            .create_instance("brush", &ToolSettings::default().with_size(10.0))
            .unwrap();
        let resolved = Resolved::new(None, brush.settings());
        assert_eq!(resolved.size(), 10.0);
        assert_eq!(resolved.color(), crate::draw::BLACK);
    }

    #[test]
    fn empty_settings_resolve_to_engine_defaults() {
        let registry = ToolRegistry::builtin();
        let brush = ToolFactory::new(&registry)
            .create_instance("brush", &ToolSettings::default())
            .unwrap();
        let resolved = Resolved::new(None, brush.settings());
        assert_eq!(resolved.size(), 5.0);
        assert_eq!(resolved.color(), crate::draw::BLACK);
        assert_eq!(resolved.opacity(), 1.0);
        assert!(!resolved.symmetry((0.0, 0.0)).enabled);
    }

    #[test]
    fn settings_view_lists_tool_controls() {
        let registry = ToolRegistry::builtin();
        let view = ToolFactory::new(&registry).create_settings_view("shape", &ToolSettings::default());
        assert_eq!(view.tool_id, "shape");
        assert!(!view.is_empty());
    }
}
