//! Canvas session: routes pointer and key events to the active tool.

use crate::draw::{Surface, SurfaceError};
use crate::input::events::{Key, MouseButton};
use crate::settings::ToolSettings;
use crate::tools::{DrawingContext, Point, Tool, ToolFactory};
use crate::ui::SettingChange;
use std::path::Path;

/// Called after a settings change with the active tool id and its settings.
pub type SettingsCallback = Box<dyn FnMut(&str, &ToolSettings)>;

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    last: Point,
    start: Point,
    is_drawing: bool,
}

/// The dispatch loop: one committed surface, at most one active tool.
///
/// Every event builds a fresh [`DrawingContext`] from the pointer
/// bookkeeping and the live settings, hands it to the active tool, and
/// drops it again. Only the left button draws.
pub struct CanvasSession<'r> {
    surface: Surface,
    factory: ToolFactory<'r>,
    tool: Option<Box<dyn Tool>>,
    live_settings: Option<ToolSettings>,
    pointer: PointerState,
    on_settings_change: Option<SettingsCallback>,
    needs_redraw: bool,
}

impl<'r> CanvasSession<'r> {
    pub fn new(surface: Surface, factory: ToolFactory<'r>) -> Self {
        Self {
            surface,
            factory,
            tool: None,
            live_settings: None,
            pointer: PointerState::default(),
            on_settings_change: None,
            needs_redraw: true,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    pub fn active_tool(&self) -> Option<&dyn Tool> {
        self.tool.as_deref()
    }

    pub fn active_tool_id(&self) -> Option<&str> {
        self.tool.as_deref().map(|tool| tool.id())
    }

    pub fn is_drawing(&self) -> bool {
        self.pointer.is_drawing
    }

    /// Whether anything visible changed since the last [`Self::mark_redrawn`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn mark_redrawn(&mut self) {
        self.needs_redraw = false;
    }

    /// Live call-time settings consulted before the tool's own settings.
    pub fn set_live_settings(&mut self, settings: Option<ToolSettings>) {
        self.live_settings = settings;
    }

    pub fn set_settings_callback(&mut self, callback: SettingsCallback) {
        self.on_settings_change = Some(callback);
    }

    /// Switches to the tool registered as `id`.
    ///
    /// The outgoing tool is blurred and deactivated first so open input is
    /// committed and live overlays are dropped. An unknown id keeps the
    /// current tool and returns `false`.
    pub fn select_tool(&mut self, id: &str, settings: &ToolSettings) -> bool {
        let Some(mut next) = self.factory.create_instance(id, settings) else {
            return false;
        };

        if self.tool.is_some() {
            self.dispatch(self.pointer.last, |tool, ctx| {
                tool.on_blur(ctx);
                tool.on_deactivate();
            });
            if let Some(old) = self.tool.as_deref() {
                log::debug!("Deactivated tool '{}'", old.id());
            }
        }

        self.pointer.is_drawing = false;
        next.on_activate();
        log::debug!("Activated tool '{}'", next.id());
        self.tool = Some(next);
        self.needs_redraw = true;
        true
    }

    pub fn pointer_press(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }
        self.pointer = PointerState {
            last: (x, y),
            start: (x, y),
            is_drawing: true,
        };
        self.dispatch((x, y), |tool, ctx| tool.on_press(ctx));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.dispatch((x, y), |tool, ctx| tool.on_drag(ctx));
        self.pointer.last = (x, y);
    }

    pub fn pointer_release(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }
        self.dispatch((x, y), |tool, ctx| tool.on_release(ctx));
        self.pointer.last = (x, y);
        self.pointer.is_drawing = false;
    }

    /// Routes a key to the active tool. Returns `true` when it was consumed.
    pub fn key_press(&mut self, key: Key) -> bool {
        let mut consumed = false;
        self.dispatch(self.pointer.last, |tool, ctx| consumed = tool.on_key(key, ctx));
        consumed
    }

    /// The host input lost focus.
    pub fn blur(&mut self) {
        self.dispatch(self.pointer.last, |tool, ctx| tool.on_blur(ctx));
    }

    /// Applies a host control edit to the active tool's settings and
    /// notifies the settings callback.
    pub fn apply_setting(&mut self, change: &SettingChange) -> bool {
        let Some(tool) = self.tool.as_deref_mut() else {
            log::warn!("Setting change with no active tool: {:?}", change);
            return false;
        };
        if !change.apply(tool.settings_mut()) {
            return false;
        }
        if let Some(callback) = self.on_settings_change.as_mut() {
            callback(tool.id(), tool.settings());
        }
        true
    }

    /// Committed pixels with the active preview overlay on top.
    pub fn compose(&self) -> Result<Surface, SurfaceError> {
        let composed = self.surface.duplicate()?;
        if let Some(preview) = self.tool.as_deref().and_then(|tool| tool.preview()) {
            composed.composite(preview, 1.0)?;
        }
        Ok(composed)
    }

    /// Writes the committed surface (without previews) as PNG.
    pub fn export_png(&self, path: &Path) -> Result<(), SurfaceError> {
        self.surface.write_png(path)
    }

    fn dispatch(&mut self, pos: Point, handler: impl FnOnce(&mut dyn Tool, &mut DrawingContext<'_>)) {
        let Some(tool) = self.tool.as_deref_mut() else {
            return;
        };
        let mut ctx = DrawingContext {
            surface: &mut self.surface,
            pos,
            last_pos: self.pointer.last,
            start_pos: self.pointer.start,
            is_drawing: self.pointer.is_drawing,
            settings: self.live_settings.as_ref(),
        };
        handler(tool, &mut ctx);
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;
    use crate::ui::{NumberField, SettingChange};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(registry: &ToolRegistry) -> CanvasSession<'_> {
        CanvasSession::new(Surface::new(80, 80).unwrap(), ToolFactory::new(registry))
    }

    #[test]
    fn unknown_tool_keeps_current_selection() {
        let registry = ToolRegistry::builtin();
        let mut session = session(&registry);
        assert!(session.select_tool("brush", &ToolSettings::default()));
        assert!(!session.select_tool("does-not-exist", &ToolSettings::default()));
        assert_eq!(session.active_tool_id(), Some("brush"));
    }

    #[test]
    fn events_without_a_tool_are_ignored() {
        let registry = ToolRegistry::builtin();
        let mut session = session(&registry);
        session.pointer_press(MouseButton::Left, 10.0, 10.0);
        session.pointer_move(20.0, 20.0);
        session.pointer_release(MouseButton::Left, 20.0, 20.0);
        assert!(!session.key_press(Key::Char('a')));
        assert!(session.surface.is_blank());
    }

    #[test]
    fn switching_tools_mid_drag_drops_the_overlay() {
        let registry = ToolRegistry::builtin();
        let mut session = session(&registry);
        session.select_tool("shape", &ToolSettings::default());
        session.pointer_press(MouseButton::Left, 10.0, 10.0);
        session.pointer_move(40.0, 40.0);
        assert!(session.active_tool().unwrap().preview().is_some());

        session.select_tool("brush", &ToolSettings::default());
        assert!(session.active_tool().unwrap().preview().is_none());
        assert!(!session.is_drawing());
        assert!(session.surface.is_blank());
    }

    #[test]
    fn right_button_does_not_draw() {
        let registry = ToolRegistry::builtin();
        let mut session = session(&registry);
        session.select_tool("eraser", &ToolSettings::default());
        session.surface().fill(crate::draw::RED).unwrap();
        session.pointer_press(MouseButton::Right, 40.0, 40.0);
        assert!(!session.is_drawing());
        assert_eq!(session.surface.pixel(40, 40), Some(crate::draw::RED));
    }

    #[test]
    fn settings_callback_sees_applied_change() {
        let registry = ToolRegistry::builtin();
        let mut session = session(&registry);
        session.select_tool("brush", &ToolSettings::default());

        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        session.set_settings_callback(Box::new(move |id, settings| {
            *sink.borrow_mut() = Some((id.to_string(), settings.size));
        }));

        assert!(session.apply_setting(&SettingChange::Number(NumberField::Size, 12.0)));
        assert_eq!(*seen.borrow(), Some(("brush".to_string(), Some(12.0))));
    }

    #[test]
    fn compose_overlays_the_live_preview() {
        let registry = ToolRegistry::builtin();
        let mut session = session(&registry);
        session.select_tool(
            "shape",
            &ToolSettings {
                filled: Some(true),
                ..Default::default()
            },
        );
        session.pointer_press(MouseButton::Left, 10.0, 10.0);
        session.pointer_move(70.0, 70.0);

        let mut composed = session.compose().unwrap();
        assert!(!composed.is_blank());
        assert!(session.surface.is_blank());
    }
}
