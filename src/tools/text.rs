//! Click-to-place text with a single inline input session.

use super::{DrawingContext, Point, Tool, draw_on};
use crate::draw::render;
use crate::input::Key;
use crate::settings::{Resolved, ToolSettings};
use crate::ui::SettingsView;

/// An open input session anchored at the press position.
#[derive(Debug, Clone, PartialEq)]
struct TextEntry {
    origin: Point,
    buffer: String,
}

/// Text tool.
///
/// The first press opens an input session at the pointer; further presses
/// are ignored until it closes. Return or blur draws the buffered text onto
/// the committed surface, Escape closes the session without drawing.
#[derive(Debug)]
pub struct TextTool {
    id: String,
    settings: ToolSettings,
    entry: Option<TextEntry>,
}

impl TextTool {
    pub fn new(id: &str, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            settings,
            entry: None,
        }
    }

    /// Whether an input session is open.
    pub fn is_editing(&self) -> bool {
        self.entry.is_some()
    }

    /// Text typed so far in the open session.
    pub fn pending_text(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.buffer.as_str())
    }

    fn commit(&mut self, ctx: &mut DrawingContext<'_>) {
        let Some(entry) = self.entry.take() else {
            return;
        };
        if entry.buffer.is_empty() {
            log::debug!("Text input closed empty");
            return;
        }

        let resolved = ctx.resolve(&self.settings);
        let color = resolved.stroke_color();
        let size = resolved.font_size();
        let font = resolved.font();
        draw_on(ctx.surface, |cr| {
            render::render_text(cr, entry.origin.0, entry.origin.1, &entry.buffer, color, size, &font);
        });
        log::debug!("Committed {} chars of text", entry.buffer.chars().count());
    }
}

impl Tool for TextTool {
    fn id(&self) -> &str {
        &self.id
    }

    fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    fn on_press(&mut self, ctx: &mut DrawingContext<'_>) {
        if self.entry.is_some() {
            log::debug!("Text input already open, ignoring press");
            return;
        }
        self.entry = Some(TextEntry {
            origin: ctx.pos,
            buffer: String::new(),
        });
    }

    fn on_drag(&mut self, _ctx: &mut DrawingContext<'_>) {}

    fn on_release(&mut self, _ctx: &mut DrawingContext<'_>) {}

    fn on_deactivate(&mut self) {
        if self.entry.take().is_some() {
            log::debug!("Discarded open text input on deactivate");
        }
    }

    fn on_key(&mut self, key: Key, ctx: &mut DrawingContext<'_>) -> bool {
        let Some(entry) = self.entry.as_mut() else {
            return false;
        };
        match key {
            Key::Char(c) => entry.buffer.push(c),
            Key::Space => entry.buffer.push(' '),
            Key::Backspace => {
                entry.buffer.pop();
            }
            Key::Return => self.commit(ctx),
            Key::Escape => {
                self.entry = None;
                log::debug!("Text input cancelled");
            }
            _ => return false,
        }
        true
    }

    fn on_blur(&mut self, ctx: &mut DrawingContext<'_>) {
        self.commit(ctx);
    }

    fn render_settings(&self) -> SettingsView {
        let resolved = Resolved::new(None, &self.settings);
        let mut view = SettingsView::new(&self.id, "Text").with_core(&resolved);
        // Stroke size does not apply to text.
        view.controls.remove(0);
        view.with_text(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Surface;

    fn press(tool: &mut TextTool, surface: &mut Surface, pos: Point) {
        let mut ctx = DrawingContext::at(surface, pos);
        ctx.is_drawing = true;
        tool.on_press(&mut ctx);
    }

    fn key(tool: &mut TextTool, surface: &mut Surface, key: Key) -> bool {
        let mut ctx = DrawingContext::at(surface, (0.0, 0.0));
        tool.on_key(key, &mut ctx)
    }

    #[test]
    fn second_press_keeps_the_first_session() {
        let mut surface = Surface::new(100, 60).unwrap();
        let mut tool = TextTool::new("text", ToolSettings::default());
        press(&mut tool, &mut surface, (10.0, 10.0));
        key(&mut tool, &mut surface, Key::Char('a'));
        press(&mut tool, &mut surface, (50.0, 40.0));
        assert_eq!(tool.pending_text(), Some("a"));
        assert_eq!(tool.entry.as_ref().unwrap().origin, (10.0, 10.0));
    }

    #[test]
    fn editing_keys_update_the_buffer() {
        let mut surface = Surface::new(100, 60).unwrap();
        let mut tool = TextTool::new("text", ToolSettings::default());
        assert!(!key(&mut tool, &mut surface, Key::Char('x')));
        press(&mut tool, &mut surface, (10.0, 10.0));
        for k in [Key::Char('h'), Key::Char('i'), Key::Space, Key::Char('!'), Key::Backspace] {
            assert!(key(&mut tool, &mut surface, k));
        }
        assert_eq!(tool.pending_text(), Some("hi "));
        assert!(!key(&mut tool, &mut surface, Key::Tab));
    }

    #[test]
    fn escape_cancels_without_drawing() {
        let mut surface = Surface::new(100, 60).unwrap();
        let mut tool = TextTool::new("text", ToolSettings::default());
        press(&mut tool, &mut surface, (10.0, 10.0));
        key(&mut tool, &mut surface, Key::Char('W'));
        key(&mut tool, &mut surface, Key::Escape);
        assert!(!tool.is_editing());
        assert!(surface.is_blank());
    }

    #[test]
    fn return_commits_text_to_surface() {
        let mut surface = Surface::new(120, 60).unwrap();
        let mut tool = TextTool::new("text", ToolSettings::default());
        press(&mut tool, &mut surface, (5.0, 5.0));
        for c in "WWW".chars() {
            key(&mut tool, &mut surface, Key::Char(c));
        }
        key(&mut tool, &mut surface, Key::Return);
        assert!(!tool.is_editing());
        assert!(!surface.is_blank());
    }

    #[test]
    fn blur_commits_and_empty_commit_draws_nothing() {
        let mut surface = Surface::new(120, 60).unwrap();
        let mut tool = TextTool::new("text", ToolSettings::default());
        press(&mut tool, &mut surface, (5.0, 5.0));
        {
            let mut ctx = DrawingContext::at(&mut surface, (0.0, 0.0));
            tool.on_blur(&mut ctx);
        }
        assert!(!tool.is_editing());
        assert!(surface.is_blank());
    }
}
