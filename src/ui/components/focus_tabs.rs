use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::plan::Focus;
use crate::ui::theme::Theme;

/// Focus selector: `[1] Ball Control  [2] Fitness ...` with the active one highlighted.
pub struct FocusTabs<'a> {
    active: Focus,
    theme: &'a Theme,
}

impl<'a> FocusTabs<'a> {
    pub fn new(active: Focus, theme: &'a Theme) -> Self {
        Self { active, theme }
    }
}

impl Widget for FocusTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Focus ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (i, &focus) in Focus::all().iter().enumerate() {
            let label = format!(" [{}] {} ", i + 1, focus.label());
            let style = if focus == self.active {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
