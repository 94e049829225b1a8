use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::completion::CompletionSet;
use crate::session::plan::PlannedDrill;
use crate::ui::theme::Theme;

/// Today's drills as cards: name, minutes, description and a tick box.
pub struct DrillList<'a> {
    drills: &'a [PlannedDrill],
    completed: &'a CompletionSet,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> DrillList<'a> {
    pub fn new(
        drills: &'a [PlannedDrill],
        completed: &'a CompletionSet,
        selected: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            drills,
            completed,
            selected,
            theme,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();

        for (i, planned) in self.drills.iter().enumerate() {
            let is_selected = i == self.selected;
            let done = self.completed.contains(planned.id());
            let indicator = if is_selected { ">" } else { " " };
            let check = if done { "[x]" } else { "[ ]" };

            let name_style = Style::default()
                .fg(if done {
                    colors.done()
                } else if is_selected {
                    colors.accent()
                } else {
                    colors.fg()
                })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            lines.push(Line::from(vec![
                Span::styled(format!(" {indicator} {check} "), name_style),
                Span::styled(planned.drill.name, name_style),
                Span::styled(
                    format!("  {} min · {}", planned.duration_min, planned.drill.category),
                    Style::default().fg(colors.text_dim()),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("         {}", planned.description),
                Style::default().fg(colors.text_dim()),
            )));
            lines.push(Line::from(""));
        }

        lines
    }
}

impl Widget for DrillList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Today's Drills ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.drills.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No drills for this focus.",
                Style::default().fg(colors.text_dim()),
            )))
            .render(inner, buf);
            return;
        }

        // Keep the selected card on screen; each card is three rows.
        let card_rows = 3usize;
        let visible_cards = (inner.height as usize / card_rows).max(1);
        let first = self.selected.saturating_sub(visible_cards - 1);
        let lines: Vec<Line> = self.lines().into_iter().skip(first * card_rows).collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
