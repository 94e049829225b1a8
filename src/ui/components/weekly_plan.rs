use chrono::Weekday;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::catalog::{DayActivity, PlanDay};
use crate::ui::theme::Theme;

pub struct WeeklyPlanView<'a> {
    week: &'a [PlanDay; 7],
    today: Weekday,
    level_label: &'a str,
    theme: &'a Theme,
}

impl<'a> WeeklyPlanView<'a> {
    pub fn new(week: &'a [PlanDay; 7], today: Weekday, level_label: &'a str, theme: &'a Theme) -> Self {
        Self {
            week,
            today,
            level_label,
            theme,
        }
    }
}

impl Widget for WeeklyPlanView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Weekly Plan ({}) ", self.level_label))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        for entry in self.week {
            let is_today = entry.weekday == self.today;
            let marker = if is_today { ">" } else { " " };
            let activity_color = match entry.activity {
                DayActivity::Rest => colors.rest_day(),
                DayActivity::Match => colors.warning(),
                DayActivity::Train(_) => colors.accent(),
            };
            let minutes = if entry.minutes > 0 {
                format!("{:>3} min", entry.minutes)
            } else {
                "   -   ".to_string()
            };
            let mut day_style = Style::default().fg(colors.fg());
            if is_today {
                day_style = day_style.add_modifier(Modifier::BOLD);
            }

            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} {:<4}", entry.weekday.to_string()), day_style),
                Span::styled(
                    format!("{:<26}", entry.activity.label()),
                    Style::default().fg(activity_color),
                ),
                Span::styled(minutes, Style::default().fg(colors.fg())),
                Span::styled(
                    format!("  {}", entry.note),
                    Style::default().fg(colors.text_dim()),
                ),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::{Catalog, Level};

    #[test]
    fn test_render_lists_all_days_and_marks_today() {
        let theme = Theme::default();
        let catalog = Catalog::builtin();
        let week = catalog.weekly_plan(Level::Beginner);
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        WeeklyPlanView::new(week, Weekday::Sun, "Beginner", &theme).render(area, &mut buf);

        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        for day in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
            assert!(text.contains(day), "missing {day}");
        }
        assert!(text.contains("> Sun"));
        assert!(text.contains("Rest"));
    }
}
