use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::history::WEEK_WINDOW_DAYS;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Aggregates shown beside the drill list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub streak: u32,
    pub best_streak: u32,
    pub weekly_count: u32,
    pub done_today: usize,
    pub planned_today: usize,
    pub trained_today: bool,
}

pub struct ProgressPanel<'a> {
    stats: ProgressStats,
    theme: &'a Theme,
}

impl<'a> ProgressPanel<'a> {
    pub fn new(stats: ProgressStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

fn plural_days(n: u32) -> &'static str {
    if n == 1 { "day" } else { "days" }
}

impl Widget for ProgressPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let s = self.stats;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(inner);

        let streak_color = if s.streak > 0 {
            colors.success()
        } else {
            colors.text_dim()
        };
        let today_text = if s.trained_today {
            Span::styled("  Today counts!", Style::default().fg(colors.success()))
        } else {
            Span::styled(
                "  Finish every drill to count today",
                Style::default().fg(colors.text_dim()),
            )
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("  Streak:    ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{} {}", s.streak, plural_days(s.streak)),
                    Style::default()
                        .fg(streak_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  (best {})", s.best_streak),
                    Style::default().fg(colors.text_dim()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  This week: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}/{WEEK_WINDOW_DAYS} {}", s.weekly_count, plural_days(s.weekly_count)),
                    Style::default().fg(colors.accent()),
                ),
            ]),
            Line::from(today_text),
        ];
        Paragraph::new(lines).render(layout[0], buf);

        ProgressBar::new("Drills today", s.done_today, s.planned_today, self.theme)
            .render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_streak_and_week() {
        let theme = Theme::default();
        let stats = ProgressStats {
            streak: 1,
            best_streak: 4,
            weekly_count: 3,
            done_today: 1,
            planned_today: 3,
            trained_today: false,
        };
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        ProgressPanel::new(stats, &theme).render(area, &mut buf);

        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buf[(x, y)].symbol());
            }
        }
        assert!(text.contains("1 day"));
        assert!(text.contains("(best 4)"));
        assert!(text.contains("3/7 days"));
        assert!(text.contains("1/3"));
    }
}
