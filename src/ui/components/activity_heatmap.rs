use chrono::{Datelike, Duration, NaiveDate};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::engine::history::CompletionHistory;
use crate::ui::theme::Theme;

const MAX_WEEKS: usize = 26;

/// GitHub-style grid of trained days, one column per week.
pub struct ActivityHeatmap<'a> {
    history: &'a CompletionHistory,
    today: NaiveDate,
    theme: &'a Theme,
}

impl<'a> ActivityHeatmap<'a> {
    pub fn new(history: &'a CompletionHistory, today: NaiveDate, theme: &'a Theme) -> Self {
        Self {
            history,
            today,
            theme,
        }
    }
}

/// Monday of the first week shown, given how many columns fit.
fn grid_start(today: NaiveDate, weeks: usize) -> NaiveDate {
    let start = today - Duration::weeks(weeks as i64);
    start - Duration::days(start.weekday().num_days_from_monday() as i64)
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

impl Widget for ActivityHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Training Days ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 9 || inner.width < 20 {
            return;
        }

        let weeks_to_show = ((inner.width as usize).saturating_sub(3) / 2).min(MAX_WEEKS);
        let start_date = grid_start(self.today, weeks_to_show);

        let day_labels = ["M", " ", "W", " ", "F", " ", "S"];
        for (row, label) in day_labels.iter().enumerate() {
            let y = inner.y + 1 + row as u16;
            buf.set_string(inner.x, y, label, Style::default().fg(colors.text_dim()));
        }

        let mut current_date = start_date;
        let mut col = 0u16;
        let mut last_month = 0u32;

        while current_date <= self.today {
            let x = inner.x + 2 + col * 2;
            if x + 1 >= inner.x + inner.width {
                break;
            }

            let month = current_date.month();
            if month != last_month {
                if x + 3 <= inner.x + inner.width {
                    buf.set_string(
                        x,
                        inner.y,
                        month_abbrev(month),
                        Style::default().fg(colors.text_dim()),
                    );
                }
                last_month = month;
            }

            for day_offset in 0..7u16 {
                let date = current_date + Duration::days(day_offset as i64);
                if date > self.today {
                    break;
                }
                let y = inner.y + 1 + day_offset;
                if y >= inner.y + inner.height {
                    break;
                }

                let (symbol, color) = match self.history.get(date) {
                    Some(true) => ("█", colors.success()),
                    Some(false) => ("▪", colors.warning()),
                    None => ("·", colors.accent_dim()),
                };
                buf.set_string(x, y, symbol, Style::default().fg(color));
            }

            current_date += Duration::weeks(1);
            col += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_start_is_monday_before_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let start = grid_start(today, 4);
        assert_eq!(start.weekday(), chrono::Weekday::Mon);
        assert!(start <= today - Duration::weeks(4));
        assert!(today - start < Duration::weeks(5));
    }

    #[test]
    fn test_render_marks_trained_today() {
        let theme = Theme::default();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut history = CompletionHistory::new();
        history.record(today, true);

        let area = Rect::new(0, 0, 30, 11);
        let mut buf = Buffer::empty(area);
        ActivityHeatmap::new(&history, today, &theme).render(area, &mut buf);

        let cells: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert_eq!(cells.matches('█').count(), 1);
    }
}
