use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::profile::Profile;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Age,
    Level,
    Position,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [ProfileField::Age, ProfileField::Level, ProfileField::Position];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Age => "Age group",
            ProfileField::Level => "Skill level",
            ProfileField::Position => "Position",
        }
    }

    pub fn value(self, profile: &Profile) -> &'static str {
        match self {
            ProfileField::Age => profile.age.label(),
            ProfileField::Level => profile.level.label(),
            ProfileField::Position => profile.position.label(),
        }
    }
}

pub struct ProfileForm<'a> {
    profile: &'a Profile,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> ProfileForm<'a> {
    pub fn new(profile: &'a Profile, selected: usize, theme: &'a Theme) -> Self {
        Self {
            profile,
            selected,
            theme,
        }
    }
}

impl Widget for ProfileForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Player Profile ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(ProfileField::ALL.len() as u16 * 3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Durations scale with skill level",
            Style::default().fg(colors.text_dim()),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let field_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                ProfileField::ALL
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, field) in ProfileField::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { " > " } else { "   " };

            let label_style = Style::default()
                .fg(if is_selected {
                    colors.accent()
                } else {
                    colors.fg()
                })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });
            let value_style = Style::default().fg(if is_selected {
                colors.warning()
            } else {
                colors.text_dim()
            });

            let lines = vec![
                Line::from(Span::styled(format!("{indicator}{}:", field.label()), label_style)),
                Line::from(Span::styled(
                    format!("     < {} >", field.value(self.profile)),
                    value_style,
                )),
            ];
            Paragraph::new(lines).render(field_layout[i], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            "  [↑↓] Field  [←→/Enter] Change  [Esc] Back",
            Style::default().fg(colors.accent()),
        )))
        .render(layout[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::Level;

    #[test]
    fn test_field_values() {
        let profile = Profile {
            level: Level::Intermediate,
            ..Profile::default()
        };
        assert_eq!(ProfileField::Age.value(&profile), "Teen");
        assert_eq!(ProfileField::Level.value(&profile), "Intermediate");
        assert_eq!(ProfileField::Position.value(&profile), "Any Position");
    }
}
