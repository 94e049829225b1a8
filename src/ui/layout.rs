use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: drill list + progress sidebar
    Narrow, // <90 cols: progress panel stacked under the list
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct PlanLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub main: Rect,
    pub progress: Rect,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl PlanLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        let (main, progress) = if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
                .split(vertical[2]);
            (horizontal[0], horizontal[1])
        } else {
            let stacked = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(8)])
                .split(vertical[2]);
            (stacked[0], stacked[1])
        };

        Self {
            header: vertical[0],
            tabs: vertical[1],
            main,
            progress,
            footer: vertical[3],
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 50;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_threshold() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 40)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 60, 40)), LayoutTier::Narrow);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[q] Quit", "[p] Profile", "[s] Stats"], 22);
        assert_eq!(lines, vec![" [q] Quit  [p] Profile", " [s] Stats"]);
        assert!(pack_hint_lines(&["[q] Quit"], 0).is_empty());
    }

    #[test]
    fn test_centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 60, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }

    #[test]
    fn test_plan_layout_narrow_stacks_progress() {
        let layout = PlanLayout::new(Rect::new(0, 0, 70, 30));
        assert_eq!(layout.main.x, layout.progress.x);
        assert!(layout.progress.y > layout.main.y);
    }
}
