use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::catalog::{Catalog, Level};
use crate::session::plan::Focus;
use crate::session::planner::Planner;
use crate::session::profile::{AgeGroup, Position, cycle};
use crate::store::kv::KeyValueStore;
use crate::ui::components::profile_form::ProfileField;
use crate::ui::components::progress_panel::ProgressStats;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Plan,
    Profile,
    Stats,
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct App<S: KeyValueStore> {
    pub screen: AppScreen,
    pub planner: Planner<S>,
    pub theme: Theme,
    pub config: Config,
    pub drill_selected: usize,
    pub profile_selected: usize,
    pub should_quit: bool,
    clock: fn() -> NaiveDate,
}

impl<S: KeyValueStore> App<S> {
    /// `focus` is the starting tab. It may come from a CLI override, so it
    /// is kept out of `config`, which gets saved on theme changes.
    pub fn new(store: S, config: Config, theme: Theme, focus: Focus) -> Self {
        let planner = Planner::load(store, Catalog::builtin(), config.plan_options(), focus);
        Self::with_planner(planner, config, theme)
    }

    pub fn with_planner(planner: Planner<S>, config: Config, theme: Theme) -> Self {
        Self {
            screen: AppScreen::Plan,
            planner,
            theme,
            config,
            drill_selected: 0,
            profile_selected: 0,
            should_quit: false,
            clock: local_today,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn on_tick(&mut self) {
        let today = self.today();
        self.planner.roll_over(today);
    }

    pub fn planned_len(&self) -> usize {
        self.planner.today_plan().drills().len()
    }

    pub fn select_next(&mut self) {
        let len = self.planned_len();
        if len > 0 {
            self.drill_selected = (self.drill_selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.planned_len();
        if len > 0 {
            self.drill_selected = if self.drill_selected == 0 {
                len - 1
            } else {
                self.drill_selected - 1
            };
        }
    }

    pub fn toggle_selected(&mut self) {
        let id = self
            .planner
            .today_plan()
            .drills()
            .get(self.drill_selected)
            .map(|d| d.id());
        if let Some(id) = id {
            let today = self.today();
            self.planner.toggle_complete(id, today);
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.planner.set_focus(focus);
        self.drill_selected = 0;
    }

    /// Keys `1`..`4` pick a focus tab.
    pub fn set_focus_index(&mut self, idx: usize) {
        if let Some(&focus) = Focus::all().get(idx) {
            self.set_focus(focus);
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let next = cycle(Focus::all(), self.planner.focus(), forward);
        self.set_focus(next);
    }

    pub fn go_to_plan(&mut self) {
        self.screen = AppScreen::Plan;
    }

    pub fn go_to_profile(&mut self) {
        self.profile_selected = 0;
        self.screen = AppScreen::Profile;
    }

    pub fn go_to_stats(&mut self) {
        self.screen = AppScreen::Stats;
    }

    pub fn profile_select_next(&mut self) {
        self.profile_selected = (self.profile_selected + 1).min(ProfileField::ALL.len() - 1);
    }

    pub fn profile_select_prev(&mut self) {
        self.profile_selected = self.profile_selected.saturating_sub(1);
    }

    pub fn profile_cycle(&mut self, forward: bool) {
        let mut profile = *self.planner.profile();
        match ProfileField::ALL[self.profile_selected] {
            ProfileField::Age => profile.age = cycle(AgeGroup::all(), profile.age, forward),
            ProfileField::Level => profile.level = cycle(Level::all(), profile.level, forward),
            ProfileField::Position => {
                profile.position = cycle(Position::all(), profile.position, forward)
            }
        }
        self.planner.set_profile(profile);
        self.drill_selected = self.drill_selected.min(self.planned_len().saturating_sub(1));
    }

    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let idx = themes.iter().position(|t| *t == self.config.theme);
        let next = idx.map_or(0, |i| (i + 1) % themes.len());
        if let Some(theme) = Theme::load(&themes[next]) {
            self.config.theme = themes[next].clone();
            self.theme = theme;
            info!(theme = %self.config.theme, "theme changed");
            if let Err(e) = self.config.save() {
                warn!(error = %e, "could not save config");
            }
        }
    }

    pub fn progress_stats(&self) -> ProgressStats {
        let today = self.today();
        let drills = self.planner.today_plan().drills();
        ProgressStats {
            streak: self.planner.streak(today),
            best_streak: self.planner.best_streak(),
            weekly_count: self.planner.weekly_count(today),
            done_today: self.planner.completed_count(),
            planned_today: drills.len(),
            trained_today: self.planner.history().trained_on(today),
        }
    }
}
