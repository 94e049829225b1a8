use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::engine::catalog::{Catalog, Goal};
use crate::engine::history::CompletionHistory;
use crate::session::completion::CompletionSet;
use crate::session::plan::{Focus, PlanOptions, TodayPlan, plan_today};
use crate::session::profile::Profile;
use crate::store::kv::KeyValueStore;
use crate::store::schema::{
    Decoded, DefaultReason, HISTORY_KEY, PROFILE_KEY, decode_history, decode_profile,
    encode_history, encode_profile,
};

/// Owns the player's state for one run and mirrors changes to the store.
///
/// A day is recorded as trained while at least one goal's plan is fully
/// ticked. Un-ticking a drill of the only finished plan flips the day back
/// to untrained. Ticks belong to a single date and are cleared when the
/// date changes.
pub struct Planner<S: KeyValueStore> {
    catalog: Catalog,
    options: PlanOptions,
    profile: Profile,
    focus: Focus,
    completed: CompletionSet,
    completed_on: Option<NaiveDate>,
    history: CompletionHistory,
    plan: TodayPlan,
    store: S,
}

impl<S: KeyValueStore> Planner<S> {
    pub fn load(store: S, catalog: Catalog, options: PlanOptions, focus: Focus) -> Self {
        let profile = log_decoded(PROFILE_KEY, decode_profile(store.get(PROFILE_KEY).as_deref()));
        let history = log_decoded(HISTORY_KEY, decode_history(store.get(HISTORY_KEY).as_deref()));
        info!(
            profile = %profile.summary(),
            history_days = history.len(),
            "loaded planner state"
        );
        let plan = plan_today(&catalog, &profile, focus, options);
        Self {
            catalog,
            options,
            profile,
            focus,
            completed: CompletionSet::new(),
            completed_on: None,
            history,
            plan,
            store,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn history(&self) -> &CompletionHistory {
        &self.history
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    pub fn today_plan(&self) -> &TodayPlan {
        &self.plan
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_profile(&mut self, profile: Profile) {
        if profile == self.profile {
            return;
        }
        info!(profile = %profile.summary(), "profile changed");
        self.profile = profile;
        self.replan();
        match encode_profile(&self.profile) {
            Ok(raw) => self.persist(PROFILE_KEY, &raw),
            Err(e) => warn!(error = %e, "could not encode profile"),
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        debug!(focus = focus.to_key(), "focus changed");
        self.focus = focus;
        self.replan();
    }

    /// Tick or un-tick a drill from today's plan and record today in history.
    /// Returns the new membership, or `None` if `id` is not planned today.
    pub fn toggle_complete(&mut self, id: u32, today: NaiveDate) -> Option<bool> {
        if !self.plan.drills().iter().any(|d| d.id() == id) {
            debug!(id, "ignored toggle for drill outside today's plan");
            return None;
        }
        self.roll_over(today);
        let now_done = self.completed.toggle(id);
        let trained = self.any_plan_done();
        self.history.record(today, trained);
        debug!(id, now_done, trained, "toggled drill");
        match encode_history(&self.history) {
            Ok(raw) => self.persist(HISTORY_KEY, &raw),
            Err(e) => warn!(error = %e, "could not encode history"),
        }
        Some(now_done)
    }

    /// Drop ticks made on an earlier date. Called on every toggle and on
    /// UI ticks so a session left open past midnight starts the new day empty.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if self.completed_on == Some(today) {
            return;
        }
        if !self.completed.is_empty() {
            debug!(%today, cleared = self.completed.len(), "new day, clearing ticked drills");
        }
        self.completed.clear();
        self.completed_on = Some(today);
    }

    pub fn is_complete(&self, id: u32) -> bool {
        self.completed.contains(id)
    }

    /// Ticked drills that belong to today's plan.
    pub fn completed_count(&self) -> usize {
        self.completed.done_in(self.plan.drills())
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        self.history.streak(today)
    }

    pub fn weekly_count(&self, today: NaiveDate) -> u32 {
        self.history.weekly_count(today)
    }

    pub fn best_streak(&self) -> u32 {
        self.history.best_streak()
    }

    fn any_plan_done(&self) -> bool {
        Goal::all().iter().any(|&goal| {
            let plan = plan_today(&self.catalog, &self.profile, Focus::Goal(goal), self.options);
            self.completed.all_done(plan.drills())
        })
    }

    fn replan(&mut self) {
        self.plan = plan_today(&self.catalog, &self.profile, self.focus, self.options);
    }

    fn persist(&mut self, key: &str, raw: &str) {
        if let Err(e) = self.store.set(key, raw) {
            warn!(key, error = %e, "failed to persist");
        }
    }
}

fn log_decoded<T>(key: &str, decoded: Decoded<T>) -> T {
    match decoded {
        Decoded::Loaded(value) => value,
        Decoded::Defaulted { value, reason } => {
            match reason {
                DefaultReason::Missing => debug!(key, "no stored value, using default"),
                DefaultReason::Malformed(e) => {
                    warn!(key, error = %e, "stored value unreadable, using default")
                }
            }
            value
        }
    }
}
