use std::collections::BTreeSet;

use crate::session::plan::PlannedDrill;

/// Drill ids ticked off during the current run. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: BTreeSet<u32>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of `planned` drills that are ticked.
    pub fn done_in(&self, planned: &[PlannedDrill]) -> usize {
        planned.iter().filter(|d| self.contains(d.id())).count()
    }

    /// True only for a non-empty plan with every drill ticked.
    pub fn all_done(&self, planned: &[PlannedDrill]) -> bool {
        !planned.is_empty() && self.done_in(planned) == planned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::{Catalog, Goal};
    use crate::session::plan::{Focus, PlanOptions, plan_today};
    use crate::session::profile::Profile;

    #[test]
    fn test_toggle_is_own_inverse() {
        let mut set = CompletionSet::new();
        set.toggle(2);
        let before = set.clone();
        assert!(set.toggle(7));
        assert!(!set.toggle(7));
        assert_eq!(set, before);

        assert!(!set.toggle(2));
        assert!(set.toggle(2));
        assert_eq!(set, before);
    }

    #[test]
    fn test_all_done_requires_every_planned_drill() {
        let catalog = Catalog::builtin();
        let plan = plan_today(
            &catalog,
            &Profile::default(),
            Focus::Goal(Goal::Shooting),
            PlanOptions::default(),
        );
        let drills = plan.drills();
        let mut set = CompletionSet::new();
        // Ids from another goal do not count towards this plan.
        set.toggle(1);
        set.toggle(2);
        set.toggle(3);
        assert_eq!(set.done_in(drills), 0);
        assert!(!set.all_done(drills));

        for drill in drills {
            set.toggle(drill.id());
        }
        assert!(set.all_done(drills));

        set.toggle(drills[0].id());
        assert!(!set.all_done(drills));
    }

    #[test]
    fn test_all_done_false_for_empty_plan() {
        assert!(!CompletionSet::new().all_done(&[]));
    }
}
