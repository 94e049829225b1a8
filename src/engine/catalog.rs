use chrono::Weekday;
use serde::{Deserialize, Serialize};

// --- Goal ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Control,
    Fitness,
    Shooting,
}

impl Goal {
    pub fn to_key(self) -> &'static str {
        match self {
            Goal::Control => "control",
            Goal::Fitness => "fitness",
            Goal::Shooting => "shooting",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "control" => Some(Goal::Control),
            "fitness" => Some(Goal::Fitness),
            "shooting" => Some(Goal::Shooting),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Goal::Control => "Ball Control",
            Goal::Fitness => "Fitness",
            Goal::Shooting => "Shooting",
        }
    }

    pub fn all() -> &'static [Goal] {
        &[Goal::Control, Goal::Fitness, Goal::Shooting]
    }
}

// --- Level ---

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn to_key(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "beginner" => Some(Level::Beginner),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }

    pub fn all() -> &'static [Level] {
        &[Level::Beginner, Level::Intermediate, Level::Advanced]
    }
}

// --- Static Definitions ---

#[derive(Debug, PartialEq, Eq)]
pub struct Drill {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
    pub goal: Goal,
    pub level: Level,
    pub duration_min: u32,
    pub description: &'static str,
}

const BUILTIN_DRILLS: &[Drill] = &[
    Drill {
        id: 1,
        name: "Ball Control – Cones",
        category: "Technical",
        goal: Goal::Control,
        level: Level::Beginner,
        duration_min: 10,
        description: "Dribble through cones using both feet. Focus on close control.",
    },
    Drill {
        id: 2,
        name: "Passing Against Wall",
        category: "Technical",
        goal: Goal::Control,
        level: Level::Beginner,
        duration_min: 8,
        description: "Pass against a wall using inside of foot. Alternate feet.",
    },
    Drill {
        id: 3,
        name: "Sprint Intervals",
        category: "Fitness",
        goal: Goal::Fitness,
        level: Level::Beginner,
        duration_min: 12,
        description: "Sprint 20m, jog back. Repeat 6 times.",
    },
    Drill {
        id: 4,
        name: "Shooting Accuracy",
        category: "Shooting",
        goal: Goal::Shooting,
        level: Level::Beginner,
        duration_min: 10,
        description: "Aim for corners. 20 shots total.",
    },
    Drill {
        id: 5,
        name: "Juggling Ladder",
        category: "Technical",
        goal: Goal::Control,
        level: Level::Intermediate,
        duration_min: 10,
        description: "Juggle to 10, 20, then 30 touches. Restart the rung after a drop.",
    },
    Drill {
        id: 6,
        name: "Shuttle Runs",
        category: "Fitness",
        goal: Goal::Fitness,
        level: Level::Intermediate,
        duration_min: 10,
        description: "Run 5m, 10m and 15m shuttles back to back. Rest 60s between sets.",
    },
    Drill {
        id: 7,
        name: "Volleys off a Bounce",
        category: "Shooting",
        goal: Goal::Shooting,
        level: Level::Intermediate,
        duration_min: 12,
        description: "Toss the ball up, let it bounce once, strike on the way down. 15 per foot.",
    },
    Drill {
        id: 8,
        name: "First Touch Under Pressure",
        category: "Technical",
        goal: Goal::Control,
        level: Level::Advanced,
        duration_min: 12,
        description: "Receive hard passes off the wall and turn away in one touch.",
    },
    Drill {
        id: 9,
        name: "Repeated Sprint Ability",
        category: "Fitness",
        goal: Goal::Fitness,
        level: Level::Advanced,
        duration_min: 15,
        description: "8 x 30m sprints with 20s recovery. Two sets.",
    },
    Drill {
        id: 10,
        name: "Finishing from Crosses",
        category: "Shooting",
        goal: Goal::Shooting,
        level: Level::Advanced,
        duration_min: 15,
        description: "Serve crosses from both wings and finish first time. Alternate near and far post.",
    },
];

// --- Weekly Template ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayActivity {
    Train(Goal),
    Match,
    Rest,
}

impl DayActivity {
    pub fn label(self) -> &'static str {
        match self {
            DayActivity::Train(goal) => goal.label(),
            DayActivity::Match => "Match / Small-sided game",
            DayActivity::Rest => "Rest",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PlanDay {
    pub weekday: Weekday,
    pub activity: DayActivity,
    pub minutes: u32,
    pub note: &'static str,
}

const fn day(weekday: Weekday, activity: DayActivity, minutes: u32, note: &'static str) -> PlanDay {
    PlanDay {
        weekday,
        activity,
        minutes,
        note,
    }
}

const BEGINNER_WEEK: [PlanDay; 7] = [
    day(Weekday::Mon, DayActivity::Train(Goal::Control), 20, "Cones and wall passes"),
    day(Weekday::Tue, DayActivity::Rest, 0, "Light stretching"),
    day(Weekday::Wed, DayActivity::Train(Goal::Fitness), 20, "Easy sprint intervals"),
    day(Weekday::Thu, DayActivity::Train(Goal::Control), 20, "Weak-foot touches"),
    day(Weekday::Fri, DayActivity::Rest, 0, "Rest"),
    day(Weekday::Sat, DayActivity::Train(Goal::Shooting), 25, "Target practice"),
    day(Weekday::Sun, DayActivity::Match, 40, "Play with friends"),
];

const INTERMEDIATE_WEEK: [PlanDay; 7] = [
    day(Weekday::Mon, DayActivity::Train(Goal::Control), 30, "Juggling and passing"),
    day(Weekday::Tue, DayActivity::Train(Goal::Fitness), 30, "Shuttle runs"),
    day(Weekday::Wed, DayActivity::Train(Goal::Shooting), 30, "Volleys and placement"),
    day(Weekday::Thu, DayActivity::Rest, 0, "Mobility work"),
    day(Weekday::Fri, DayActivity::Train(Goal::Control), 30, "Tight-space dribbling"),
    day(Weekday::Sat, DayActivity::Match, 60, "Match day"),
    day(Weekday::Sun, DayActivity::Rest, 0, "Recovery"),
];

const ADVANCED_WEEK: [PlanDay; 7] = [
    day(Weekday::Mon, DayActivity::Train(Goal::Fitness), 45, "Repeated sprints"),
    day(Weekday::Tue, DayActivity::Train(Goal::Control), 40, "First touch under pressure"),
    day(Weekday::Wed, DayActivity::Train(Goal::Shooting), 45, "Finishing from crosses"),
    day(Weekday::Thu, DayActivity::Train(Goal::Fitness), 35, "Tempo runs"),
    day(Weekday::Fri, DayActivity::Train(Goal::Control), 30, "Sharpness, low volume"),
    day(Weekday::Sat, DayActivity::Match, 90, "Match day"),
    day(Weekday::Sun, DayActivity::Rest, 0, "Recovery"),
];

// --- Catalog ---

/// Read-only view over a drill table plus the weekly templates.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    drills: &'static [Drill],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            drills: BUILTIN_DRILLS,
        }
    }

    pub fn new(drills: &'static [Drill]) -> Self {
        Self { drills }
    }

    pub fn all(&self) -> &'static [Drill] {
        self.drills
    }

    /// `None` yields the whole flat catalog.
    pub fn drills_for(&self, level: Option<Level>) -> Vec<&'static Drill> {
        self.drills
            .iter()
            .filter(|d| level.is_none_or(|l| d.level == l))
            .collect()
    }

    /// Lookup by an untrusted level key. Unknown keys give an empty list.
    pub fn drills_for_key(&self, level_key: &str) -> Vec<&'static Drill> {
        match Level::from_key(level_key) {
            Some(level) => self.drills_for(Some(level)),
            None => Vec::new(),
        }
    }

    pub fn drills_for_goal(&self, goal: Goal) -> Vec<&'static Drill> {
        self.drills.iter().filter(|d| d.goal == goal).collect()
    }

    pub fn find(&self, id: u32) -> Option<&'static Drill> {
        self.drills.iter().find(|d| d.id == id)
    }

    pub fn weekly_plan(&self, level: Level) -> &'static [PlanDay; 7] {
        match level {
            Level::Beginner => &BEGINNER_WEEK,
            Level::Intermediate => &INTERMEDIATE_WEEK,
            Level::Advanced => &ADVANCED_WEEK,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_builtin_ids_unique_and_positive() {
        let catalog = Catalog::builtin();
        let mut seen = HashSet::new();
        for drill in catalog.all() {
            assert!(drill.id >= 1);
            assert!(drill.duration_min >= 1);
            assert!(seen.insert(drill.id), "duplicate id {}", drill.id);
        }
    }

    #[test]
    fn test_drills_for_level_only_returns_that_level() {
        let catalog = Catalog::builtin();
        for &level in Level::all() {
            let drills = catalog.drills_for(Some(level));
            assert!(!drills.is_empty());
            assert!(drills.iter().all(|d| d.level == level));
        }
    }

    #[test]
    fn test_drills_for_none_is_flat_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.drills_for(None).len(), catalog.all().len());
    }

    #[test]
    fn test_levels_partition_catalog() {
        let catalog = Catalog::builtin();
        let total: usize = Level::all()
            .iter()
            .map(|&l| catalog.drills_for(Some(l)).len())
            .sum();
        assert_eq!(total, catalog.all().len());
    }

    #[test]
    fn test_unknown_level_key_is_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.drills_for_key("expert").is_empty());
        assert!(catalog.drills_for_key("").is_empty());
        assert_eq!(
            catalog.drills_for_key("advanced"),
            catalog.drills_for(Some(Level::Advanced))
        );
    }

    #[test]
    fn test_drills_for_goal_keeps_declaration_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<u32> = catalog
            .drills_for_goal(Goal::Control)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 5, 8]);
    }

    #[test]
    fn test_find() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find(3).map(|d| d.name), Some("Sprint Intervals"));
        assert!(catalog.find(0).is_none());
        assert!(catalog.find(999).is_none());
    }

    #[test]
    fn test_weekly_plan_has_each_weekday_once() {
        let catalog = Catalog::builtin();
        for &level in Level::all() {
            let week = catalog.weekly_plan(level);
            for (i, entry) in week.iter().enumerate() {
                assert_eq!(entry.weekday.num_days_from_monday() as usize, i);
                if entry.activity == DayActivity::Rest {
                    assert_eq!(entry.minutes, 0);
                }
            }
        }
    }

    #[test]
    fn test_key_roundtrip() {
        for &goal in Goal::all() {
            assert_eq!(Goal::from_key(goal.to_key()), Some(goal));
        }
        for &level in Level::all() {
            assert_eq!(Level::from_key(level.to_key()), Some(level));
        }
        assert_eq!(Goal::from_key("weekly"), None);
        assert_eq!(Level::from_key("Beginner"), None);
    }
}
