use tracing::debug;

use crate::engine::catalog::{Catalog, Drill, Goal, Level, PlanDay};
use crate::session::profile::{Position, Profile};

const BEGINNER_MIN_MINUTES: u32 = 5;
const BEGINNER_OFFSET: u32 = 3;
const ADVANCED_OFFSET: u32 = 5;

/// What the player wants to work on today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Goal(Goal),
    Weekly,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Goal(Goal::Control)
    }
}

impl Focus {
    pub fn to_key(self) -> &'static str {
        match self {
            Focus::Goal(goal) => goal.to_key(),
            Focus::Weekly => "weekly",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "weekly" => Some(Focus::Weekly),
            other => Goal::from_key(other).map(Focus::Goal),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Goal(goal) => goal.label(),
            Focus::Weekly => "Weekly Plan",
        }
    }

    pub fn all() -> &'static [Focus] {
        &[
            Focus::Goal(Goal::Control),
            Focus::Goal(Goal::Fitness),
            Focus::Goal(Goal::Shooting),
            Focus::Weekly,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanOptions {
    pub adjust_durations: bool,
    pub annotate_position: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            adjust_durations: true,
            annotate_position: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedDrill {
    pub drill: &'static Drill,
    pub duration_min: u32,
    pub description: String,
}

impl PlannedDrill {
    pub fn id(&self) -> u32 {
        self.drill.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodayPlan {
    Drills(Vec<PlannedDrill>),
    Weekly(&'static [PlanDay; 7]),
}

impl TodayPlan {
    /// Planned drills; empty for the weekly overview.
    pub fn drills(&self) -> &[PlannedDrill] {
        match self {
            TodayPlan::Drills(drills) => drills,
            TodayPlan::Weekly(_) => &[],
        }
    }

    pub fn total_minutes(&self) -> u32 {
        match self {
            TodayPlan::Drills(drills) => drills.iter().map(|d| d.duration_min).sum(),
            TodayPlan::Weekly(week) => week.iter().map(|d| d.minutes).sum(),
        }
    }
}

pub fn adjusted_duration(level: Level, minutes: u32) -> u32 {
    match level {
        Level::Beginner => minutes
            .saturating_sub(BEGINNER_OFFSET)
            .max(BEGINNER_MIN_MINUTES),
        Level::Intermediate => minutes,
        Level::Advanced => minutes + ADVANCED_OFFSET,
    }
}

pub fn annotate(description: &str, position: Position) -> String {
    format!("{description} ({} focus)", position.to_key())
}

/// Derive today's session from the catalog for the given profile and focus.
///
/// Drills keep catalog declaration order. The weekly focus skips drill
/// filtering and hands back the template for the profile's level.
pub fn plan_today(
    catalog: &Catalog,
    profile: &Profile,
    focus: Focus,
    options: PlanOptions,
) -> TodayPlan {
    let goal = match focus {
        Focus::Weekly => return TodayPlan::Weekly(catalog.weekly_plan(profile.level)),
        Focus::Goal(goal) => goal,
    };

    let drills: Vec<PlannedDrill> = catalog
        .drills_for_goal(goal)
        .into_iter()
        .map(|drill| PlannedDrill {
            drill,
            duration_min: if options.adjust_durations {
                adjusted_duration(profile.level, drill.duration_min)
            } else {
                drill.duration_min
            },
            description: if options.annotate_position {
                annotate(drill.description, profile.position)
            } else {
                drill.description.to_string()
            },
        })
        .collect();

    debug!(
        goal = goal.to_key(),
        level = profile.level.to_key(),
        count = drills.len(),
        "planned today's drills"
    );
    TodayPlan::Drills(drills)
}
