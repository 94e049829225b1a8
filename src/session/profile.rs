use serde::{Deserialize, Serialize};

use crate::engine::catalog::Level;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Youth,
    #[default]
    Teen,
    Adult,
}

impl AgeGroup {
    pub fn to_key(self) -> &'static str {
        match self {
            AgeGroup::Youth => "youth",
            AgeGroup::Teen => "teen",
            AgeGroup::Adult => "adult",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Youth => "Youth",
            AgeGroup::Teen => "Teen",
            AgeGroup::Adult => "Adult",
        }
    }

    pub fn all() -> &'static [AgeGroup] {
        &[AgeGroup::Youth, AgeGroup::Teen, AgeGroup::Adult]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Any,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn to_key(self) -> &'static str {
        match self {
            Position::Any => "any",
            Position::Defender => "defender",
            Position::Midfielder => "midfielder",
            Position::Forward => "forward",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Any => "Any Position",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    pub fn all() -> &'static [Position] {
        &[
            Position::Any,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ]
    }
}

/// Player settings chosen on the profile screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub age: AgeGroup,
    pub level: Level,
    pub position: Position,
}

impl Profile {
    pub fn summary(&self) -> String {
        format!(
            "{} • {} • {}",
            self.age.to_key(),
            self.level.to_key(),
            self.position.to_key()
        )
    }
}

/// Step to the next/previous entry of `all`, wrapping at both ends.
pub fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else if idx == 0 {
        all.len() - 1
    } else {
        idx - 1
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.age, AgeGroup::Teen);
        assert_eq!(profile.level, Level::Beginner);
        assert_eq!(profile.position, Position::Any);
        assert_eq!(profile.summary(), "teen • beginner • any");
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = Profile {
            age: AgeGroup::Adult,
            level: Level::Advanced,
            position: Position::Forward,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"age":"adult","level":"advanced","position":"forward"}"#);
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(Position::all(), Position::Forward, true), Position::Any);
        assert_eq!(cycle(Position::all(), Position::Any, false), Position::Forward);
        assert_eq!(cycle(Level::all(), Level::Beginner, true), Level::Intermediate);
    }
}
