//! Difficulty tiers and their random-walk parameters

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Named preset controlling how aggressive the random walk is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Pathetic,
    Easy,
    Medium,
    Hard,
    ReallyHard,
    #[serde(rename = "WTF")]
    Wtf,
}

/// How the walk step is derived from the horizontal resolution
#[derive(Debug, Clone, Copy, PartialEq)]
enum StepRule {
    /// Same step at every resolution
    Fixed(f64),
    /// `width / divisor`
    Fraction(f64),
}

#[derive(Debug, Clone, Copy)]
struct ProfileEntry {
    step: StepRule,
    angle_range: f64,
}

/// Indexed by `Difficulty as usize`. ReallyHard and WTF share an angle range
/// and differ only in step.
const PROFILES: [ProfileEntry; 6] = [
    ProfileEntry {
        step: StepRule::Fixed(2.0),
        angle_range: 0.0,
    },
    ProfileEntry {
        step: StepRule::Fraction(10.0),
        angle_range: PI / 4.0,
    },
    ProfileEntry {
        step: StepRule::Fraction(20.0),
        angle_range: 3.0 * PI / 4.0,
    },
    ProfileEntry {
        step: StepRule::Fraction(100.0),
        angle_range: 15.0 * PI / 18.0,
    },
    ProfileEntry {
        step: StepRule::Fraction(120.0),
        angle_range: 16.0 * PI / 18.0,
    },
    ProfileEntry {
        step: StepRule::Fraction(150.0),
        angle_range: 16.0 * PI / 18.0,
    },
];

/// Walk parameters resolved for one resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Horizontal distance covered by every walk step
    pub step: f64,
    /// Maximum turn angle in radians
    pub angle_range: f64,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Pathetic,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::ReallyHard,
        Difficulty::Wtf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Pathetic => "Pathetic",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::ReallyHard => "ReallyHard",
            Difficulty::Wtf => "WTF",
        }
    }

    /// Parse a tier name, case-insensitive, `_`/`-`/space separators ignored
    pub fn from_str(s: &str) -> Result<Self, MapError> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pathetic" => Ok(Difficulty::Pathetic),
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "reallyhard" => Ok(Difficulty::ReallyHard),
            "wtf" => Ok(Difficulty::Wtf),
            _ => Err(MapError::UnknownDifficulty(s.to_string())),
        }
    }

    /// Look up a tier by its numeric code (0 = Pathetic .. 5 = WTF)
    pub fn from_code(code: u8) -> Result<Self, MapError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| MapError::UnknownDifficulty(code.to_string()))
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Walk parameters for a horizontal resolution of `width`
    pub fn profile(&self, width: u32) -> DifficultyProfile {
        let entry = PROFILES[*self as usize];
        let step = match entry.step {
            StepRule::Fixed(step) => step,
            StepRule::Fraction(divisor) => width as f64 / divisor,
        };
        DifficultyProfile {
            step,
            angle_range: entry.angle_range,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::from_str(s)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = MapError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Difficulty::from_code(code)
    }
}
