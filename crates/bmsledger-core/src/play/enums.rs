use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr, IntoStaticStr};

/// Clear lamp of a play, ordered from worst to best.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum Lamp {
    #[default]
    #[strum(serialize = "NO PLAY")]
    NoPlay = 0,
    #[strum(serialize = "FAILED")]
    Failed = 1,
    #[strum(serialize = "ASSIST")]
    AssistEasy = 2,
    #[strum(serialize = "L-ASSIST")]
    LightAssistEasy = 3,
    #[strum(serialize = "EASY")]
    Easy = 4,
    #[strum(serialize = "NORMAL")]
    Normal = 5,
    #[strum(serialize = "HARD")]
    Hard = 6,
    #[strum(serialize = "EX HARD")]
    ExHard = 7,
    #[strum(serialize = "FC")]
    FullCombo = 8,
    #[strum(serialize = "PERFECT")]
    Perfect = 9,
}

impl Lamp {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Convert the `clear` column of a score database.
    ///
    /// Values above PERFECT (MAX) saturate to PERFECT, negative values are NO PLAY.
    pub fn from_clear(value: i64) -> Self {
        match u8::try_from(value) {
            Ok(v) => Self::from_repr(v).unwrap_or(Self::Perfect),
            Err(_) if value > 0 => Self::Perfect,
            Err(_) => Self::NoPlay,
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Get the expanded lamp name (for display and export)
    pub fn expand_name(&self) -> &'static str {
        match self {
            Self::NoPlay => "NO PLAY",
            Self::Failed => "FAILED",
            Self::AssistEasy => "ASSIST EASY CLEAR",
            Self::LightAssistEasy => "LIGHT ASSIST EASY CLEAR",
            Self::Easy => "EASY CLEAR",
            Self::Normal => "CLEAR",
            Self::Hard => "HARD CLEAR",
            Self::ExHard => "EX HARD CLEAR",
            Self::FullCombo => "FULL COMBO",
            Self::Perfect => "PERFECT",
        }
    }
}
