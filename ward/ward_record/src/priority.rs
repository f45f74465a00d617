use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triage tier of a patient. Lower ordinals are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Priority {
    Emergency = 1,
    Critical = 2,
    NonCritical = 3,
}

impl Priority {
    /// All tiers, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::Emergency, Priority::Critical, Priority::NonCritical];

    /// The numeric tier value used for sorting and averaging.
    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(n: i64) -> Option<Self> {
        match n {
            1 => Some(Priority::Emergency),
            2 => Some(Priority::Critical),
            3 => Some(Priority::NonCritical),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Emergency => "EMERGENCY",
            Priority::Critical => "CRITICAL",
            Priority::NonCritical => "NON_CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
