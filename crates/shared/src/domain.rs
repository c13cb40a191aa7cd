use std::fmt;

use serde::{Deserialize, Serialize};

/// Session lengths the backend accepts, in the order they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionType {
    #[default]
    #[serde(rename = "1-hour")]
    OneHour,
    #[serde(rename = "2-hours")]
    TwoHours,
    #[serde(rename = "3-hours")]
    ThreeHours,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [Self::OneHour, Self::TwoHours, Self::ThreeHours];

    /// Wire value sent as `session_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "1-hour",
            Self::TwoHours => "2-hours",
            Self::ThreeHours => "3-hours",
        }
    }

    /// Points the backend awards for one session of this length.
    pub fn points(self) -> u64 {
        match self {
            Self::OneHour => 10,
            Self::TwoHours => 12,
            Self::ThreeHours => 14,
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
