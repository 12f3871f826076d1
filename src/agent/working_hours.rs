use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{de::Error, Deserialize, Serialize};

/// The hours an agent can be booked from or until, as the backend spells
/// them (`9AM`, `12PM`, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeToken {
    EightAm,
    NineAm,
    TenAm,
    ElevenAm,
    TwelvePm,
    OnePm,
    TwoPm,
    ThreePm,
    FourPm,
    FivePm,
    SixPm,
}

impl TimeToken {
    pub const ALL: [TimeToken; 11] = [
        TimeToken::EightAm,
        TimeToken::NineAm,
        TimeToken::TenAm,
        TimeToken::ElevenAm,
        TimeToken::TwelvePm,
        TimeToken::OnePm,
        TimeToken::TwoPm,
        TimeToken::ThreePm,
        TimeToken::FourPm,
        TimeToken::FivePm,
        TimeToken::SixPm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeToken::EightAm => "8AM",
            TimeToken::NineAm => "9AM",
            TimeToken::TenAm => "10AM",
            TimeToken::ElevenAm => "11AM",
            TimeToken::TwelvePm => "12PM",
            TimeToken::OnePm => "1PM",
            TimeToken::TwoPm => "2PM",
            TimeToken::ThreePm => "3PM",
            TimeToken::FourPm => "4PM",
            TimeToken::FivePm => "5PM",
            TimeToken::SixPm => "6PM",
        }
    }

    pub fn hour(self) -> u32 {
        8 + self as u32
    }

    pub fn label(self) -> String {
        let hour = self.hour();
        let (display_hour, meridiem) = match hour {
            12 => (12, "PM"),
            13..=23 => (hour - 12, "PM"),
            _ => (hour, "AM"),
        };
        format!("{}:00 {}", display_hour, meridiem)
    }
}

impl Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownTimeToken;

impl Display for UnknownTimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of 8AM through 6PM on the hour")
    }
}

impl std::error::Error for UnknownTimeToken {}

impl FromStr for TimeToken {
    type Err = UnknownTimeToken;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeToken::ALL
            .iter()
            .copied()
            .find(|token| token.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownTimeToken)
    }
}

impl Serialize for TimeToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimeToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimeToken::from_str(&s).map_err(|e| D::Error::custom(e))
    }
}

/// An agent's bookable window, encoded on the wire as `"{start}-{end}"`.
///
/// Nothing requires `start` to come before `end`; see [`WorkingHours::is_ordered`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: TimeToken,
    pub end: TimeToken,
}

impl WorkingHours {
    pub fn new(start: TimeToken, end: TimeToken) -> WorkingHours {
        WorkingHours { start, end }
    }

    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    pub fn slots(&self) -> Vec<u32> {
        (self.start.hour()..self.end.hour()).collect()
    }
}

impl Default for WorkingHours {
    fn default() -> WorkingHours {
        WorkingHours::new(TimeToken::NineAm, TimeToken::FivePm)
    }
}

impl Display for WorkingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_working_hours(self.start, self.end))
    }
}

/// Reads `"{start}-{end}"`. Missing or malformed text gives the 9AM-5PM
/// default instead of an error since the field only drives display.
pub fn parse_working_hours(raw: Option<&str>) -> WorkingHours {
    raw.and_then(|raw| {
        let (start, end) = raw.split_once('-')?;
        if end.contains('-') {
            return None;
        }
        Some(WorkingHours::new(start.parse().ok()?, end.parse().ok()?))
    })
    .unwrap_or_default()
}

pub fn format_working_hours(start: TimeToken, end: TimeToken) -> String {
    format!("{}-{}", start, end)
}
