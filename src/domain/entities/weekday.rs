use serde::{Deserialize, Serialize};

/// Weekday symbols, Monday first. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekdayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekdayName {
    pub const ALL: [WeekdayName; 7] = [
        WeekdayName::Monday,
        WeekdayName::Tuesday,
        WeekdayName::Wednesday,
        WeekdayName::Thursday,
        WeekdayName::Friday,
        WeekdayName::Saturday,
        WeekdayName::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayName::Monday => "MONDAY",
            WeekdayName::Tuesday => "TUESDAY",
            WeekdayName::Wednesday => "WEDNESDAY",
            WeekdayName::Thursday => "THURSDAY",
            WeekdayName::Friday => "FRIDAY",
            WeekdayName::Saturday => "SATURDAY",
            WeekdayName::Sunday => "SUNDAY",
        }
    }
}

impl From<chrono::Weekday> for WeekdayName {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => WeekdayName::Monday,
            chrono::Weekday::Tue => WeekdayName::Tuesday,
            chrono::Weekday::Wed => WeekdayName::Wednesday,
            chrono::Weekday::Thu => WeekdayName::Thursday,
            chrono::Weekday::Fri => WeekdayName::Friday,
            chrono::Weekday::Sat => WeekdayName::Saturday,
            chrono::Weekday::Sun => WeekdayName::Sunday,
        }
    }
}

impl std::fmt::Display for WeekdayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WeekdayName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        WeekdayName::ALL
            .iter()
            .find(|w| w.as_str() == upper)
            .copied()
            .ok_or_else(|| format!("Invalid weekday: {}", s))
    }
}
