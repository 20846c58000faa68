//! Domain primitives shared by the store, the services and the wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week on which a screening runs.
///
/// Serialized as the lowercase English name (`"monday"`). Parsing also
/// accepts three-letter abbreviations and ignores case.
///
/// # Examples
///
/// ```rust
/// use marquee::domain::Weekday;
///
/// assert_eq!("Fri".parse::<Weekday>().unwrap(), Weekday::Friday);
/// assert_eq!(Weekday::Sunday.to_string(), "sunday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeekdayError(String);

impl fmt::Display for ParseWeekdayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown weekday: '{}'", self.0)
    }
}

impl std::error::Error for ParseWeekdayError {}

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                day.as_str() == lower || (lower.len() == 3 && day.as_str().starts_with(&lower))
            })
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

/// An authenticated principal, as resolved from a session or API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: i32,
    pub username: String,
}
