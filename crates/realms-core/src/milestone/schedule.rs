use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A calendar day with no time or zone attached.
///
/// Parsed from `YYYY-MM-DD` by splitting into numeric components. It is never
/// handed to a date-time parser, which would read it as UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|_| Self { year, month, day })
            .ok_or_else(|| ValidationError::MalformedDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn naive(&self) -> NaiveDate {
        // Components were validated in `new`.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedDate(s.to_string());
        let mut parts = s.trim().split('-');
        let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let year = y.parse::<i32>().map_err(|_| malformed())?;
        let month = m.parse::<u32>().map_err(|_| malformed())?;
        let day = d.parse::<u32>().map_err(|_| malformed())?;
        Self::new(year, month, day).map_err(|_| malformed())
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// One reveal card of the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: u32,
    pub date: CalendarDate,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quote: String,
    /// The proposal card that closes the journey.
    #[serde(default)]
    pub finale: bool,
}

impl Milestone {
    pub fn new(id: u32, date: CalendarDate, title: impl Into<String>) -> Self {
        Self {
            id,
            date,
            title: title.into(),
            icon: String::new(),
            description: String::new(),
            quote: String::new(),
            finale: false,
        }
    }

    pub fn with_payload(
        mut self,
        icon: impl Into<String>,
        description: impl Into<String>,
        quote: impl Into<String>,
    ) -> Self {
        self.icon = icon.into();
        self.description = description.into();
        self.quote = quote.into();
        self
    }

    pub fn as_finale(mut self) -> Self {
        self.finale = true;
        self
    }

    pub fn is_finale(&self) -> bool {
        self.finale
    }
}

/// Ordered, non-empty list of milestones with unique ids.
///
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    milestones: Vec<Milestone>,
}

impl Schedule {
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, ValidationError> {
        if milestones.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }
        let mut seen = HashSet::with_capacity(milestones.len());
        for m in &milestones {
            if !seen.insert(m.id) {
                return Err(ValidationError::DuplicateMilestone(m.id));
            }
        }
        Ok(Self { milestones })
    }

    /// Rose Day through Valentine's Day, 2026.
    pub fn valentine_week() -> Self {
        let entries: [(u32, u32, &str, &str, &str, &str); 8] = [
            (
                1,
                7,
                "Rose Day",
                "🌹",
                "The bloom of our beginning.",
                "Like a rose in a castle garden, my love for you grows wild and beautiful, protected by the walls of my devotion.",
            ),
            (
                2,
                8,
                "Propose Day",
                "💍",
                "A question asked to the stars.",
                "If I had a lifetime of choices, I would choose you in every single one. Will you be mine, today and forever?",
            ),
            (
                3,
                9,
                "Chocolate Day",
                "🍫",
                "Sweetness amidst distance.",
                "Life can be bitter without you close, but the memory of your smile is sweeter than any confection.",
            ),
            (
                4,
                10,
                "Teddy Day",
                "🧸",
                "A guardian for your dreams.",
                "Sending you a hug in spirit, soft and warm, to hold you when I cannot.",
            ),
            (
                5,
                11,
                "Promise Day",
                "🤝",
                "Vows etched in eternity.",
                "I promise to be your knight, your safe harbor, and your biggest fan, no matter how many miles lie between us.",
            ),
            (
                6,
                12,
                "Hug Day",
                "🤗",
                "The warmth I yearn to give.",
                "Close your eyes and feel my arms around you. The distance is only physical; our souls are already embracing.",
            ),
            (
                7,
                13,
                "Kiss Day",
                "💋",
                "A seal upon our love.",
                "A kiss is a secret told to the mouth instead of the ear; kisses are the messengers of love and tenderness.",
            ),
            (
                8,
                14,
                "Valentine's Day",
                "❤️",
                "The Grand Celebration.",
                "My Wife, My Life, My Valentine. You are the queen of my heart, today and for all the ages to come. I love you.",
            ),
        ];

        let milestones = entries
            .into_iter()
            .map(|(id, day, title, icon, desc, quote)| {
                let date = CalendarDate { year: 2026, month: 2, day };
                let m = Milestone::new(id, date, title).with_payload(icon, desc, quote);
                if id == 8 {
                    m.as_finale()
                } else {
                    m
                }
            })
            .collect();

        Self { milestones }
    }

    pub fn get(&self, id: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.milestones.iter()
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.milestones.iter().map(|m| m.id)
    }

    pub fn finale(&self) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.finale)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::valentine_week()
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let milestones = Vec::<Milestone>::deserialize(deserializer)?;
        Schedule::new(milestones).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.milestones.iter()
    }
}
