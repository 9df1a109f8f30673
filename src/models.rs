use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

time::serde::format_description!(
    due_date_format,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Presentation order, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub(crate) fn row(self) -> usize {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(anyhow::anyhow!("Invalid priority: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Done];

    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    pub fn is_done(self) -> bool {
        self == Status::Done
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "not_started" | "todo" => Ok(Status::NotStarted),
            "in_progress" | "started" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(anyhow::anyhow!("Invalid status: {}", other)),
        }
    }
}

/// Display tag for a course, stored as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Relative luminance in 0..=1, good enough to pick a text color.
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > 0.6
    }
}

/// Named course colors offered by the course form, first entry is the default.
pub const COURSE_PALETTE: [(&str, Color); 8] = [
    ("blue", Color::rgb(0x3b, 0x82, 0xf6)),
    ("green", Color::rgb(0x22, 0xc5, 0x5e)),
    ("purple", Color::rgb(0xa8, 0x55, 0xf7)),
    ("red", Color::rgb(0xef, 0x44, 0x44)),
    ("yellow", Color::rgb(0xea, 0xb3, 0x08)),
    ("pink", Color::rgb(0xec, 0x48, 0x99)),
    ("indigo", Color::rgb(0x63, 0x66, 0xf1)),
    ("teal", Color::rgb(0x14, 0xb8, 0xa6)),
];

impl Default for Color {
    fn default() -> Self {
        COURSE_PALETTE[0].1
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    /// Accepts a palette name (`teal`) or a hex triplet (`#14b8a6`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((_, color)) = COURSE_PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
        {
            return Ok(*color);
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Invalid color: {}", s);
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|e| anyhow::anyhow!("Invalid color {}: {}", s, e))?;
        Ok(Color {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub color: Color,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub color: Color,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub course_id: Uuid,
    /// Rich-text markup, passed through untouched.
    pub description: String,
    #[serde(with = "due_date_format")]
    pub due_date: PrimitiveDateTime,
    pub priority: Priority,
    pub status: Status,
    pub estimated_hours: f64,
}

impl Assignment {
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub title: String,
    pub course_id: Uuid,
    pub description: String,
    pub due_date: PrimitiveDateTime,
    pub priority: Priority,
    pub estimated_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentUpdate {
    pub title: Option<String>,
    pub course_id: Option<Uuid>,
    pub description: Option<String>,
    pub due_date: Option<PrimitiveDateTime>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub estimated_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub assignment_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub minutes: u32,
}

impl StudySession {
    pub fn hours(&self) -> f64 {
        f64::from(self.minutes) / 60.0
    }
}
