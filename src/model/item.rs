// File: ./src/model/item.rs
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;
use uuid::Uuid;

fn default_estimated_hours() -> f64 {
    1.0
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, EnumIter,
)]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    /// Parses user input like "high" or "H". Unknown values are `None`, not
    /// a default, so the caller can report the typo.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Some(Self::Low),
            "medium" | "med" | "m" => Some(Self::Medium),
            "high" | "h" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::Low => write!(f, "Low"),
            Importance::Medium => write!(f, "Medium"),
            Importance::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Hard deadline, if any.
    pub due: Option<DateTime<Utc>>,
    /// When the task is scheduled to be worked on. This is the attribute the
    /// reconciliation pipeline rewrites; everything else is user-owned.
    pub work_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: f64,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            due: None,
            work_date: None,
            importance: Importance::default(),
            estimated_hours: default_estimated_hours(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// The local calendar day this task belongs to for display grouping:
    /// the scheduled work day, falling back to the creation day.
    pub fn planning_day(&self) -> NaiveDate {
        self.work_date
            .unwrap_or(self.created_at)
            .with_timezone(&Local)
            .date_naive()
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }

    pub fn checkbox_symbol(&self) -> &'static str {
        if self.completed { "[✔]" } else { "[ ]" }
    }

    /// Short id prefix shown in lists; enough to disambiguate by hand.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
