use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Timeline width used when a project has no interval set.
pub const FALLBACK_INTERVAL_DAYS: u32 = 80;

/// An aircraft maintenance project (one airframe on one work order).
///
/// All task day offsets are relative to `start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub customer: String,
    /// Aircraft tail / registration.
    #[serde(default)]
    pub ac: String,
    #[serde(default)]
    pub model: String,
    /// Manufacturer serial number.
    #[serde(default)]
    pub msn: String,
    /// Work order id.
    #[serde(default)]
    pub wo: String,
    /// Line production id.
    #[serde(default)]
    pub lp: String,
    /// Project manager.
    #[serde(default)]
    pub pm: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub interval_days: u32,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "UNTITLED".to_string(),
            customer: String::new(),
            ac: String::new(),
            model: String::new(),
            msn: String::new(),
            wo: String::new(),
            lp: String::new(),
            pm: String::new(),
            start_date: chrono::Local::now().date_naive(),
            interval_days: 30,
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            ..Default::default()
        }
    }

    /// Visible timeline width in days.
    pub fn timeline_days(&self) -> u32 {
        if self.interval_days == 0 {
            FALLBACK_INTERVAL_DAYS
        } else {
            self.interval_days
        }
    }
}
