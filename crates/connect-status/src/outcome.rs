//! Tagged outcomes per activity family and their rendering into rows.

use connect_model::{ActivityStatus, Icon, NOT_AVAILABLE, RefusedFlag, Severity};

/// Identity of an activity row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityInfo {
    pub timeline: &'static str,
    pub category: &'static str,
    pub item: &'static str,
}

impl ActivityInfo {
    pub const fn new(timeline: &'static str, category: &'static str, item: &'static str) -> Self {
        Self {
            timeline,
            category,
            item,
        }
    }

    pub fn row(&self) -> ActivityStatus {
        ActivityStatus::new(self.timeline, self.category, self.item)
    }
}

/// The variable part of an [`ActivityStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub text: String,
    pub icon: Icon,
    pub severity: Severity,
    pub date: String,
    pub setting: String,
    pub refused: RefusedFlag,
}

impl Verdict {
    pub fn new(text: impl Into<String>, icon: Icon, severity: Severity) -> Self {
        Self {
            text: text.into(),
            icon,
            severity,
            date: NOT_AVAILABLE.to_string(),
            setting: NOT_AVAILABLE.to_string(),
            refused: RefusedFlag::No,
        }
    }

    /// `N/A` with the error icon: the projection of missing data.
    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, Icon::Times, Severity::Error)
    }

    /// A refusal, shown with the family's absent text.
    pub fn refused(text: impl Into<String>) -> Self {
        Self {
            refused: RefusedFlag::Yes,
            ..Self::new(text, Icon::Times, Severity::Error)
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    #[must_use]
    pub fn with_setting(mut self, setting: impl Into<String>) -> Self {
        self.setting = setting.into();
        self
    }

    pub fn render(self, info: &ActivityInfo) -> ActivityStatus {
        info.row()
            .with_status(self.text, self.icon, self.severity)
            .with_date(self.date)
            .with_setting(self.setting)
            .with_refused(self.refused)
    }
}

/// Status text used by one activity for each [`Progress`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressLabels {
    pub completed: &'static str,
    pub started: &'static str,
    pub not_started: &'static str,
    pub refused: &'static str,
}

impl ProgressLabels {
    pub const SURVEY: Self = Self {
        completed: "Submitted",
        started: "Started",
        not_started: "Not Started",
        refused: "Not Started",
    };
}

/// Outcome for surveys and other started/completed milestones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Refused,
    Absent,
    NotStarted,
    Started { date: String },
    Completed { date: String },
    NotYetEligible,
    Unrecognized,
}

impl Progress {
    pub fn verdict(&self, labels: &ProgressLabels) -> Verdict {
        match self {
            Progress::Refused => Verdict::refused(labels.refused),
            Progress::Absent | Progress::Unrecognized => Verdict::not_available(),
            Progress::NotStarted => Verdict::new(labels.not_started, Icon::Times, Severity::Error),
            Progress::Started { date } => {
                Verdict::new(labels.started, Icon::Hashtag, Severity::Warning).with_date(date)
            }
            Progress::Completed { date } => {
                Verdict::new(labels.completed, Icon::Check, Severity::Ok).with_date(date)
            }
            Progress::NotYetEligible => {
                Verdict::new("Not Yet Eligible", Icon::None, Severity::Warning)
            }
        }
    }
}

/// Where a sample was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Research,
    Clinical,
    Home,
    Unknown,
}

impl Setting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Setting::Research => "Research",
            Setting::Clinical => "Clinical",
            Setting::Home => "Home",
            Setting::Unknown => NOT_AVAILABLE,
        }
    }
}

pub const NOT_COLLECTED: &str = "Not Collected";

/// Outcome for biospecimen collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Refused,
    Absent,
    NotCollected { setting: Setting },
    Collected { setting: Setting, date: String },
}

impl Collection {
    pub fn verdict(&self) -> Verdict {
        match self {
            Collection::Refused => Verdict::refused(NOT_COLLECTED),
            Collection::Absent => Verdict::new(NOT_COLLECTED, Icon::Times, Severity::Error),
            Collection::NotCollected { setting } => {
                Verdict::new(NOT_COLLECTED, Icon::Times, Severity::Error)
                    .with_setting(setting.as_str())
            }
            Collection::Collected { setting, date } => {
                Verdict::new("Collected", Icon::Check, Severity::Ok)
                    .with_setting(setting.as_str())
                    .with_date(date)
            }
        }
    }
}
