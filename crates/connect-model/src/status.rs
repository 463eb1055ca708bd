//! Activity status rows produced by the derivation engine.
//!
//! An [`ActivityStatus`] is a projection of one participant snapshot: it is
//! rebuilt on every derivation and never stored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used for every field that does not apply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Presentation token for the status icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Check,
    Times,
    Hashtag,
    None,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Check => "check",
            Icon::Times => "times",
            Icon::Hashtag => "hashtag",
            Icon::None => "none",
        }
    }

    /// Terminal glyph used by the CLI tables.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Check => "✓",
            Icon::Times => "✗",
            Icon::Hashtag => "#",
            Icon::None => "-",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a status row; maps to the row colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// CSS colour name the dashboard renders for this severity.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Ok => "green",
            Severity::Warning => "orange",
            Severity::Error => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a refusal option covered the activity. Renders as `Y`/`N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefusedFlag {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl RefusedFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefusedFlag::Yes => "Y",
            RefusedFlag::No => "N",
        }
    }

    pub fn is_refused(&self) -> bool {
        matches!(self, RefusedFlag::Yes)
    }
}

impl From<bool> for RefusedFlag {
    fn from(refused: bool) -> Self {
        if refused {
            RefusedFlag::Yes
        } else {
            RefusedFlag::No
        }
    }
}

impl fmt::Display for RefusedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the participant summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatus {
    pub icon: Icon,
    pub severity: Severity,
    /// Grouping label, e.g. "Baseline" or "Follow-Up 3-mo".
    pub timeline: String,
    /// Activity family, e.g. "Survey", "Sample", "Payment".
    pub category: String,
    /// Activity name, e.g. "Blood" or "SSN".
    pub item: String,
    pub status_text: String,
    /// `MM/DD/YYYY` or `N/A`.
    pub date: String,
    /// "Research", "Clinical", "Home" or `N/A`.
    pub setting: String,
    pub refused: RefusedFlag,
    pub extra: String,
}

impl ActivityStatus {
    /// A row with every variable field set to `N/A`.
    pub fn new(
        timeline: impl Into<String>,
        category: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self {
            icon: Icon::Times,
            severity: Severity::Error,
            timeline: timeline.into(),
            category: category.into(),
            item: item.into(),
            status_text: NOT_AVAILABLE.to_string(),
            date: NOT_AVAILABLE.to_string(),
            setting: NOT_AVAILABLE.to_string(),
            refused: RefusedFlag::No,
            extra: NOT_AVAILABLE.to_string(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, text: impl Into<String>, icon: Icon, severity: Severity) -> Self {
        self.status_text = text.into();
        self.icon = icon;
        self.severity = severity;
        self
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

    #[must_use]
    pub fn with_refused(mut self, refused: RefusedFlag) -> Self {
        self.refused = refused;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_row_defaults_to_not_available() {
        let row = ActivityStatus::new("Baseline", "Sample", "Urine");
        assert_eq!(row.status_text, NOT_AVAILABLE);
        assert_eq!(row.date, NOT_AVAILABLE);
        assert_eq!(row.setting, NOT_AVAILABLE);
        assert_eq!(row.extra, NOT_AVAILABLE);
        assert_eq!(row.refused, RefusedFlag::No);
        assert_eq!(row.severity, Severity::Error);
    }

    #[test]
    fn severity_colors() {
        assert_eq!(Severity::Ok.color(), "green");
        assert_eq!(Severity::Warning.color(), "orange");
        assert_eq!(Severity::Error.color(), "red");
    }
}
