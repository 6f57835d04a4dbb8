// ── Filter predicates for record snapshots ──
//
// Used by the directory view and the alert query to derive filtered
// views without touching the canonical store.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::{Alert, AlertSeverity, AlertStatus, Camera, CameraStatus};

/// Case-insensitive substring test. `needle` must already be lowercase.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ── Camera filter ────────────────────────────────────────────────────

/// Camera list criteria. Unset (or empty) fields exclude nothing; set
/// fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraFilter {
    /// Matched case-insensitively against name or location.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<CameraStatus>,
    /// Exact location match ("group" in the camera list UI).
    #[serde(default)]
    pub group: Option<String>,
}

impl CameraFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: CameraStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_none() && non_empty(self.group.as_deref()).is_none()
    }

    pub fn matches(&self, camera: &Camera) -> bool {
        let search = self.search.to_lowercase();
        self.matches_folded(camera, &search)
    }

    /// Same as [`matches`](Self::matches) with the search text already
    /// lowercased, so list filtering folds the needle once.
    pub(crate) fn matches_folded(&self, camera: &Camera, search: &str) -> bool {
        let matches_search = contains_folded(&camera.name, search)
            || contains_folded(&camera.location, search);
        let matches_status = self.status.is_none_or(|s| camera.status == s);
        let matches_group =
            non_empty(self.group.as_deref()).is_none_or(|g| camera.location == g);

        matches_search && matches_status && matches_group
    }
}

// ── Alert query ──────────────────────────────────────────────────────

/// Status clause of an alert query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AlertStatusFilter {
    /// Everything except Deleted.
    All,
    Unread,
    Resolved,
    Deleted,
    /// No status constraint, same as leaving the clause unset.
    Read,
}

impl AlertStatusFilter {
    pub fn matches(self, status: AlertStatus) -> bool {
        match self {
            Self::All => status != AlertStatus::Deleted,
            Self::Unread => status == AlertStatus::Unread,
            Self::Resolved => status == AlertStatus::Resolved,
            Self::Deleted => status == AlertStatus::Deleted,
            Self::Read => true,
        }
    }
}

/// Alert list criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    #[serde(default)]
    pub status: Option<AlertStatusFilter>,
    #[serde(default)]
    pub severity: Option<AlertSeverity>,
    #[serde(default)]
    pub location: Option<String>,
    /// Matched case-insensitively against type, location, or camera name.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl AlertQuery {
    /// Every alert except deleted ones.
    pub fn all() -> Self {
        Self {
            status: Some(AlertStatusFilter::All),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: AlertStatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn between(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Evaluate the five clauses in order: status, severity, location,
    /// time range, search. The first failing clause excludes the alert.
    pub fn matches(&self, alert: &Alert) -> bool {
        let search = non_empty(self.search.as_deref()).map(str::to_lowercase);
        self.matches_folded(alert, search.as_deref())
    }

    pub(crate) fn matches_folded(&self, alert: &Alert, search: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if !status.matches(alert.status) {
                return false;
            }
        }

        if self.severity.is_some_and(|s| alert.severity != s) {
            return false;
        }

        if non_empty(self.location.as_deref()).is_some_and(|l| alert.location != l) {
            return false;
        }

        if self.start_time.is_some_and(|start| alert.timestamp < start) {
            return false;
        }
        if self.end_time.is_some_and(|end| alert.timestamp > end) {
            return false;
        }

        match search {
            Some(s) => {
                contains_folded(&alert.alert_type, s)
                    || contains_folded(&alert.location, s)
                    || contains_folded(&alert.camera_name, s)
            }
            None => true,
        }
    }

    /// Filter and sort a snapshot.
    pub fn apply(&self, alerts: &[Arc<Alert>]) -> Vec<Arc<Alert>> {
        let search = non_empty(self.search.as_deref()).map(str::to_lowercase);
        let mut results: Vec<Arc<Alert>> = alerts
            .iter()
            .filter(|a| self.matches_folded(a, search.as_deref()))
            .cloned()
            .collect();
        sort_alerts(&mut results);
        results
    }
}

/// Unread alerts first; within equal unread-ness, newest first.
pub fn sort_alerts(alerts: &mut [Arc<Alert>]) {
    alerts.sort_by(|a, b| match (a.status.is_unread(), b.status.is_unread()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b.timestamp.cmp(&a.timestamp),
    });
}
