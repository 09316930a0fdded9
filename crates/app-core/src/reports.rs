//! Medication reports and the recycle log
//!
//! Users file reports about expired or counterfeit medication. Deleting a
//! report moves it to a recycle log; the most recent deletion can be undone,
//! which puts the report back at the position it was removed from.
//!
//! Reports carry a [`ReportId`] assigned at creation. Undo matches log
//! entries by that id, so two reports for the same medication on the same
//! date never collide.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(Uuid);

impl ReportId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the user is reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Past its expiry date
    #[default]
    Expired,
    /// Suspected counterfeit
    Counterfeit,
    /// Anything else (damaged packaging, wrong labelling, ...)
    Other,
}

/// A submitted medication report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Stable identifier
    pub id: ReportId,
    /// Medication name as entered
    pub medication: String,
    /// Date the issue was observed
    pub date: NaiveDate,
    /// Report type
    pub kind: ReportKind,
    /// Pharmacy or place of purchase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Report {
    /// Create a report with a fresh id
    pub fn new(medication: impl Into<String>, date: NaiveDate, kind: ReportKind) -> Self {
        Self {
            id: ReportId::new(),
            medication: medication.into(),
            date,
            kind,
            location: None,
            details: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// A report in the recycle log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedReport {
    /// The removed report
    pub report: Report,
    /// Position it occupied in the active list
    pub index: usize,
    /// When it was removed
    pub deleted_at: DateTime<Utc>,
}

/// Active reports plus the recycle log
///
/// At most one deletion is pending undo at a time. A new deletion replaces
/// the pending one; the earlier entry stays in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportList {
    active: Vec<Report>,
    deleted: Vec<DeletedReport>,
    #[serde(default)]
    last_deleted: Option<ReportId>,
}

impl ReportList {
    /// Create a list from existing reports
    pub fn new(reports: Vec<Report>) -> Self {
        Self { active: reports, deleted: Vec::new(), last_deleted: None }
    }

    /// Active reports in display order
    pub fn reports(&self) -> &[Report] {
        &self.active
    }

    /// Recycle log, oldest deletion first
    pub fn deleted(&self) -> &[DeletedReport] {
        &self.deleted
    }

    /// Number of active reports
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether there are no active reports
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Append a newly filed report
    pub fn push(&mut self, report: Report) {
        self.active.push(report);
    }

    /// Position of an active report
    pub fn position(&self, id: ReportId) -> Option<usize> {
        self.active.iter().position(|report| report.id == id)
    }

    /// The deletion that [`ReportList::undo`] would restore
    pub fn pending_undo(&self) -> Option<&DeletedReport> {
        let id = self.last_deleted?;
        self.deleted.iter().rev().find(|entry| entry.report.id == id)
    }

    /// Remove the report at `index`, logging it and marking it as the
    /// pending undo. Out-of-range indices are ignored.
    pub fn delete(&mut self, index: usize) -> Option<&Report> {
        self.delete_at(index, Utc::now())
    }

    /// Remove an active report by id
    pub fn delete_by_id(&mut self, id: ReportId) -> Option<&Report> {
        let index = self.position(id)?;
        self.delete(index)
    }

    fn delete_at(&mut self, index: usize, now: DateTime<Utc>) -> Option<&Report> {
        if index >= self.active.len() {
            return None;
        }

        let report = self.active.remove(index);
        tracing::debug!(id = %report.id, index, "report moved to recycle log");
        self.last_deleted = Some(report.id);
        self.deleted.push(DeletedReport { report, index, deleted_at: now });
        self.deleted.last().map(|entry| &entry.report)
    }

    /// Restore the pending deletion at its original index
    ///
    /// The index is clamped to the current length if the list shrank in the
    /// meantime. Without a pending deletion this does nothing.
    pub fn undo(&mut self) -> Option<&Report> {
        let id = self.last_deleted.take()?;
        let position = self.deleted.iter().rposition(|entry| entry.report.id == id)?;
        let entry = self.deleted.remove(position);

        let index = entry.index.min(self.active.len());
        tracing::debug!(id = %id, index, "report restored from recycle log");
        self.active.insert(index, entry.report);
        self.active.get(index)
    }

    /// Drop the pending undo without restoring anything
    pub fn dismiss_undo(&mut self) {
        self.last_deleted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn three_reports() -> ReportList {
        ReportList::new(vec![
            Report::new("Amoxicillin", date(1), ReportKind::Expired),
            Report::new("Paracetamol", date(2), ReportKind::Counterfeit).with_location("Main St Pharmacy"),
            Report::new("Ibuprofen", date(3), ReportKind::Other).with_details("Broken seal"),
        ])
    }

    #[test]
    fn test_delete_then_undo_restores_list() {
        let mut list = three_reports();
        let original = list.reports().to_vec();

        let deleted = list.delete(1).cloned().unwrap();
        assert_eq!(deleted.medication, "Paracetamol");
        assert_eq!(list.len(), 2);
        assert_eq!(list.deleted().len(), 1);

        let restored = list.undo().cloned().unwrap();
        assert_eq!(restored, deleted);
        assert_eq!(list.reports(), original.as_slice());
        assert!(list.deleted().is_empty());
    }

    #[test]
    fn test_second_undo_is_noop() {
        let mut list = three_reports();
        list.delete(0);
        assert!(list.undo().is_some());

        let snapshot = list.clone();
        assert!(list.undo().is_none());
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_undo_without_delete_is_noop() {
        let mut list = three_reports();
        assert!(list.undo().is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_delete_out_of_range_is_ignored() {
        let mut list = three_reports();
        assert!(list.delete(3).is_none());
        assert_eq!(list.len(), 3);
        assert!(list.pending_undo().is_none());
    }

    #[test]
    fn test_only_latest_deletion_is_pending() {
        let mut list = three_reports();
        list.delete(0);
        list.delete(0);

        assert_eq!(list.deleted().len(), 2);
        assert_eq!(list.pending_undo().unwrap().report.medication, "Paracetamol");

        list.undo();
        assert_eq!(list.reports()[0].medication, "Paracetamol");
        assert_eq!(list.deleted().len(), 1);
        assert_eq!(list.deleted()[0].report.medication, "Amoxicillin");
        assert!(list.undo().is_none());
    }

    #[test]
    fn test_identical_name_and_date_do_not_collide() {
        let older = Report::new("Amoxicillin", date(1), ReportKind::Expired);
        let newer = Report::new("Amoxicillin", date(1), ReportKind::Expired);
        let mut list = ReportList::new(vec![older.clone(), newer.clone()]);

        list.delete(0);
        list.dismiss_undo();
        list.delete(0);
        list.undo();

        assert_eq!(list.reports(), &[newer]);
        assert_eq!(list.deleted().len(), 1);
        assert_eq!(list.deleted()[0].report.id, older.id);
    }

    #[test]
    fn test_undo_clamps_index_when_list_shrank() {
        let mut list = three_reports();
        let last = list.reports()[2].clone();
        list.delete(2);
        // Another screen cleared the list in the meantime
        let remaining: Vec<_> = list.reports().iter().map(|r| r.id).collect();
        list.active.retain(|r| !remaining.contains(&r.id));

        assert_eq!(list.undo(), Some(&last));
        assert_eq!(list.reports(), &[last]);
    }

    #[test]
    fn test_delete_by_id() {
        let mut list = three_reports();
        let id = list.reports()[2].id;

        assert_eq!(list.delete_by_id(id).map(|r| r.id), Some(id));
        assert!(list.delete_by_id(id).is_none());
        assert_eq!(list.deleted()[0].index, 2);
    }

    #[test]
    fn test_report_serialization() {
        let report = Report::new("Amoxicillin", date(1), ReportKind::Counterfeit);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["medication"], "Amoxicillin");
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["kind"], "counterfeit");
        assert_eq!(json["id"], report.id.to_string());
        assert!(json.get("location").is_none());
    }
}
