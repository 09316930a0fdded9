//! Report history screen state
//!
//! Wraps a [`ReportList`] with the time-boxed undo affordance shown after a
//! deletion. Once the window passes the pending deletion is dismissed and
//! the report can no longer be restored.

use app_core::{DeletedReport, Report, ReportId, ReportList};
use i18n::keys;
use std::time::Duration;
use tokio::time::Instant;

use crate::language::LanguageContext;

/// How long the undo affordance stays up after a deletion
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// Dismissible notice offered after a deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoNotice {
    /// Deleted report
    pub report_id: ReportId,
    /// Medication name, for the notice text
    pub medication: String,
    /// When the undo affordance disappears
    pub expires_at: Instant,
}

impl UndoNotice {
    /// Localized notice text
    pub fn message(&self, language: &LanguageContext) -> String {
        language.t(keys::REPORTS_DELETED, &[("medication", &self.medication)])
    }
}

/// State behind the report history screen
#[derive(Debug)]
pub struct ReportHistory {
    list: ReportList,
    undo_window: Duration,
    undo_deadline: Option<Instant>,
}

impl ReportHistory {
    /// Create the screen state with the default undo window
    pub fn new(list: ReportList) -> Self {
        Self::with_undo_window(list, DEFAULT_UNDO_WINDOW)
    }

    /// Create the screen state with a custom undo window
    pub fn with_undo_window(list: ReportList, undo_window: Duration) -> Self {
        Self { list, undo_window, undo_deadline: None }
    }

    /// Active reports
    pub fn reports(&self) -> &[Report] {
        self.list.reports()
    }

    /// Recycle log
    pub fn deleted(&self) -> &[DeletedReport] {
        self.list.deleted()
    }

    /// The underlying list
    pub fn list(&self) -> &ReportList {
        &self.list
    }

    /// Add a newly filed report
    pub fn add(&mut self, report: Report) {
        self.list.push(report);
    }

    /// Delete the report at `index` and open the undo window
    pub fn delete(&mut self, index: usize) -> Option<UndoNotice> {
        let now = Instant::now();
        let report = self.list.delete(index)?;
        let notice = UndoNotice {
            report_id: report.id,
            medication: report.medication.clone(),
            expires_at: now + self.undo_window,
        };
        self.undo_deadline = Some(notice.expires_at);
        Some(notice)
    }

    /// Whether the undo affordance should still be shown
    pub fn undo_available(&mut self) -> bool {
        self.expire();
        self.undo_deadline.is_some()
    }

    /// Time left before the undo affordance disappears
    pub fn undo_remaining(&mut self) -> Option<Duration> {
        self.expire();
        self.undo_deadline.map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Restore the last deletion if its window is still open
    pub fn undo(&mut self) -> Option<Report> {
        if !self.undo_available() {
            return None;
        }
        self.undo_deadline = None;
        self.list.undo().cloned()
    }

    fn expire(&mut self) {
        if let Some(deadline) = self.undo_deadline {
            if Instant::now() >= deadline {
                tracing::debug!("undo window closed");
                self.undo_deadline = None;
                self.list.dismiss_undo();
            }
        }
    }
}
