//! Client-side state for the delivery log table.
//!
//! The viewer decides *what* to fetch and keeps the last good page around;
//! transport is left to the caller. Callers fetch whenever a method returns
//! `true` or after construction, using [`LogViewer::query`].

use crate::{
    logs::{self, DEFAULT_LIMIT, LogPage, LogQuery, LogSummary, MAX_LIMIT},
    models::email::EmailStatus,
};

#[derive(Debug, Default)]
pub struct LogViewer {
    account_id: Option<String>,
    status: Option<EmailStatus>,
    page: u32,
    limit: u32,
    current: Option<LogPage>,
}

impl LogViewer {
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            ..Default::default()
        }
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            ..Self::new()
        }
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn status(&self) -> Option<EmailStatus> {
        self.status
    }

    pub fn current(&self) -> Option<&LogPage> {
        self.current.as_ref()
    }

    pub fn select_account(&mut self, account_id: impl Into<String>) -> bool {
        let account_id = account_id.into();
        if self.account_id.as_deref() == Some(account_id.as_str()) {
            return false;
        }
        self.account_id = Some(account_id);
        self.page = 1;
        true
    }

    pub fn set_filter(&mut self, status: Option<EmailStatus>) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status;
        self.page = 1;
        true
    }

    /// Moves to `page`, clamped to the bounds of the loaded listing.
    pub fn go_to(&mut self, page: i64) -> bool {
        let total_pages = self.current.as_ref().map_or(1, |p| p.total_pages);
        let target = logs::clamp_page(page, total_pages);
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page as i64 + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.page as i64 - 1)
    }

    pub fn query(&self) -> Option<(&str, LogQuery)> {
        let account_id = self.account_id.as_deref()?;
        Some((
            account_id,
            LogQuery {
                page: self.page,
                limit: self.limit,
                status: self.status,
            },
        ))
    }

    /// Applies a fetch result. On failure the previous page stays in place
    /// and the returned text is meant for a toast.
    pub fn receive<E: std::fmt::Display>(&mut self, result: Result<LogPage, E>) -> Option<String> {
        match result {
            Ok(page) => {
                self.page = page.page;
                self.limit = page.limit;
                self.current = Some(page);
                None
            }
            Err(e) => {
                tracing::warn!("failed to load email logs: {e}");
                Some(format!("Failed to load email logs: {e}"))
            }
        }
    }

    pub fn summary(&self) -> LogSummary {
        self.current
            .as_ref()
            .map(|p| LogSummary::of(&p.data))
            .unwrap_or_default()
    }

    pub fn export(&self) -> String {
        self.current
            .as_ref()
            .map(|p| logs::export_recipients(&p.data))
            .unwrap_or_default()
    }
}
