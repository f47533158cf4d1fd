//! Filtering, pagination and aggregates over provider email logs.

use serde::{Deserialize, Serialize};

use crate::models::email::{EmailLog, EmailStatus};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<EmailStatus>,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl LogQuery {
    /// Page and limit are clamped rather than rejected. An unknown status is
    /// an error; `all` means no filter.
    pub fn from_params(
        page: Option<i64>,
        limit: Option<i64>,
        status: Option<&str>,
    ) -> Result<Self, String> {
        let status = match status.map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse::<EmailStatus>()?),
        };

        Ok(Self {
            page: page.map_or(1, |p| p.clamp(1, u32::MAX as i64) as u32),
            limit: limit.map_or(DEFAULT_LIMIT, |l| l.clamp(1, MAX_LIMIT as i64) as u32),
            status,
        })
    }
}

/// Aggregate counts over one page of logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSummary {
    pub delivered: usize,
    pub failed: usize,
    pub pending: usize,
    pub opened: usize,
    pub unopened: usize,
}

impl LogSummary {
    /// `unopened` only counts delivered mail; failed or pending mail cannot
    /// have been opened yet.
    pub fn of(logs: &[EmailLog]) -> Self {
        logs.iter().fold(Self::default(), |mut acc, log| {
            match log.status {
                EmailStatus::Delivered => acc.delivered += 1,
                EmailStatus::Failed => acc.failed += 1,
                EmailStatus::Pending => acc.pending += 1,
            }
            if log.opened {
                acc.opened += 1;
            } else if log.status == EmailStatus::Delivered {
                acc.unopened += 1;
            }
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub data: Vec<EmailLog>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: u32,
    pub summary: LogSummary,
}

pub fn total_pages(total: usize, limit: u32) -> u32 {
    let limit = limit.max(1) as usize;
    total.div_ceil(limit).max(1) as u32
}

pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1) as i64) as u32
}

/// Filters by status, orders newest first and cuts out the requested page.
/// A page past the end is pulled back to the last page.
pub fn paginate(mut logs: Vec<EmailLog>, query: &LogQuery) -> LogPage {
    if let Some(status) = query.status {
        logs.retain(|log| log.status == status);
    }
    logs.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));

    let total = logs.len();
    let total_pages = total_pages(total, query.limit);
    let page = clamp_page(query.page as i64, total_pages);

    let data: Vec<EmailLog> = logs
        .into_iter()
        .skip((page as usize - 1) * query.limit as usize)
        .take(query.limit as usize)
        .collect();

    LogPage {
        summary: LogSummary::of(&data),
        data,
        page,
        limit: query.limit,
        total,
        total_pages,
    }
}

/// Recipient addresses of the given logs, one per line.
pub fn export_recipients(logs: &[EmailLog]) -> String {
    logs.iter()
        .map(|log| log.to.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use super::*;

    pub fn log(n: u32, status: EmailStatus, opened: bool) -> EmailLog {
        EmailLog {
            id: format!("email-{n}"),
            batch_id: "batch-1".into(),
            account_id: None,
            to: format!("user{n}@example.com"),
            from: "news@example.com".into(),
            subject: format!("Issue #{n}"),
            status,
            error: (status == EmailStatus::Failed).then(|| "rejected".to_string()),
            opened,
            open_count: opened as u32,
            sent_at: Utc.timestamp_opt(1_700_000_000 + n as i64 * 60, 0).unwrap(),
        }
    }
}
