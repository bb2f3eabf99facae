//! Bounded-concurrency resolution of many identifiers to detail records.
//!
//! Up to `concurrency` detail requests are in flight at once. Records are
//! returned in completion order, not input order; callers needing input order
//! should key the result by `app_id`. A failed item (transport error, non-2xx
//! status, page without a title) is excluded from the result and reported in
//! [`FanOutReport::failed`]. Nothing here is retried and the batch itself
//! never fails.

use futures::stream::{self, StreamExt};

use crate::client::{FetchRequest, Transport};
use crate::error::ScraperError;
use crate::parse::parse_app_details;
use crate::types::DetailRecord;
use crate::urls::{build_url, ResourceKind};

/// Outcome of one fan-out batch.
///
/// Every input identifier lands in exactly one of the two lists, so
/// `records.len() + failed.len()` equals the number of identifiers submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    /// Successfully parsed records in completion order.
    pub records: Vec<DetailRecord>,
    /// Identifiers that failed, in completion order.
    pub failed: Vec<String>,
}

/// Fetches and parses the detail page of every identifier in `app_ids`.
///
/// `concurrency` is clamped to at least 1.
pub async fn resolve_details(
    transport: &Transport,
    base_url: &str,
    app_ids: &[String],
    concurrency: usize,
) -> FanOutReport {
    let limit = concurrency.max(1);
    tracing::debug!(items = app_ids.len(), limit, "resolving detail pages");

    let outcomes: Vec<(&String, Result<DetailRecord, ScraperError>)> = stream::iter(app_ids)
        .map(|app_id| async move { (app_id, resolve_one(transport, base_url, app_id).await) })
        .buffer_unordered(limit)
        .collect()
        .await;

    let mut report = FanOutReport::default();
    for (app_id, outcome) in outcomes {
        match outcome {
            Ok(record) => report.records.push(record),
            Err(e) => {
                tracing::debug!(app_id = %app_id, error = %e, "detail page failed");
                report.failed.push(app_id.clone());
            }
        }
    }

    if !report.failed.is_empty() {
        tracing::error!(
            failed = report.failed.len(),
            succeeded = report.records.len(),
            app_ids = %report.failed.join(", "),
            "errors occurred resolving detail pages"
        );
    }
    report
}

async fn resolve_one(
    transport: &Transport,
    base_url: &str,
    app_id: &str,
) -> Result<DetailRecord, ScraperError> {
    let url = build_url(base_url, ResourceKind::Details, app_id)?;
    let body = transport.fetch(&FetchRequest::get(url.as_str())).await?;
    parse_app_details(&body, app_id, &url)
}
