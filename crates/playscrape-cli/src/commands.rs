//! Dispatch from parsed subcommands to `PlayClient` calls.

use anyhow::Context;
use playscrape_core::AppConfig;
use playscrape_scraper::{CollectionQuery, PlayClient};
use serde_json::{json, Value};

use crate::Commands;

/// Runs one subcommand and returns its JSON output.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the call fails. A
/// `resolve` batch only fails when the client cannot be built; per-item
/// failures are listed under `failed`.
pub(crate) async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<Value> {
    let client = PlayClient::new(config).context("failed to build storefront client")?;

    let value = match command {
        Commands::Details { app_id } => serde_json::to_value(client.details(&app_id).await?)?,
        Commands::Collection {
            collection,
            category,
            results,
            page,
            age,
            detailed,
        } => {
            let query = CollectionQuery {
                collection,
                category,
                results,
                page,
                age,
                detailed,
            };
            serde_json::to_value(client.collection(&query).await?)?
        }
        Commands::Developer {
            developer,
            results,
            page,
            detailed,
        } => serde_json::to_value(client.developer(&developer, results, page, detailed).await?)?,
        Commands::Search {
            query,
            page,
            detailed,
        } => serde_json::to_value(client.search(&query, page, detailed).await?)?,
        Commands::Similar {
            app_id,
            results,
            detailed,
        } => serde_json::to_value(client.similar(&app_id, results, detailed).await?)?,
        Commands::Suggestions { query } => json!(client.suggestions(&query).await?),
        Commands::Categories { include_promotions } => {
            json!(client.categories(!include_promotions).await?)
        }
        Commands::Resolve {
            app_ids,
            concurrency,
        } => {
            let limit = concurrency.unwrap_or(config.concurrent_requests);
            let report = client.resolve_details_with_limit(&app_ids, limit).await;
            if !report.failed.is_empty() {
                tracing::warn!(
                    failed = report.failed.len(),
                    "some app ids could not be resolved"
                );
            }
            json!({
                "records": report.records,
                "failed": report.failed,
            })
        }
    };
    Ok(value)
}
