//! Command execution

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use dns_bulk_core::services::{BulkOperationService, DnsService, DomainService};
use dns_bulk_core::types::{Action, ProgressEvent, ProgressSender};
use dns_bulk_core::ServiceContext;
use dns_bulk_provider::create_provider;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cli::{BulkCommand, Cli, Command, RecordCommand};
use crate::config::AppConfig;
use crate::render::Output;

/// Load configuration, build the provider and run the command.
pub async fn execute(cli: Cli) -> Result<Output> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let credentials = config.credentials(cli.token.as_deref(), cli.demo)?;
    let provider = create_provider(credentials).context("Failed to set up the DNS provider")?;
    tracing::debug!("Using provider {}", provider.id());

    let ctx = Arc::new(ServiceContext::with_config(
        provider,
        config.engine(cli.concurrency),
    ));
    run(cli.command, ctx).await
}

pub async fn run(command: Command, ctx: Arc<ServiceContext>) -> Result<Output> {
    match command {
        Command::Domains => Ok(Output::Domains(
            DomainService::new(ctx).list_domains().await?,
        )),
        Command::Records { zone } => Ok(Output::Records(
            DnsService::new(ctx).list_records(&zone).await?,
        )),
        Command::Record { action } => record(action, ctx).await,
        Command::Bulk { operation } => bulk(&operation, ctx).await,
        Command::Apply { file } => apply(&file, ctx).await,
    }
}

async fn record(action: RecordCommand, ctx: Arc<ServiceContext>) -> Result<Output> {
    let service = DnsService::new(ctx);
    let output = match action {
        RecordCommand::Create { zone, record } => {
            Output::Record(service.create_record(&zone, &record.to_payload()).await?)
        }
        RecordCommand::Update {
            zone,
            record_id,
            record,
        } => Output::Record(
            service
                .update_record(&zone, &record_id, &record.to_payload())
                .await?,
        ),
        RecordCommand::Delete { zone, record_id } => {
            Output::Deleted(service.delete_record(&zone, &record_id).await?)
        }
    };
    Ok(output)
}

async fn bulk(operation: &BulkCommand, ctx: Arc<ServiceContext>) -> Result<Output> {
    let targets = operation.targets();
    let domain_service = DomainService::new(Arc::clone(&ctx));
    let domains = if targets.all {
        domain_service.all_targets().await?
    } else {
        domain_service.resolve(targets.domains.as_slice()).await?
    };

    let (tx, reporter) = progress_reporter();
    let report = BulkOperationService::new(ctx)
        .run_with_progress(operation.to_spec(), &domains, Some(tx))
        .await;
    reporter.await.context("Progress reporter stopped unexpectedly")?;
    Ok(Output::Report(report?))
}

async fn apply(file: &Path, ctx: Arc<ServiceContext>) -> Result<Output> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid action list in {}", file.display()))?;
    // Entries are decoded one by one so a bad entry only fails its own slot.
    let actions = entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<Action>(entry).map_err(|e| format!("invalid action: {e}"))
        })
        .collect();

    let (tx, reporter) = progress_reporter();
    let report = BulkOperationService::new(ctx)
        .apply_entries(actions, Some(tx))
        .await;
    reporter.await.context("Progress reporter stopped unexpectedly")?;
    Ok(Output::Report(report))
}

/// Log progress events until the engine drops its sender.
fn progress_reporter() -> (ProgressSender, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::PhaseChanged { phase } => tracing::debug!("Phase: {phase:?}"),
                event => tracing::info!("{event}"),
            }
        }
    });
    (tx, handle)
}
