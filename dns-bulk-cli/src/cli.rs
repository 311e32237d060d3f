//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dns_bulk_core::types::{
    AddRecordSpec, DnsRecordPayload, DnsRecordType, OperationSpec, RecordFilter, UpdateRecordSpec,
};

/// Apply one DNS change across many zones
#[derive(Debug, Parser)]
#[command(name = "dns-bulk", version, propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: <config dir>/dns-bulk/config.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cloudflare API token
    #[arg(long, global = true, env = "CF_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Use the in-memory provider with sample zones instead of Cloudflare
    #[arg(long, global = true)]
    pub demo: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Provider calls in flight during a bulk run
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every zone of the account
    Domains,
    /// List every record of a zone
    Records {
        /// Zone id
        zone: String,
    },
    /// Create, replace or delete a single record
    Record {
        #[command(subcommand)]
        action: RecordCommand,
    },
    /// Apply one change to many zones
    Bulk {
        #[command(subcommand)]
        operation: BulkCommand,
    },
    /// Apply a JSON list of create/update/delete actions
    Apply {
        /// File holding `[{"type": "create", "zoneId": ..., "payload": {...}}, ...]`
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// Create a record
    Create {
        /// Zone id
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Replace a record
    Update {
        /// Zone id
        zone: String,
        /// Record id
        record_id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a record
    Delete {
        /// Zone id
        zone: String,
        /// Record id
        record_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BulkCommand {
    /// Set the TTL of every record
    Ttl {
        /// New TTL in seconds (1 = automatic)
        #[arg(long)]
        ttl: u32,
        #[command(flatten)]
        targets: Targets,
    },
    /// Add the same record to every zone
    Add {
        #[command(flatten)]
        record: RecordArgs,
        #[command(flatten)]
        targets: Targets,
    },
    /// Rewrite the records matching a filter
    Update {
        /// Only records of this type
        #[arg(long = "type", value_parser = parse_record_type)]
        record_type: Option<DnsRecordType>,
        /// Only records whose name contains this text
        #[arg(long)]
        name: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// New TTL in seconds
        #[arg(long)]
        ttl: Option<u32>,
        #[command(flatten)]
        targets: Targets,
    },
}

/// Fields of a record to write
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Record type (A, AAAA, CNAME, MX, TXT, ...)
    #[arg(long = "type", value_parser = parse_record_type)]
    pub record_type: DnsRecordType,
    /// Record name
    #[arg(long)]
    pub name: String,
    /// Record content
    #[arg(long)]
    pub content: String,
    /// TTL in seconds (1 = automatic)
    #[arg(long, default_value_t = 1)]
    pub ttl: u32,
    /// Priority (MX and SRV only)
    #[arg(long)]
    pub priority: Option<u16>,
    /// Proxy through the provider's CDN
    #[arg(long)]
    pub proxied: Option<bool>,
}

/// Zones a bulk run targets
#[derive(Debug, Args)]
pub struct Targets {
    /// Zone ids or names, in the order they should be processed
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub domains: Vec<String>,
    /// Every zone of the account
    #[arg(long)]
    pub all: bool,
}

impl RecordArgs {
    pub fn to_payload(&self) -> DnsRecordPayload {
        DnsRecordPayload {
            record_type: self.record_type.clone(),
            name: self.name.clone(),
            content: self.content.clone(),
            ttl: self.ttl,
            priority: self.priority,
            proxied: self.proxied,
            data: None,
            comment: None,
            tags: None,
        }
    }
}

impl BulkCommand {
    pub fn targets(&self) -> &Targets {
        match self {
            Self::Ttl { targets, .. } | Self::Add { targets, .. } | Self::Update { targets, .. } => {
                targets
            }
        }
    }

    /// The operation this command asks for; checked later by the engine.
    pub fn to_spec(&self) -> OperationSpec {
        match self {
            Self::Ttl { ttl, .. } => OperationSpec::UpdateTtl { ttl: *ttl },
            Self::Add { record, .. } => OperationSpec::AddRecord(AddRecordSpec {
                record_type: record.record_type.clone(),
                name: record.name.clone(),
                content: record.content.clone(),
                ttl: record.ttl,
                priority: record.priority,
                proxied: record.proxied,
            }),
            Self::Update {
                record_type,
                name,
                content,
                ttl,
                ..
            } => OperationSpec::UpdateRecord(UpdateRecordSpec {
                filter: RecordFilter {
                    record_type: record_type.clone(),
                    name: name.clone(),
                },
                new_content: content.clone(),
                new_ttl: *ttl,
            }),
        }
    }
}

fn parse_record_type(value: &str) -> Result<DnsRecordType, String> {
    if value.trim().is_empty() {
        return Err("record type must not be empty".to_string());
    }
    Ok(DnsRecordType::parse(value))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dns-bulk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bulk_ttl_with_domains() {
        let cli = parse(&["--demo", "bulk", "ttl", "--ttl", "300", "a.com", "z2"]);
        let Command::Bulk { operation } = cli.command else {
            panic!("expected bulk");
        };
        assert_eq!(operation.targets().domains, ["a.com", "z2"]);
        assert!(!operation.targets().all);
        assert_eq!(operation.to_spec(), OperationSpec::UpdateTtl { ttl: 300 });
        assert!(cli.demo);
    }

    #[test]
    fn bulk_requires_targets() {
        let result = Cli::try_parse_from(["dns-bulk", "bulk", "ttl", "--ttl", "300"]);
        assert!(result.is_err());
        let conflicting =
            Cli::try_parse_from(["dns-bulk", "bulk", "ttl", "--ttl", "300", "--all", "a.com"]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn bulk_add_maps_to_spec() {
        let cli = parse(&[
            "bulk", "add", "--type", "mx", "--name", "@", "--content", "mail.a.com", "--ttl",
            "300", "--priority", "5", "--all",
        ]);
        let Command::Bulk { operation } = cli.command else {
            panic!("expected bulk");
        };
        let OperationSpec::AddRecord(spec) = operation.to_spec() else {
            panic!("expected add");
        };
        assert_eq!(spec.record_type, DnsRecordType::Mx);
        assert_eq!(spec.priority, Some(5));
        assert!(operation.targets().all);
    }

    #[test]
    fn bulk_update_filter_and_overrides() {
        let cli = parse(&[
            "--json", "bulk", "update", "--type", "A", "--name", "api", "--content",
            "198.51.100.7", "a.com",
        ]);
        assert!(cli.json);
        let Command::Bulk { operation } = cli.command else {
            panic!("expected bulk");
        };
        let OperationSpec::UpdateRecord(spec) = operation.to_spec() else {
            panic!("expected update");
        };
        assert_eq!(spec.filter.record_type, Some(DnsRecordType::A));
        assert_eq!(spec.filter.name.as_deref(), Some("api"));
        assert_eq!(spec.new_content.as_deref(), Some("198.51.100.7"));
        assert_eq!(spec.new_ttl, None);
    }

    #[test]
    fn record_create_defaults_to_automatic_ttl() {
        let cli = parse(&[
            "record", "create", "z1", "--type", "TXT", "--name", "_v", "--content", "token",
        ]);
        let Command::Record {
            action: RecordCommand::Create { zone, record },
        } = cli.command
        else {
            panic!("expected record create");
        };
        assert_eq!(zone, "z1");
        let payload = record.to_payload();
        assert_eq!(payload.ttl, 1);
        assert_eq!(payload.record_type, DnsRecordType::Txt);
        assert_eq!(payload.priority, None);
    }
}
