//! Text and JSON output

use std::fmt::Write as _;

use anyhow::Result;
use dns_bulk_core::types::{DetailedReport, DnsRecord, ProviderDomain};

/// What a command produced.
#[derive(Debug)]
pub enum Output {
    Domains(Vec<ProviderDomain>),
    Records(Vec<DnsRecord>),
    Record(DnsRecord),
    Deleted(bool),
    Report(DetailedReport),
}

impl Output {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            let value = match self {
                Self::Domains(domains) => serde_json::to_string_pretty(domains)?,
                Self::Records(records) => serde_json::to_string_pretty(records)?,
                Self::Record(record) => serde_json::to_string_pretty(record)?,
                Self::Deleted(deleted) => serde_json::to_string_pretty(deleted)?,
                Self::Report(report) => serde_json::to_string_pretty(report)?,
            };
            return Ok(value);
        }

        Ok(match self {
            Self::Domains(domains) => domains_table(domains),
            Self::Records(records) => records_table(records),
            Self::Record(record) => records_table(std::slice::from_ref(record)),
            Self::Deleted(true) => "Record deleted".to_string(),
            Self::Deleted(false) => "Provider reported the record was not deleted".to_string(),
            Self::Report(report) => report_text(report),
        })
    }
}

fn domains_table(domains: &[ProviderDomain]) -> String {
    if domains.is_empty() {
        return "No domains".to_string();
    }
    let mut out = format!("{:<34} {:<30} {:<8} RECORDS", "ID", "NAME", "STATUS");
    for domain in domains {
        let status = serde_json::to_value(domain.status)
            .ok()
            .and_then(|v| v.as_str().map(ToString::to_string))
            .unwrap_or_default();
        let count = domain
            .record_count
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let _ = write!(out, "\n{:<34} {:<30} {:<8} {count}", domain.id, domain.name, status);
    }
    out
}

fn records_table(records: &[DnsRecord]) -> String {
    if records.is_empty() {
        return "No records".to_string();
    }
    let mut out = format!("{:<34} {:<6} {:<30} {:<6} CONTENT", "ID", "TYPE", "NAME", "TTL");
    for record in records {
        let ttl = if record.ttl == 1 {
            "auto".to_string()
        } else {
            record.ttl.to_string()
        };
        let content = match record.priority {
            Some(priority) => format!("{priority} {}", record.content),
            None => record.content.clone(),
        };
        let _ = write!(
            out,
            "\n{:<34} {:<6} {:<30} {ttl:<6} {content}",
            record.id, record.record_type, record.name
        );
    }
    out
}

fn report_text(report: &DetailedReport) -> String {
    let mut out = format!(
        "{}\n{}\nDomains processed: {}\nRecords affected: {}",
        report.headline(),
        report.summary(),
        report.domains_processed,
        report.records_affected
    );
    if !report.details.is_empty() {
        out.push_str("\n\nDetails:");
        for line in &report.details {
            let _ = write!(out, "\n  {line}");
        }
    }
    if !report.errors.is_empty() {
        out.push_str("\n\nErrors:");
        for line in &report.errors {
            let _ = write!(out, "\n  {line}");
        }
    }
    out
}
