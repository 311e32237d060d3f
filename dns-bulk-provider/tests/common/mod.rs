//! Shared helpers for live provider tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_bulk_provider::{
    DnsProvider, DnsRecord, DnsRecordPayload, DnsRecordType, ProviderCredentials, create_provider,
};

/// Skip the test when any of the given environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name so parallel runs never collide.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// TXT payload used by write tests.
pub fn txt_payload(name: &str, text: &str, ttl: u32) -> DnsRecordPayload {
    DnsRecordPayload {
        record_type: DnsRecordType::Txt,
        name: name.to_string(),
        content: format!("\"{text}\""),
        ttl,
        priority: None,
        proxied: None,
        data: None,
        comment: None,
        tags: None,
    }
}

/// Provider plus the zone live tests may write to.
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub zone_id: String,
}

impl TestContext {
    /// Cloudflare context from `CLOUDFLARE_API_TOKEN` and `CLOUDFLARE_ZONE_ID`.
    pub fn cloudflare() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let zone_id = env::var("CLOUDFLARE_ZONE_ID").ok()?;
        let provider = create_provider(ProviderCredentials::Cloudflare { api_token }).ok()?;
        Some(Self { provider, zone_id })
    }

    /// Create a throwaway TXT record.
    pub async fn create_test_record(&self) -> Option<DnsRecord> {
        let payload = txt_payload(&generate_test_record_name(), "integration-test", 300);
        self.provider.create_record(&self.zone_id, &payload).await.ok()
    }

    pub async fn cleanup_record(&self, record_id: &str) {
        let _ = self.provider.delete_record(&self.zone_id, record_id).await;
    }

    /// Delete every leftover `_test-` record in the zone.
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.provider.list_all_records(&self.zone_id).await {
            for record in records.iter().filter(|r| r.name.contains("_test-")) {
                self.cleanup_record(&record.id).await;
            }
        }
    }
}
