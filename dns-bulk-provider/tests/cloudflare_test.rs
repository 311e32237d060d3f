//! Cloudflare live integration tests
//!
//! Run with:
//! ```bash
//! CLOUDFLARE_API_TOKEN=xxx CLOUDFLARE_ZONE_ID=xxx \
//!     cargo test -p dns-bulk-provider --test cloudflare_test -- --ignored --nocapture --test-threads=1
//! ```

#![cfg(feature = "cloudflare")]

mod common;

use common::{TestContext, txt_payload};
use dns_bulk_provider::{PaginationParams, ProviderError};

const CREDENTIAL_VARS: [&str; 2] = ["CLOUDFLARE_API_TOKEN", "CLOUDFLARE_ZONE_ID"];

// ============ Read tests ============

#[tokio::test]
#[ignore]
async fn test_cloudflare_validate_credentials() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let valid = require_ok!(ctx.provider.validate_credentials().await);
    assert!(valid, "token should be active");
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_list_domains_clamps_page_size() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let params = PaginationParams {
        page: 1,
        page_size: 500,
    };
    let page = require_ok!(ctx.provider.list_domains(&params).await);
    assert!(page.page_size <= 50, "zones page size not clamped: {}", page.page_size);
    assert!(
        page.items.iter().any(|d| d.id == ctx.zone_id),
        "test zone not listed on the first page"
    );
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_list_all_records() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let records = require_ok!(ctx.provider.list_all_records(&ctx.zone_id).await);
    assert!(records.iter().all(|r| r.zone_id == ctx.zone_id));
    println!("listed {} record(s)", records.len());
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_unknown_zone() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let result = ctx
        .provider
        .list_records("00000000000000000000000000000000", &PaginationParams::default())
        .await;
    assert!(result.is_err(), "listing a missing zone should fail");
    if let Err(e) = result {
        assert!(
            matches!(
                e,
                ProviderError::DomainNotFound { .. }
                    | ProviderError::PermissionDenied { .. }
                    | ProviderError::InvalidCredentials { .. }
                    | ProviderError::Unknown { .. }
            ),
            "unexpected error: {e:?}"
        );
    }
}

// ============ Write tests ============

#[tokio::test]
#[ignore]
async fn test_cloudflare_record_lifecycle() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let created = require_some!(ctx.create_test_record().await, "create failed");
    assert_eq!(created.ttl, 300);

    let mut payload = created.to_payload();
    payload.ttl = 600;
    let updated = ctx
        .provider
        .update_record(&ctx.zone_id, &created.id, &payload)
        .await;
    ctx.cleanup_record(&created.id).await;

    let updated = require_ok!(updated);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.ttl, 600);
    assert_eq!(updated.content, created.content);
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_delete_missing_record() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let created = require_some!(ctx.create_test_record().await, "create failed");
    let deleted = require_ok!(ctx.provider.delete_record(&ctx.zone_id, &created.id).await);
    assert!(deleted);

    let again = ctx.provider.delete_record(&ctx.zone_id, &created.id).await;
    assert!(
        matches!(again, Err(ProviderError::RecordNotFound { .. } | ProviderError::Unknown { .. })),
        "unexpected result: {again:?}"
    );
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_duplicate_create_is_rejected() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    let created = require_some!(ctx.create_test_record().await, "create failed");
    let duplicate = ctx
        .provider
        .create_record(&ctx.zone_id, &txt_payload(&created.name, "integration-test", 300))
        .await;
    ctx.cleanup_record(&created.id).await;

    assert!(
        matches!(duplicate, Err(ProviderError::RecordExists { .. })),
        "unexpected result: {duplicate:?}"
    );
}

// ============ Cleanup ============

/// Remove leftover test records (run manually).
#[tokio::test]
#[ignore]
async fn test_cloudflare_cleanup_test_records() {
    skip_if_no_credentials!(CREDENTIAL_VARS[0], CREDENTIAL_VARS[1]);

    let ctx = require_some!(TestContext::cloudflare(), "failed to build test context");
    ctx.cleanup_all_test_records().await;
}
