//! Cloudflare error code mapping
//!
//! Reference: <https://developers.cloudflare.com/fundamentals/api/reference/errors/>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, PROVIDER_ID};

const UNKNOWN: &str = "<unknown>";

impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_ID
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // 6003 invalid request headers, 6103/6111 malformed auth header,
            // 10000 authentication error
            Some("6003" | "6103" | "6111" | "10000") => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // 9109 token is valid but lacks access to the resource
            Some("9109") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // 1004 generic DNS validation, 9000 name, 9005/9006/9009 content,
            // 9021 TTL, 9041 cannot be proxied
            Some(code @ ("1004" | "9000" | "9005" | "9006" | "9009" | "9021" | "9041")) => {
                let param = match code {
                    "9000" => "name",
                    "9005" | "9006" | "9009" => "content",
                    "9021" => "ttl",
                    "9041" => "proxied",
                    _ => "record",
                };
                ProviderError::InvalidParameter {
                    provider,
                    param: param.to_string(),
                    detail: raw.message,
                }
            }

            // 81053..=81058: a conflicting record already exists
            Some("81053" | "81054" | "81055" | "81056" | "81057" | "81058") => {
                ProviderError::RecordExists {
                    provider,
                    record_name: context.record_name.unwrap_or_else(|| UNKNOWN.to_string()),
                    raw_message: Some(raw.message),
                }
            }

            Some("81044") => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            Some("81045") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // 971 throttled inside a 200/400 envelope rather than a 429
            Some("971") => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // 1001 invalid zone identifier, 7000/7003 no route for the URI
            Some("1001" | "7000" | "7003") => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: &str, context: ErrorContext) -> ProviderError {
        let provider = CloudflareProvider::new(String::new());
        assert!(provider.is_ok(), "client construction failed");
        let Ok(provider) = provider else {
            unreachable!()
        };
        provider.map_error(RawApiError::with_code(code, format!("cf {code}")), context)
    }

    fn write_context() -> ErrorContext {
        ErrorContext {
            record_name: Some("www".to_string()),
            record_id: Some("rec-123".to_string()),
            domain: Some("zone-1".to_string()),
        }
    }

    #[test]
    fn auth_codes_map_to_invalid_credentials() {
        for code in ["6003", "6103", "6111", "10000"] {
            let err = map(code, ErrorContext::default());
            assert!(
                matches!(err, ProviderError::InvalidCredentials { .. }),
                "{code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn missing_scope_is_permission_denied() {
        let err = map("9109", ErrorContext::default());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }), "{err:?}");
    }

    #[test]
    fn validation_codes_name_the_parameter() {
        let cases = [
            ("1004", "record"),
            ("9000", "name"),
            ("9005", "content"),
            ("9006", "content"),
            ("9009", "content"),
            ("9021", "ttl"),
            ("9041", "proxied"),
        ];
        for (code, expected) in cases {
            let err = map(code, ErrorContext::default());
            assert!(
                matches!(&err, ProviderError::InvalidParameter { param, .. } if param == expected),
                "{code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn conflicts_carry_record_name() {
        for code in ["81053", "81054", "81055", "81056", "81057", "81058"] {
            let err = map(code, write_context());
            assert!(
                matches!(&err, ProviderError::RecordExists { record_name, .. } if record_name == "www"),
                "{code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn missing_record_carries_record_id() {
        let err = map("81044", write_context());
        assert!(
            matches!(&err, ProviderError::RecordNotFound { record_id, .. } if record_id == "rec-123"),
            "{err:?}"
        );
    }

    #[test]
    fn missing_zone_carries_zone_id() {
        for code in ["1001", "7000", "7003"] {
            let err = map(code, write_context());
            assert!(
                matches!(&err, ProviderError::DomainNotFound { domain, .. } if domain == "zone-1"),
                "{code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn quota_and_throttle() {
        assert!(matches!(
            map("81045", ErrorContext::default()),
            ProviderError::QuotaExceeded { .. }
        ));
        assert!(matches!(
            map("971", ErrorContext::default()),
            ProviderError::RateLimited { retry_after: None, .. }
        ));
    }

    #[test]
    fn absent_context_uses_placeholder() {
        let err = map("81044", ErrorContext::default());
        assert!(
            matches!(&err, ProviderError::RecordNotFound { record_id, .. } if record_id == UNKNOWN),
            "{err:?}"
        );
    }

    #[test]
    fn unmapped_code_keeps_raw_text() {
        let err = map("99999", ErrorContext::default());
        assert!(
            matches!(
                &err,
                ProviderError::Unknown { provider, raw_code, raw_message }
                    if provider == "cloudflare"
                        && raw_code.as_deref() == Some("99999")
                        && raw_message == "cf 99999"
            ),
            "{err:?}"
        );
        assert_eq!(err.message(), "cf 99999");
    }
}
