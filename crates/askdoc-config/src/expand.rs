//! Environment variable expansion and secret decoding for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - `base64:<data>` - decoded after expansion

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::ConfigError;

/// Prefix marking a base64-encoded value.
const BASE64_PREFIX: &str = "base64:";

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand a secret and decode it if it carries the `base64:` prefix.
pub(crate) fn resolve_secret(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    let Some(encoded) = expanded.strip_prefix(BASE64_PREFIX) else {
        return Ok(expanded);
    };

    let decode_error = |message: String| ConfigError::Decode {
        field: field.to_owned(),
        message,
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| decode_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| decode_error(e.to_string()))
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ASKDOC_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${ASKDOC_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("ASKDOC_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ASKDOC_UNSET_VAR_TEST");
        }
        let result = expand_env("${ASKDOC_UNSET_VAR_TEST:-default}", "test.field").unwrap();
        assert_eq!(result, "default");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ASKDOC_MISSING_VAR_TEST");
        }
        let err = expand_env("${ASKDOC_MISSING_VAR_TEST}", "test.field").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("ASKDOC_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("test.field"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "test.field").unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("$VAR", "test.field").unwrap();
        assert_eq!(result, "$VAR");
    }

    #[test]
    fn test_resolve_secret_plain() {
        assert_eq!(resolve_secret("sk-plain", "k").unwrap(), "sk-plain");
    }

    #[test]
    fn test_resolve_secret_base64() {
        // "secret-token" encoded
        assert_eq!(
            resolve_secret("base64:c2VjcmV0LXRva2Vu", "k").unwrap(),
            "secret-token"
        );
    }

    #[test]
    fn test_resolve_secret_base64_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ASKDOC_ENCODED_KEY", "c2VjcmV0LXRva2Vu");
        }
        assert_eq!(
            resolve_secret("base64:${ASKDOC_ENCODED_KEY}", "k").unwrap(),
            "secret-token"
        );
        unsafe {
            std::env::remove_var("ASKDOC_ENCODED_KEY");
        }
    }

    #[test]
    fn test_resolve_secret_invalid_base64() {
        let err = resolve_secret("base64:!!!", "notion.api_key").unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
        assert!(err.to_string().contains("notion.api_key"));
    }
}
