// file: src/multiotp/token_url.rs
// version: 1.0.0
// guid: 0cf5c183-58bd-4f50-a870-c4fb4ceb677d

//! Token provisioning URI checks and issuer rewriting
//!
//! multiOTP prints URIs of the form
//! `otpauth://totp/multiOTP:<NAME>%20<SURNAME>?secret=<BASE32>&digits=6&period=30`.

use regex::bytes::Regex;
use std::sync::OnceLock;

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^otpauth:").expect("static regex"))
}

fn issuer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^otpauth://\w+/(\w+):").expect("static regex"))
}

/// True when output starts with the `otpauth:` scheme
pub fn is_otpauth(output: &[u8]) -> bool {
    scheme_pattern().is_match(output)
}

/// Replace the issuer label of a token URI.
///
/// An empty description, or a URI without a recognisable issuer label, leaves
/// the input untouched. Only the captured label is rewritten.
pub fn replace_issuer(uri: &[u8], description: &str) -> Vec<u8> {
    if description.is_empty() {
        return uri.to_vec();
    }

    let Some(label) = issuer_pattern().captures(uri).and_then(|caps| caps.get(1)) else {
        return uri.to_vec();
    };

    let mut result = Vec::with_capacity(uri.len() + description.len());
    result.extend_from_slice(&uri[..label.start()]);
    result.extend_from_slice(description.as_bytes());
    result.extend_from_slice(&uri[label.end()..]);
    result
}
