//! Domain extraction and normalization utilities.
//!
//! This module extracts registrable domains from hosts and URLs using the
//! Public Suffix List (PSL) compiled into the `psl` crate, so multi-part
//! suffixes such as `co.uk` are handled correctly.
//!
//! Key functions:
//! - `registrable_domain()` - Registrable domain of a bare host
//! - `domain_of_url()` - Registrable domain of a parsed URL's host
//! - `same_registrable_domain()` - Case/trailing-dot insensitive comparison

use std::net::IpAddr;

use url::{Host, Url};

use crate::error_handling::DomainError;

/// Maximum length of a single DNS label.
const MAX_LABEL_LEN: usize = 63;
/// Maximum length of a full hostname (without trailing dot).
const MAX_HOST_LEN: usize = 253;

/// Extracts the registrable domain from a hostname.
///
/// The input is a bare host (no scheme, path or port). It is lowercased and a
/// single trailing dot is ignored. IP literals are their own domain. Hosts
/// that are themselves a public suffix, or a single label such as
/// `localhost`, are returned unchanged.
///
/// # Errors
///
/// Returns `DomainError::InvalidHost` if the host is empty or not a
/// syntactically valid hostname.
///
/// # Examples
///
/// ```
/// use redirect_inspector::domain::registrable_domain;
///
/// assert_eq!(registrable_domain("sub.example.co.uk").unwrap(), "example.co.uk");
/// assert_eq!(registrable_domain("WWW.Example.COM.").unwrap(), "example.com");
/// ```
pub fn registrable_domain(host: &str) -> Result<String, DomainError> {
    let trimmed = host.trim();
    let without_dot = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if without_dot.is_empty() {
        return Err(invalid_host(host, "empty host"));
    }

    let bare = without_dot
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(without_dot);
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(ip.to_string());
    }

    // Host::parse lowercases and applies IDNA, so internationalized names
    // come back in their punycode form
    let parsed =
        Host::parse(without_dot).map_err(|_| invalid_host(host, "not a valid hostname"))?;
    match parsed {
        Host::Ipv4(ip) => Ok(ip.to_string()),
        Host::Ipv6(ip) => Ok(ip.to_string()),
        Host::Domain(name) => {
            validate_hostname(host, &name)?;
            Ok(lookup_registrable(&name))
        }
    }
}

/// Extracts the registrable domain of a parsed URL's host.
///
/// # Errors
///
/// Returns `DomainError::MissingHost` if the URL has no host, or
/// `DomainError::InvalidHost` if the host is not a valid hostname.
pub fn domain_of_url(url: &Url) -> Result<String, DomainError> {
    match url.host() {
        None => Err(DomainError::MissingHost(url.to_string())),
        Some(Host::Ipv4(ip)) => Ok(ip.to_string()),
        Some(Host::Ipv6(ip)) => Ok(ip.to_string()),
        Some(Host::Domain(name)) => registrable_domain(name),
    }
}

/// Compares two registrable domains, ignoring ASCII case and a trailing dot.
pub fn same_registrable_domain(a: &str, b: &str) -> bool {
    let a = a.strip_suffix('.').unwrap_or(a);
    let b = b.strip_suffix('.').unwrap_or(b);
    a.eq_ignore_ascii_case(b)
}

fn invalid_host(host: &str, reason: &'static str) -> DomainError {
    DomainError::InvalidHost {
        host: host.to_string(),
        reason,
    }
}

fn validate_hostname(original: &str, name: &str) -> Result<(), DomainError> {
    if name.len() > MAX_HOST_LEN {
        return Err(invalid_host(original, "hostname too long"));
    }
    for label in name.split('.') {
        if label.is_empty() {
            return Err(invalid_host(original, "empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid_host(original, "label too long"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid_host(original, "label starts or ends with a hyphen"));
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
        {
            return Err(invalid_host(original, "invalid character"));
        }
    }
    Ok(())
}

/// Applies PSL lookup to an already validated, lowercased hostname.
fn lookup_registrable(name: &str) -> String {
    if let Some(domain) = psl::domain_str(name) {
        return domain.to_string();
    }
    // The name is itself a public suffix (e.g. "co.uk"), or the list had no
    // answer: fall back to the implicit "*" rule (one label below the TLD)
    if psl::suffix_str(name) == Some(name) {
        return name.to_string();
    }
    let labels: Vec<&str> = name.rsplitn(3, '.').collect();
    match labels.as_slice() {
        [tld, sld, ..] => format!("{sld}.{tld}"),
        _ => name.to_string(),
    }
}
