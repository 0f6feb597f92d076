//! URL validation and normalization.

/// Normalize an absolute `http`/`https` URL.
///
/// - surrounding whitespace is trimmed; inner whitespace is rejected
/// - protocol-relative URLs (`//cdn.example.com/a.jpg`) are upgraded to `https:`
/// - scheme and host are lowercased; path, query and fragment are kept verbatim
///
/// Returns the reason on failure.
pub fn normalize_url(value: &str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty URL");
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("URL contains whitespace");
    }

    let owned;
    let candidate = if let Some(rest) = trimmed.strip_prefix("//") {
        owned = format!("https://{rest}");
        owned.as_str()
    } else {
        trimmed
    };

    let Some((scheme, rest)) = candidate.split_once("://") else {
        return Err("not an absolute URL");
    };
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err("unsupported URL scheme");
    }

    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(host_end);
    let host = authority.to_ascii_lowercase();
    validate_authority(&host)?;

    Ok(format!("{scheme}://{host}{tail}"))
}

fn validate_authority(authority: &str) -> Result<(), &'static str> {
    if authority.is_empty() {
        return Err("URL has no host");
    }
    if authority.contains('@') {
        return Err("URL credentials are not allowed");
    }
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };
    if let Some(port) = port
        && (port.is_empty() || port.parse::<u16>().is_err())
    {
        return Err("invalid URL port");
    }
    let labels_ok = !host.is_empty()
        && host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|ch| ch.is_alphanumeric() || ch == '-')
        });
    if labels_ok {
        Ok(())
    } else {
        Err("invalid URL host")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_and_host() {
        assert_eq!(
            normalize_url("  HTTPS://Shop.Example.COM/Item/1?Color=Red ").unwrap(),
            "https://shop.example.com/Item/1?Color=Red"
        );
        assert_eq!(
            normalize_url("//cdn.example.com/a.jpg").unwrap(),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            normalize_url("http://localhost:8080").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(normalize_url("example.com/item").is_err());
        assert!(normalize_url("ftp://example.com/file").is_err());
        assert!(normalize_url("https://").is_err());
        assert!(normalize_url("https://exa mple.com").is_err());
        assert!(normalize_url("https://user:pw@example.com").is_err());
        assert!(normalize_url("https://example..com").is_err());
        assert!(normalize_url("https://example.com:99999").is_err());
    }
}
