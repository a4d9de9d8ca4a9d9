use url::Url;

const INSECURE_SCHEME: &str = "http:";
const INSECURE_PREFIX: &str = "http://";

/// Rewrites a plain `http` URL to `https`, keeping everything after the
/// scheme exactly as stored. Other values are returned as-is.
pub fn secure_photo_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if is_insecure_url(trimmed) {
        format!("https{}", &trimmed[INSECURE_SCHEME.len() - 1..])
    } else {
        raw.to_string()
    }
}

/// True when the stored value is on the `http` scheme.
///
/// The `http://` prefix alone decides, so values the URL parser rejects
/// (bad host, broken escapes) are still caught. Without the slashes the
/// value must parse as an `http` URL.
pub fn is_insecure_url(raw: &str) -> bool {
    let trimmed = raw.trim();

    if !starts_with_ignore_case(trimmed, INSECURE_SCHEME) {
        return false;
    }

    starts_with_ignore_case(trimmed, INSECURE_PREFIX)
        || matches!(Url::parse(trimmed), Ok(parsed) if parsed.scheme() == "http")
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
