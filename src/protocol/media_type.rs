//! Media type parsing and formatting.
//!
//! Splits `Content-Type`/`Accept` style values into their essence
//! (`type/subtype`) and parameters.
//!
//! | Input | Essence | Parameters |
//! |-------|---------|------------|
//! | `application/hal+json` | `application/hal+json` | none |
//! | `Application/HAL+JSON; charset=UTF-8` | `application/hal+json` | `charset=UTF-8` |
//! | `application/hal+json;profile="urn:x"` | `application/hal+json` | `profile=urn:x` |

/// Parse a media type into its lower-cased essence and its parameters.
///
/// Parameter names are lower-cased, values keep their case and lose surrounding
/// quotes. Parameters without `=` are dropped. Malformed input never fails; the
/// essence is whatever precedes the first `;`.
///
/// # Examples
///
/// ```
/// use halbuilder::protocol::parse_media_type;
///
/// let (essence, params) = parse_media_type("Application/HAL+JSON; Charset=\"UTF-8\"");
/// assert_eq!(essence, "application/hal+json");
/// assert_eq!(params, vec![("charset".to_string(), "UTF-8".to_string())]);
///
/// let (essence, params) = parse_media_type("");
/// assert!(essence.is_empty());
/// assert!(params.is_empty());
/// ```
pub fn parse_media_type(value: &str) -> (String, Vec<(String, String)>) {
    let mut parts = value.split(';');
    let essence = parts.next().unwrap_or("").trim().to_ascii_lowercase();

    let params = parts
        .filter_map(|param| {
            let (name, value) = param.split_once('=')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((name, value.to_string()))
        })
        .collect();

    (essence, params)
}

/// Format a media type from an essence and parameters.
///
/// # Examples
///
/// ```
/// use halbuilder::protocol::format_media_type;
///
/// let params = vec![("charset".to_string(), "utf-8".to_string())];
/// assert_eq!(
///     format_media_type("application/hal+json", &params),
///     "application/hal+json; charset=utf-8"
/// );
/// assert_eq!(format_media_type("application/hal+xml", &[]), "application/hal+xml");
/// ```
pub fn format_media_type(essence: &str, params: &[(String, String)]) -> String {
    let mut out = essence.to_string();
    for (name, value) in params {
        out.push_str("; ");
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let (essence, params) = parse_media_type("application/hal+json");
        assert_eq!(essence, "application/hal+json");
        assert!(params.is_empty());
    }

    #[test]
    fn test_parse_multiple_params() {
        let (essence, params) =
            parse_media_type("application/hal+json;charset=utf-8; profile=\"urn:orders\"");
        assert_eq!(essence, "application/hal+json");
        assert_eq!(params.len(), 2);
        assert_eq!(params[1], ("profile".to_string(), "urn:orders".to_string()));
    }

    #[test]
    fn test_parse_drops_valueless_params() {
        let (_, params) = parse_media_type("text/plain; flowed; =x");
        assert!(params.is_empty());
    }

    #[test]
    fn test_format_params() {
        let params = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ];
        assert_eq!(format_media_type("text/plain", &params), "text/plain; a=1; b=2");
    }
}
