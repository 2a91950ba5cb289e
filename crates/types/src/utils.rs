//! Utility functions and helpers

/// Interpret an environment flag. Only the literal values `true` and `1`
/// enable it; comparison is case-sensitive.
pub fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("1"))
}

/// Split a comma-separated list without trimming or validating entries.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

/// Normalize a mount path to start with `/` and carry no trailing `/`.
pub fn normalize_mount_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Mask a secret for logging, keeping only a short prefix
pub fn sanitize_for_logging(s: &str) -> String {
    if s.len() <= 8 {
        return "*".repeat(s.len());
    }

    let prefix: String = s.chars().take(4).collect();
    format!("{}...", prefix)
}

/// Same as [`sanitize_for_logging`] for optional secrets
pub fn redact(value: Option<&str>) -> String {
    value
        .map(sanitize_for_logging)
        .unwrap_or_else(|| "<unset>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("yes")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn test_split_list_is_raw() {
        assert_eq!(split_list("1,2"), vec!["1", "2"]);
        assert_eq!(split_list("1, 2,"), vec!["1", " 2", ""]);
    }

    #[test]
    fn test_normalize_mount_path() {
        assert_eq!(normalize_mount_path("/parse"), "/parse");
        assert_eq!(normalize_mount_path("parse"), "/parse");
        assert_eq!(normalize_mount_path("/parse/"), "/parse");
        assert_eq!(normalize_mount_path("/"), "/");
        assert_eq!(normalize_mount_path(""), "/");
    }

    #[test]
    fn test_sanitize_for_logging() {
        assert_eq!(sanitize_for_logging("short"), "*****");
        assert_eq!(sanitize_for_logging("supersecretmasterkey"), "supe...");
        assert_eq!(redact(None), "<unset>");
    }
}
