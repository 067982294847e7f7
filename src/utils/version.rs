//! Version comparison utilities.

use semver::Version;
use std::cmp::Ordering;

/// Compare two version strings.
///
/// Dotted numeric versions with up to three components (`3.9`, `3.10`,
/// `3.19.1`) are padded to full semver and compared numerically, so `3.10`
/// sorts after `3.9`. Anything else falls back to plain string order. An
/// empty version sorts before every non-empty one.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    if let (Some(ver_a), Some(ver_b)) = (parse_lenient(a), parse_lenient(b)) {
        return ver_a.cmp(&ver_b);
    }

    a.cmp(b)
}

/// Parse a version, padding missing minor/patch components with zeros
fn parse_lenient(v: &str) -> Option<Version> {
    let v = v.trim().trim_start_matches('v');
    if let Ok(parsed) = Version::parse(v) {
        return Some(parsed);
    }
    let parts = v.split('.').count();
    let padded = match parts {
        1 => format!("{v}.0.0"),
        2 => format!("{v}.0"),
        _ => return None,
    };
    Version::parse(&padded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.0.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.1", "1.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_license_list_versions_compare_numerically() {
        assert_eq!(compare_versions("3.9", "3.10"), Ordering::Less);
        assert_eq!(compare_versions("3.19", "3.8"), Ordering::Greater);
        assert_eq!(compare_versions("3", "3.0"), Ordering::Equal);
    }

    #[test]
    fn test_empty_version_is_smallest() {
        assert_eq!(compare_versions("", "3.19"), Ordering::Less);
        assert_eq!(compare_versions("3.19", ""), Ordering::Greater);
        assert_eq!(compare_versions("", ""), Ordering::Equal);
    }

    #[test]
    fn test_non_numeric_falls_back_to_string_order() {
        assert_eq!(compare_versions("beta", "alpha"), Ordering::Greater);
    }
}
