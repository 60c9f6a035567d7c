//! Version specifier comparison using semver.
//!
//! npm specifiers are converted into `semver::VersionReq` sets so that two
//! spellings of the same range compare equal. Anything that is not a semver
//! range (git URLs, `file:` paths, dist-tags) is compared as text, as is a
//! range whose bounds do not fit in a `u64`.

use semver::VersionReq;

/// Whether two version specifiers describe the same requirement.
#[must_use]
pub fn equivalent(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (normalize(a), normalize(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Normalize a specifier into its `||` alternatives.
///
/// Returns `None` if any alternative is not a semver range.
#[must_use]
pub fn normalize(spec: &str) -> Option<Vec<VersionReq>> {
    spec.split("||").map(parse_range).collect()
}

/// Parse a single version range, handling npm-specific syntax.
///
/// Handles:
/// - Bare versions, which npm treats as exact: 1.2.3 -> =1.2.3
/// - Partial bare versions cover their range: 1.2 -> >=1.2.0, <1.3.0
/// - Hyphen ranges: 1.0.0 - 2.0.0
/// - X-ranges: 1.x, 1.0.x, *
/// - Space-separated comparators: >= 2.1.2 < 3.0.0
fn parse_range(range: &str) -> Option<VersionReq> {
    let range = range.trim();

    if range.is_empty() || matches!(range, "*" | "x" | "X") {
        return Some(VersionReq::STAR);
    }

    // "1.0.0 - 2.0.0" -> ">=1.0.0, <=2.0.0"
    if let Some((start, end)) = parse_hyphen_range(range) {
        return VersionReq::parse(&format!(">={start}, <={end}")).ok();
    }

    // "1.x" -> ">=1.0.0, <2.0.0"
    if let Some(converted) = convert_x_range(range) {
        return VersionReq::parse(&converted).ok();
    }

    let comparators = split_comparators(range);
    if comparators.is_empty() {
        return None;
    }
    VersionReq::parse(&comparators.join(", ")).ok()
}

/// Parse a hyphen range like "1.0.0 - 2.0.0".
fn parse_hyphen_range(range: &str) -> Option<(&str, &str)> {
    let (start, end) = range.split_once(" - ")?;
    let (start, end) = (strip_v(start.trim()), strip_v(end.trim()));
    if start.is_empty() || end.is_empty() || end.contains(" - ") {
        return None;
    }
    Some((start, end))
}

/// Convert an x-range to a semver range.
///
/// Returns `None` unless every part is numeric or a wildcard, or if the
/// upper bound overflows.
fn convert_x_range(range: &str) -> Option<String> {
    let parts: Vec<&str> = strip_v(range).split('.').collect();
    if !parts.iter().any(|p| is_wild(p)) {
        return None;
    }

    match parts.as_slice() {
        [first, rest @ ..] if is_wild(first) && rest.iter().all(|p| is_wild(p)) => {
            Some(">=0.0.0".to_string())
        }
        [major, minor] | [major, minor, _] if is_wild(minor) => {
            partial_bounds(major.parse().ok()?, None)
        }
        [major, minor, patch] if is_wild(patch) => {
            partial_bounds(major.parse().ok()?, Some(minor.parse().ok()?))
        }
        _ => None,
    }
}

/// Bounds covered by "major" or "major.minor".
///
/// Returns `None` if the upper bound overflows.
fn partial_bounds(major: u64, minor: Option<u64>) -> Option<String> {
    match minor {
        None => Some(format!(">={major}.0.0, <{}.0.0", major.checked_add(1)?)),
        Some(minor) => Some(format!(
            ">={major}.{minor}.0, <{major}.{}.0",
            minor.checked_add(1)?
        )),
    }
}

/// Expand a partial exact version ("1", "1.2") into explicit bounds.
fn expand_partial(version: &str) -> Option<String> {
    let parts = version
        .split('.')
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [major] => partial_bounds(*major, None),
        [major, minor] => partial_bounds(*major, Some(*minor)),
        _ => None,
    }
}

fn is_wild(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Split a range into comparators, joining detached operators to their
/// versions (">= 2.1.2" -> ">=2.1.2") and making bare versions exact.
/// Partial exact versions become bounds, or stay as written if they overflow.
fn split_comparators(range: &str) -> Vec<String> {
    let mut comparators = Vec::new();
    let mut pending_op = String::new();

    for token in range.split_whitespace() {
        let token = token.trim_end_matches(',');
        if token.is_empty() {
            continue;
        }
        let op_len = token
            .find(|c: char| !matches!(c, '<' | '>' | '=' | '~' | '^'))
            .unwrap_or(token.len());
        let (op, version) = token.split_at(op_len);

        if version.is_empty() {
            pending_op.push_str(op);
            continue;
        }

        let op = if pending_op.is_empty() {
            op.to_string()
        } else {
            std::mem::take(&mut pending_op) + op
        };
        let version = strip_v(version);
        if op.is_empty() || op == "=" {
            let exact = expand_partial(version).unwrap_or_else(|| format!("={version}"));
            comparators.push(exact);
        } else {
            comparators.push(format!("{op}{version}"));
        }
    }

    comparators
}

fn strip_v(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_is_equivalent() {
        assert!(equivalent("1.2.3", "1.2.3"));
        assert!(equivalent("git+https://example.com/a.git", "git+https://example.com/a.git"));
        assert!(equivalent("latest", "latest"));
    }

    #[test]
    fn test_different_versions_differ() {
        assert!(!equivalent("1.2.3", "1.4.7"));
        assert!(!equivalent("latest", "next"));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(!equivalent("1.2.3", "^1.2.3"));
        assert!(equivalent("1.2.3", "=1.2.3"));
        assert!(equivalent("v1.2.3", "1.2.3"));
    }

    #[test]
    fn test_x_ranges() {
        assert!(equivalent("1.x", "1.X"));
        assert!(equivalent("1.x", "1.x.x"));
        assert!(equivalent("1.2.x", ">=1.2.0 <1.3.0"));
        assert!(equivalent("*", "x"));
        assert!(equivalent("*", ""));
        assert!(!equivalent("1.x", "2.x"));
    }

    #[test]
    fn test_space_separated_comparators() {
        assert!(equivalent(">= 1.0.0 < 2.0.0", ">=1.0.0 <2.0.0"));
        assert!(equivalent(">=1.0.0 <2.0.0", ">=1.0.0, <2.0.0"));
        assert!(equivalent("1.x", ">=1.0.0 <2.0.0"));
    }

    #[test]
    fn test_hyphen_range() {
        assert!(equivalent("1.0.0 - 2.0.0", ">=1.0.0 <=2.0.0"));
        assert!(!equivalent("1.0.0 - 2.0.0", "1.0.0 - 3.0.0"));
    }

    #[test]
    fn test_or_ranges() {
        assert!(equivalent("^1.0.0 || ^2.0.0", "^1.0.0||^2.0.0"));
        assert!(!equivalent("^1.0.0 || ^2.0.0", "^1.0.0"));
    }

    #[test]
    fn test_prerelease_is_not_an_x_range() {
        assert!(convert_x_range("1.0.0-next").is_none());
        assert!(equivalent("1.0.0-next.1", "=1.0.0-next.1"));
    }

    #[test]
    fn test_non_semver_specifiers() {
        assert!(normalize("file:../local").is_none());
        assert!(!equivalent("file:../a", "file:../b"));
    }

    #[test]
    fn test_partial_bare_versions_cover_their_range() {
        assert!(equivalent("1.2", "1.2.x"));
        assert!(equivalent("1", "1.x"));
        assert!(equivalent("=1.2", ">=1.2.0 <1.3.0"));
        assert!(equivalent("v1", "1.x.x"));
        assert!(!equivalent("1.2", "1.2.0"));
        assert!(!equivalent("1", "2"));
    }

    #[test]
    fn test_huge_x_range_does_not_overflow() {
        let max = u64::MAX;
        assert!(convert_x_range(&format!("{max}.x")).is_none());
        assert!(convert_x_range(&format!("1.{max}.x")).is_none());
        assert!(!equivalent(&format!("{max}.x"), "1.x"));
        assert!(!equivalent(&format!("1.{max}.x"), "1.2.x"));
        assert!(equivalent(&format!("{max}.x"), &format!("{max}.x")));
    }

    #[test]
    fn test_huge_partial_version_stays_exact() {
        let max = u64::MAX;
        assert!(expand_partial(&max.to_string()).is_none());
        assert!(!equivalent(&max.to_string(), "1"));
    }

    #[test]
    fn test_tilde_and_caret_are_kept() {
        let reqs = normalize("~1.2.3").unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].to_string(), "~1.2.3");
        assert!(!equivalent("~1.2.3", "^1.2.3"));
    }
}
