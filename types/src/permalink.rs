//! Permalink parsing.
//!
//! Shared links look like `?run=run-01#episode-12?spoiler=0`: the hash can
//! carry its own query suffix, which browsers leave inside `location.hash`.
//! The anchor part before the embedded `?` names the target episode; the
//! embedded parameters override the page query string on key collision.

/// Resolved permalink target: which episode, and whether it should end up
/// collapsed (spoiler-safe) or expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permalink {
    pub episode: u32,
    pub collapsed: bool,
}

/// Split a `location.hash` value into (anchor, embedded query). The leading
/// `#` is tolerated but not required.
fn split_hash(hash: &str) -> (&str, &str) {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    match hash.split_once('?') {
        Some((anchor, query)) => (anchor, query),
        None => (hash, ""),
    }
}

fn parse_query(query: &str) -> impl Iterator<Item = (&str, &str)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (!k.is_empty()).then_some((k, v))
    })
}

/// Look up `key`, letting hash-embedded parameters win over the page query.
fn param<'a>(hash: &'a str, search: &'a str, key: &str) -> Option<&'a str> {
    let (_, embedded) = split_hash(hash);
    parse_query(embedded)
        .chain(parse_query(search))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// The `run` selector parameter, if present anywhere in the URL.
pub fn run_param<'a>(hash: &'a str, search: &'a str) -> Option<&'a str> {
    param(hash, search, "run").filter(|v| !v.is_empty())
}

/// Resolve the permalink target from `location.hash` + `location.search`.
///
/// The `episode-<digits>` anchor wins; otherwise an `episode` query
/// parameter is used. `spoiler=0` forces the target collapsed; any other
/// value or its absence forces it expanded.
pub fn parse(hash: &str, search: &str) -> Option<Permalink> {
    let (anchor, _) = split_hash(hash);

    let episode = anchor
        .strip_prefix("episode-")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .or_else(|| param(hash, search, "episode").and_then(|v| v.parse().ok()))?;

    let collapsed = param(hash, search, "spoiler") == Some("0");
    Some(Permalink { episode, collapsed })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── anchor parsing ───────────────────────────────────────────────

    #[test]
    fn test_plain_anchor_expands() {
        assert_eq!(
            parse("#episode-5", ""),
            Some(Permalink { episode: 5, collapsed: false })
        );
    }

    #[test]
    fn test_spoiler_zero_collapses() {
        assert_eq!(
            parse("#episode-5?spoiler=0", ""),
            Some(Permalink { episode: 5, collapsed: true })
        );
    }

    #[test]
    fn test_spoiler_other_values_expand() {
        assert_eq!(parse("#episode-5?spoiler=1", "").unwrap().collapsed, false);
        assert_eq!(parse("#episode-5?spoiler=", "").unwrap().collapsed, false);
        assert_eq!(parse("#episode-5", "?spoiler=yes").unwrap().collapsed, false);
    }

    #[test]
    fn test_spoiler_from_page_query() {
        assert_eq!(parse("#episode-3", "?spoiler=0").unwrap().collapsed, true);
    }

    #[test]
    fn test_hash_params_override_page_query() {
        let p = parse("#episode-3?spoiler=1", "?spoiler=0").unwrap();
        assert!(!p.collapsed);
    }

    #[test]
    fn test_bad_anchor_falls_back_to_episode_param() {
        assert_eq!(
            parse("#top", "?episode=12"),
            Some(Permalink { episode: 12, collapsed: false })
        );
        assert_eq!(parse("", "?episode=4&spoiler=0").unwrap().episode, 4);
    }

    #[test]
    fn test_no_target() {
        assert_eq!(parse("", ""), None);
        assert_eq!(parse("#rules", "?run=run-01"), None);
        assert_eq!(parse("#episode-", ""), None);
        assert_eq!(parse("#episode-abc", ""), None);
    }

    // ── run param ────────────────────────────────────────────────────

    #[test]
    fn test_run_param() {
        assert_eq!(run_param("", "?run=run-02"), Some("run-02"));
        assert_eq!(run_param("#episode-1?run=run-03", "?run=run-02"), Some("run-03"));
        assert_eq!(run_param("", "?run="), None);
        assert_eq!(run_param("", ""), None);
    }
}
