//! Deterministic asset filename derivation for sprites and badge icons,
//! plus the label shown by the generated placeholder when an image is
//! missing.

const SPRITE_DIR: &str = "assets/sprites";
const BADGE_DIR: &str = "assets/badges";

/// Normalize a display name to an asset slug: lower-cased, trimmed,
/// apostrophes stripped, whitespace runs collapsed to single hyphens, and
/// everything outside `[a-z0-9-]` dropped. An empty result yields `None`
/// (callers render the placeholder directly, no URL is formed).
pub fn name_slug(name: &str) -> Option<String> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.trim().to_lowercase().chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        if c.is_whitespace() {
            pending_hyphen = !slug.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '-' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    (!slug.is_empty()).then_some(slug)
}

pub fn sprite_url(species: &str) -> Option<String> {
    name_slug(species).map(|slug| format!("{SPRITE_DIR}/{slug}.png"))
}

pub fn badge_url(badge: &str) -> Option<String> {
    name_slug(badge).map(|slug| format!("{BADGE_DIR}/{slug}.png"))
}

/// First three characters of the label, upper-cased, for the inline SVG
/// placeholder shown when an asset is missing or fails to load.
pub fn placeholder_label(label: &str) -> String {
    label.trim().chars().take(3).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── name_slug ────────────────────────────────────────────────────

    #[test]
    fn test_slug_punctuation_and_case() {
        assert_eq!(name_slug("Mr. Mime").as_deref(), Some("mr-mime"));
        assert_eq!(name_slug("Farfetch'd").as_deref(), Some("farfetchd"));
        assert_eq!(name_slug("Farfetch\u{2019}d").as_deref(), Some("farfetchd"));
        assert_eq!(name_slug("NIDORAN").as_deref(), Some("nidoran"));
    }

    #[test]
    fn test_slug_whitespace_collapse() {
        assert_eq!(name_slug("  Tapu   Koko  ").as_deref(), Some("tapu-koko"));
        assert_eq!(name_slug("Ho-Oh").as_deref(), Some("ho-oh"));
    }

    #[test]
    fn test_slug_empty_inputs() {
        assert_eq!(name_slug(""), None);
        assert_eq!(name_slug("   "), None);
        assert_eq!(name_slug("!!!"), None);
        assert_eq!(name_slug("'"), None);
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            sprite_url("Mr. Mime").as_deref(),
            Some("assets/sprites/mr-mime.png")
        );
        assert_eq!(
            badge_url("Zephyr Badge").as_deref(),
            Some("assets/badges/zephyr-badge.png")
        );
        assert_eq!(sprite_url("???"), None);
    }

    // ── placeholder_label ────────────────────────────────────────────

    #[test]
    fn test_placeholder_label() {
        assert_eq!(placeholder_label("Pikachu"), "PIK");
        assert_eq!(placeholder_label("Mu"), "MU");
        assert_eq!(placeholder_label("  abra "), "ABR");
        assert_eq!(placeholder_label(""), "");
    }
}
