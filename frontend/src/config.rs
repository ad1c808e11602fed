//! Frontend tuning constants.

/// Delay between the last keystroke and the search re-render.
pub const SEARCH_DEBOUNCE_MS: u32 = 200;

/// Layout settle delay before scrolling to a permalinked episode.
pub const SCROLL_SETTLE_MS: u32 = 120;

/// Gap kept between the viewport top and a scrolled-to episode banner.
pub const SCROLL_OFFSET_PX: f64 = 72.0;
