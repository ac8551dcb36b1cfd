//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for fetch state and UI options, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use board_core::listing::Listing;

use crate::widgets::status_bar::InputMode;

/// The full shared state of the application.
pub struct AppState {
    // ── Data ────────────────────────────────────────────────────────────────
    /// `None` until the first fetch resolves (distinct from `is_loading`).
    pub listings: Option<Vec<Listing>>,
    pub is_loading: bool,
    pub fetch_error: bool,
    pub last_refresh: Option<chrono::DateTime<chrono::Local>>,

    // ── UI options (from config) ────────────────────────────────────────────
    pub base_url: String,
    pub take: Option<usize>,
    pub show_view_all: bool,
    pub view_all_link: Option<String>,
    pub check_language: bool,
    pub language: Option<String>,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Session ─────────────────────────────────────────────────────────────
    pub logs: Vec<String>,
}

impl AppState {
    pub fn last_log(&self) -> Option<&str> {
        self.logs.last().map(String::as_str)
    }

    /// How many listings the source currently holds (0 while unresolved).
    pub fn listing_count(&self) -> usize {
        self.listings.as_ref().map_or(0, Vec::len)
    }
}
