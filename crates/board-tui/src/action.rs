//! Action enum — user-initiated intents and internal events.

use board_core::lifecycle::Bucket;

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ListingTabs,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Tabs ─────────────────────────────────────────────────────────────────
    SelectTab(Bucket),
    NextTab,
    PrevTab,

    // ── Filter ───────────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,

    // ── Data ─────────────────────────────────────────────────────────────────
    Refresh,

    // ── System ───────────────────────────────────────────────────────────────
    CopyToClipboard(String),
    Quit,
}
