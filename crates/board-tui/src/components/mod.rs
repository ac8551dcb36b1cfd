pub mod listing_tabs;
