//! Tab controller — which lifecycle bucket is visible and what it shows.
//!
//! `TabController` owns the single active selection over the three fixed
//! buckets.  `select` is total (any bucket from any bucket, re-selecting
//! the active one is a harmless re-render) and nothing here ever
//! auto-advances.  `content()` is a pure projection of
//! `(listings, is_loading, now, options)` — nothing is cached, so a
//! re-render after the collection changed underneath is always correct.

use board_core::lifecycle::{Bucket, BUCKETS};
use board_core::listing::Listing;
use chrono::{DateTime, Utc};

/// Number of placeholder rows shown while the fetch is in flight.
pub const SKELETON_ROWS: usize = 8;

/// What the active tab should render this frame.
#[derive(Debug, PartialEq)]
pub enum TabContent<'a> {
    /// Fetch in flight: a fixed-size run of skeleton rows, independent of
    /// whatever the listing collection currently holds.
    Loading { rows: usize },
    /// The bucket's subset in source order, already capped at `take`.
    Listings(Vec<&'a Listing>),
    /// Nothing matched: bucket-specific placeholder copy.
    Empty {
        title: &'static str,
        message: &'static str,
    },
}

/// Inputs for one evaluation pass.
///
/// `listings: None` means the fetch has not resolved yet (distinct from
/// `is_loading`) and filters like an empty collection.  `language` is an
/// externally supplied modifier AND-composed with the bucket rule — it is
/// not a fourth bucket.
pub struct TabQuery<'a> {
    pub listings: Option<&'a [Listing]>,
    pub is_loading: bool,
    pub now: DateTime<Utc>,
    pub take: Option<usize>,
    pub language: Option<&'a dyn Fn(&Listing) -> bool>,
}

pub struct TabController {
    active: Bucket,
}

impl TabController {
    pub fn new() -> Self {
        Self { active: BUCKETS[0] }
    }

    pub fn active(&self) -> Bucket {
        self.active
    }

    pub fn select(&mut self, bucket: Bucket) {
        self.active = bucket;
    }

    pub fn select_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn select_prev(&mut self) {
        self.active = self.active.prev();
    }

    /// Evaluate the active bucket against the query.
    ///
    /// Source order is preserved — classification never sorts.  The empty
    /// check runs on the pre-`take` subset, so `take = 0` with matches
    /// yields an empty card list rather than the placeholder.
    pub fn content<'a>(&self, q: &TabQuery<'a>) -> TabContent<'a> {
        if q.is_loading {
            return TabContent::Loading {
                rows: SKELETON_ROWS,
            };
        }

        let listings = q.listings.unwrap_or(&[]);
        let mut matched: Vec<&Listing> = listings
            .iter()
            .filter(|l| self.active.matches(l, q.now))
            .filter(|l| q.language.map_or(true, |pred| pred(l)))
            .collect();

        if matched.is_empty() {
            return TabContent::Empty {
                title: self.active.empty_title(),
                message: self.active.empty_message(),
            };
        }

        if let Some(take) = q.take {
            matched.truncate(take);
        }
        TabContent::Listings(matched)
    }
}

impl Default for TabController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::listing::ListingStatus;

    fn listing(id: &str, status: ListingStatus, deadline: &str, winners: Option<bool>) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("listing {id}"),
            slug: format!("listing-{id}"),
            status,
            deadline: deadline.parse().unwrap(),
            is_winners_announced: winners,
            language: None,
            sponsor_name: None,
            reward_amount: None,
            token: None,
        }
    }

    fn open_listing(id: &str) -> Listing {
        listing(id, ListingStatus::Open, "2099-01-01T00:00:00Z", None)
    }

    fn now() -> DateTime<Utc> {
        "2024-06-15T12:00:00Z".parse().unwrap()
    }

    fn query<'a>(listings: Option<&'a [Listing]>) -> TabQuery<'a> {
        TabQuery {
            listings,
            is_loading: false,
            now: now(),
            take: None,
            language: None,
        }
    }

    fn ids(content: &TabContent<'_>) -> Vec<String> {
        match content {
            TabContent::Listings(v) => v.iter().map(|l| l.id.clone()).collect(),
            other => panic!("expected listings, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_tab_is_first_bucket() {
        assert_eq!(TabController::new().active(), Bucket::Open);
    }

    #[test]
    fn test_select_is_total_from_any_state() {
        let mut tabs = TabController::new();
        for from in BUCKETS {
            for to in BUCKETS {
                tabs.select(from);
                tabs.select(to);
                assert_eq!(tabs.active(), to);
            }
        }
    }

    #[test]
    fn test_reselecting_active_tab_is_a_noop() {
        let mut tabs = TabController::new();
        tabs.select(Bucket::InReview);
        tabs.select(Bucket::InReview);
        assert_eq!(tabs.active(), Bucket::InReview);
    }

    #[test]
    fn test_loading_always_yields_eight_skeleton_rows() {
        let tabs = TabController::new();
        let none: Option<&[Listing]> = None;
        let one = vec![open_listing("a")];
        let many: Vec<Listing> = (0..1000).map(|i| open_listing(&i.to_string())).collect();

        for (listings, take) in [
            (none, None),
            (Some(&one[..]), Some(2)),
            (Some(&many[..]), Some(1)),
        ] {
            let q = TabQuery {
                listings,
                is_loading: true,
                now: now(),
                take,
                language: None,
            };
            assert_eq!(tabs.content(&q), TabContent::Loading { rows: SKELETON_ROWS });
        }
    }

    #[test]
    fn test_absent_collection_takes_empty_path() {
        let tabs = TabController::new();
        match tabs.content(&query(None)) {
            TabContent::Empty { title, message } => {
                assert_eq!(title, "No listings available!");
                assert_eq!(
                    message,
                    "Subscribe to notifications to get notified about new listings."
                );
            }
            other => panic!("expected empty state, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_copy_is_bucket_specific() {
        let mut tabs = TabController::new();
        let listings: Vec<Listing> = Vec::new();

        tabs.select(Bucket::InReview);
        match tabs.content(&query(Some(&listings))) {
            TabContent::Empty { title, message } => {
                assert_eq!(title, "No listings in review!");
                assert_eq!(
                    message,
                    "Subscribe to notifications to get notified about updates."
                );
            }
            other => panic!("expected empty state, got {other:?}"),
        }

        tabs.select(Bucket::Completed);
        match tabs.content(&query(Some(&listings))) {
            TabContent::Empty { title, message } => {
                assert_eq!(title, "No completed listings!");
                assert_eq!(
                    message,
                    "Subscribe to notifications to get notified about announcements."
                );
            }
            other => panic!("expected empty state, got {other:?}"),
        }
    }

    #[test]
    fn test_take_caps_in_source_order() {
        let tabs = TabController::new();
        let listings: Vec<Listing> = (0..5).map(|i| open_listing(&format!("l{i}"))).collect();

        let mut q = query(Some(&listings));
        q.take = Some(2);
        assert_eq!(ids(&tabs.content(&q)), vec!["l0", "l1"]);

        q.take = None;
        assert_eq!(ids(&tabs.content(&q)), vec!["l0", "l1", "l2", "l3", "l4"]);
    }

    #[test]
    fn test_filtering_follows_the_active_bucket() {
        let mut tabs = TabController::new();
        let listings = vec![
            open_listing("open"),
            listing("review", ListingStatus::Open, "2024-01-01T00:00:00Z", None),
            listing("done", ListingStatus::Closed, "2024-01-01T00:00:00Z", None),
        ];
        let q = query(Some(&listings));

        assert_eq!(ids(&tabs.content(&q)), vec!["open"]);
        tabs.select_next();
        assert_eq!(ids(&tabs.content(&q)), vec!["review"]);
        tabs.select_next();
        assert_eq!(ids(&tabs.content(&q)), vec!["done"]);
        tabs.select_prev();
        assert_eq!(tabs.active(), Bucket::InReview);
    }

    #[test]
    fn test_language_modifier_composes_with_bucket_rule() {
        let tabs = TabController::new();
        let mut en = open_listing("en");
        en.language = Some("en".to_string());
        let mut pt = open_listing("pt");
        pt.language = Some("pt-br".to_string());
        let untagged = open_listing("any");
        let listings = vec![en, pt, untagged];

        let pred = |l: &Listing| l.matches_language("en");
        let q = TabQuery {
            listings: Some(&listings),
            is_loading: false,
            now: now(),
            take: None,
            language: Some(&pred),
        };
        assert_eq!(ids(&tabs.content(&q)), vec!["en", "any"]);
    }

    #[test]
    fn test_content_is_idempotent_for_fixed_inputs() {
        let tabs = TabController::new();
        let listings = vec![open_listing("a"), open_listing("b")];
        let q = query(Some(&listings));
        assert_eq!(ids(&tabs.content(&q)), ids(&tabs.content(&q)));
    }
}
