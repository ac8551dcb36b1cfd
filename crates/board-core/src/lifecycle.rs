//! Listing lifecycle classification.
//!
//! Three independent boolean rules decide which bucket a listing shows up
//! in.  They are deliberately NOT a single exhaustive match: the rules were
//! tuned against live data and their edge cases matter.
//!
//!   - `now == deadline` still counts as OPEN (the "after" check is strict);
//!   - a listing whose deadline passed but whose status is still OPEN lands
//!     in IN REVIEW until winners are announced or the sponsor closes it;
//!   - a CLOSED listing is COMPLETED regardless of deadline — closing early
//!     completes it.
//!
//! Everything here is pure: membership is a function of
//! `(status, deadline, winners_announced, now)` and is recomputed on every
//! evaluation.  `now` is an injected parameter, never an ambient call, so
//! boundary instants are testable.

use chrono::{DateTime, Utc};

use crate::listing::{Listing, ListingStatus};

/// The three fixed lifecycle buckets, in tab order.
pub const BUCKETS: [Bucket; 3] = [Bucket::Open, Bucket::InReview, Bucket::Completed];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bucket {
    #[default]
    Open,
    InReview,
    Completed,
}

impl Bucket {
    /// Stable key (config, logs).
    pub fn key(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InReview => "in-review",
            Self::Completed => "completed",
        }
    }

    /// Tab label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InReview => "IN REVIEW",
            Self::Completed => "COMPLETED",
        }
    }

    /// Placeholder heading when the bucket has nothing to show.
    pub fn empty_title(self) -> &'static str {
        match self {
            Self::Open => "No listings available!",
            Self::InReview => "No listings in review!",
            Self::Completed => "No completed listings!",
        }
    }

    /// Placeholder body when the bucket has nothing to show.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Open => "Subscribe to notifications to get notified about new listings.",
            Self::InReview => "Subscribe to notifications to get notified about updates.",
            Self::Completed => "Subscribe to notifications to get notified about announcements.",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Open => Self::InReview,
            Self::InReview => Self::Completed,
            Self::Completed => Self::Open,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Open => Self::Completed,
            Self::InReview => Self::Open,
            Self::Completed => Self::InReview,
        }
    }

    /// Membership test for this bucket at instant `now`.
    pub fn matches(self, listing: &Listing, now: DateTime<Utc>) -> bool {
        match self {
            Self::Open => is_open(listing, now),
            Self::InReview => is_in_review(listing, now),
            Self::Completed => is_completed(listing),
        }
    }
}

/// OPEN: still accepting submissions.  The deadline comparison is
/// non-strict — at the exact deadline instant the listing is still open.
pub fn is_open(listing: &Listing, now: DateTime<Utc>) -> bool {
    listing.status == ListingStatus::Open
        && now <= listing.deadline
        && !listing.winners_announced()
}

/// IN REVIEW: deadline strictly passed, winners not announced, and the
/// sponsor has not yet flipped the status to CLOSED.
pub fn is_in_review(listing: &Listing, now: DateTime<Utc>) -> bool {
    !listing.winners_announced()
        && now > listing.deadline
        && listing.status == ListingStatus::Open
}

/// COMPLETED: closed by the sponsor, or winners announced while the status
/// is still formally OPEN.  Deadline does not participate — a listing
/// closed before its deadline is completed immediately.
pub fn is_completed(listing: &Listing) -> bool {
    listing.status == ListingStatus::Closed
        || (listing.winners_announced() && listing.status == ListingStatus::Open)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(status: ListingStatus, deadline: &str, winners: Option<bool>) -> Listing {
        Listing {
            id: "t-1".to_string(),
            title: "test listing".to_string(),
            slug: "test-listing".to_string(),
            status,
            deadline: deadline.parse().unwrap(),
            is_winners_announced: winners,
            language: None,
            sponsor_name: None,
            reward_amount: None,
            token: None,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_open_before_deadline() {
        let l = listing(ListingStatus::Open, "2024-01-01T00:00:00Z", Some(false));
        let now = at("2023-12-31T23:59:59Z");
        assert!(is_open(&l, now));
        assert!(!is_in_review(&l, now));
        assert!(!is_completed(&l));
    }

    #[test]
    fn test_exact_deadline_instant_is_still_open() {
        let l = listing(ListingStatus::Open, "2024-01-01T00:00:00Z", Some(false));
        let now = at("2024-01-01T00:00:00Z");
        assert!(is_open(&l, now));
        assert!(!is_in_review(&l, now));
    }

    #[test]
    fn test_one_second_after_deadline_is_in_review() {
        let l = listing(ListingStatus::Open, "2024-01-01T00:00:00Z", Some(false));
        let now = at("2024-01-01T00:00:01Z");
        assert!(!is_open(&l, now));
        assert!(is_in_review(&l, now));
        assert!(!is_completed(&l));
    }

    #[test]
    fn test_completed_when_closed_before_deadline() {
        // Closing a listing completes it even with the deadline far in the
        // future.  Historical behavior — do not "fix".
        let l = listing(ListingStatus::Closed, "2099-01-01T00:00:00Z", Some(false));
        let now = at("2024-01-01T00:00:00Z");
        assert!(is_completed(&l));
        assert!(!is_open(&l, now));
        assert!(!is_in_review(&l, now));
    }

    #[test]
    fn test_completed_when_winners_announced_while_open() {
        let l = listing(ListingStatus::Open, "2099-01-01T00:00:00Z", Some(true));
        let now = at("2024-01-01T00:00:00Z");
        assert!(is_completed(&l));
        assert!(!is_open(&l, now));
        assert!(!is_in_review(&l, now));
    }

    #[test]
    fn test_missing_winners_flag_means_false() {
        let tagged = listing(ListingStatus::Open, "2099-01-01T00:00:00Z", Some(false));
        let absent = listing(ListingStatus::Open, "2099-01-01T00:00:00Z", None);
        let now = at("2024-06-01T00:00:00Z");
        for bucket in BUCKETS {
            assert_eq!(bucket.matches(&tagged, now), bucket.matches(&absent, now));
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        let l = listing(ListingStatus::Open, "2024-01-01T00:00:00Z", None);
        let now = at("2024-03-01T00:00:00Z");
        let first: Vec<bool> = BUCKETS.iter().map(|b| b.matches(&l, now)).collect();
        let second: Vec<bool> = BUCKETS.iter().map(|b| b.matches(&l, now)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bucket_cycling_covers_all_three() {
        let mut b = Bucket::Open;
        b = b.next();
        assert_eq!(b, Bucket::InReview);
        b = b.next();
        assert_eq!(b, Bucket::Completed);
        b = b.next();
        assert_eq!(b, Bucket::Open);
        assert_eq!(Bucket::Open.prev(), Bucket::Completed);
    }

    #[test]
    fn test_empty_copy_literals() {
        assert_eq!(Bucket::Open.empty_title(), "No listings available!");
        assert_eq!(
            Bucket::Open.empty_message(),
            "Subscribe to notifications to get notified about new listings."
        );
        assert_eq!(Bucket::InReview.empty_title(), "No listings in review!");
        assert_eq!(
            Bucket::InReview.empty_message(),
            "Subscribe to notifications to get notified about updates."
        );
        assert_eq!(Bucket::Completed.empty_title(), "No completed listings!");
        assert_eq!(
            Bucket::Completed.empty_message(),
            "Subscribe to notifications to get notified about announcements."
        );
    }
}
