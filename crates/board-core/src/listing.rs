use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Formal lifecycle status as published by the listings API.
///
/// CLOSED is terminal.  OPEN is not — an OPEN listing whose deadline has
/// passed stays OPEN on the wire until the sponsor flips it or announces
/// winners, which is exactly the window the IN REVIEW bucket covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown listing status: {0:?}")]
pub struct ParseStatusError(String);

impl FromStr for ListingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A time-boxed bounty/grant listing, as served by the API.
///
/// Read-only to the classifier: there is no stored "current bucket" field.
/// Bucket membership is recomputed from `(status, deadline, winners, now)`
/// on every evaluation — see [`crate::lifecycle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: ListingStatus,
    pub deadline: DateTime<Utc>,
    /// Tri-state on the wire: absent and `false` both mean "not announced".
    /// Collapse it through [`Listing::winners_announced`], not ad-hoc checks.
    #[serde(default)]
    pub is_winners_announced: Option<bool>,
    /// Content language tag (e.g. "en", "pt-br").  Only consulted when the
    /// caller opts into language filtering.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub sponsor_name: Option<String>,
    #[serde(default)]
    pub reward_amount: Option<u64>,
    #[serde(default)]
    pub token: Option<String>,
}

impl Listing {
    /// The single place the optional winners flag is normalized.
    pub fn winners_announced(&self) -> bool {
        self.is_winners_announced.unwrap_or(false)
    }

    /// Web URL of this listing on the board site.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/listings/{}", base_url.trim_end_matches('/'), self.slug)
    }

    /// Language modifier predicate.  An untagged listing matches any
    /// language; a tagged one must match case-insensitively.
    pub fn matches_language(&self, language: &str) -> bool {
        self.language
            .as_deref()
            .map_or(true, |tag| tag.eq_ignore_ascii_case(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!("OPEN".parse::<ListingStatus>().unwrap(), ListingStatus::Open);
        assert_eq!(
            "CLOSED".parse::<ListingStatus>().unwrap(),
            ListingStatus::Closed
        );
        assert!("DRAFT".parse::<ListingStatus>().is_err());
        assert_eq!(ListingStatus::Closed.to_string(), "CLOSED");
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "b-42",
            "title": "Write a deep dive",
            "slug": "write-a-deep-dive",
            "status": "OPEN",
            "deadline": "2024-01-01T00:00:00Z",
            "isWinnersAnnounced": true,
            "language": "en",
            "sponsorName": "Acme",
            "rewardAmount": 1500,
            "token": "USDC"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, "b-42");
        assert_eq!(listing.status, ListingStatus::Open);
        assert!(listing.winners_announced());
        assert_eq!(listing.reward_amount, Some(1500));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        // Optional fields absent — must not fail, winners defaults to false.
        let json = r#"{
            "id": "b-1",
            "title": "Fix the docs",
            "status": "CLOSED",
            "deadline": "2024-06-01T12:00:00Z"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(!listing.winners_announced());
        assert!(listing.language.is_none());
        assert_eq!(listing.slug, "");
    }

    #[test]
    fn test_language_matching() {
        let json = r#"{"id":"x","title":"t","deadline":"2024-01-01T00:00:00Z","language":"PT-BR"}"#;
        let tagged: Listing = serde_json::from_str(json).unwrap();
        assert!(tagged.matches_language("pt-br"));
        assert!(!tagged.matches_language("en"));

        let json = r#"{"id":"y","title":"t","deadline":"2024-01-01T00:00:00Z"}"#;
        let untagged: Listing = serde_json::from_str(json).unwrap();
        assert!(untagged.matches_language("en"));
    }
}
