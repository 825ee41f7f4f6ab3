//! Core domain types and the pure logic behind pagination and quiz rounds.

pub mod pagination;
pub mod quiz;

use serde::{Deserialize, Serialize};

/// A named grouping (e.g. "Sports") that questions belong to.
///
/// Categories are seeded at startup and read-mostly afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single trivia item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// References `Category.id`.
    pub category: i64,
    pub difficulty: i64,
}

/// A question as submitted for creation, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}
