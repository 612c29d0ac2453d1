//! Directed relation edges between dictionary entries.
//!
//! Both edge kinds are append-only and idempotent: recording an edge that
//! already exists is a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `criteria_id` (a pronunciation) lists `related_id` (another pronunciation)
/// as a synonym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymsWordRelation {
  pub criteria_id: Uuid,
  pub related_id:  Uuid,
  pub created_at:  DateTime<Utc>,
}

/// The definition of word `criteria_id` refers to pronunciation
/// `relation_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeWordRelation {
  pub criteria_id: Uuid,
  pub relation_id: Uuid,
  pub created_at:  DateTime<Utc>,
}
