//! Skill model.

use serde::{Deserialize, Serialize};

/// A skill a volunteer can declare. Created lazily when first referenced;
/// `name` is the unique natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub created_at: String,
}
