use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::traits::Resource;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub module_id: Option<i64>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Document {
    const KIND: &'static str = "documents";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "title" => self.title.as_deref().map(Cow::Borrowed),
            "description" => self.description.as_deref().map(Cow::Borrowed),
            "module_id" => self.module_id.map(|id| Cow::Owned(id.to_string())),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// Outcome of toggling the current user's like on a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeStatus {
    Added,
    Removed,
}

impl LikeStatus {
    /// The like count after this outcome, never below zero.
    pub fn apply(self, count: u64) -> u64 {
        match self {
            LikeStatus::Added => count.saturating_add(1),
            LikeStatus::Removed => count.saturating_sub(1),
        }
    }
}

/// Body of the `documents/<id>/like` response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LikeReply {
    pub status: LikeStatus,
}
