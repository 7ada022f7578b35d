use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::traits::Resource;

/// A worked solution, listed under `exercises/<id>/solutions`.
///
/// `content` is HTML as authored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Solution {
    pub id: i64,
    #[serde(default)]
    pub exercise_id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Solution {
    const KIND: &'static str = "solutions";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "content" => self.content.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
