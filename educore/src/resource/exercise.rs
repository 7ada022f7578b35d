use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::traits::Resource;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Exercise {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub module_id: Option<i64>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Exercise {
    const KIND: &'static str = "exercises";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "title" => self.title.as_deref().map(Cow::Borrowed),
            "description" => self.description.as_deref().map(Cow::Borrowed),
            "module_id" => self.module_id.map(|id| Cow::Owned(id.to_string())),
            "difficulty_level" => self.difficulty_level.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
