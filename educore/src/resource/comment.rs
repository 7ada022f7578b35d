use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::traits::Resource;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CommentAuthor {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A reader comment on a document, listed under `documents/<id>/comments`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub document_id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub user: Option<CommentAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Comment {
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.name.as_deref())
    }
}

impl Resource for Comment {
    const KIND: &'static str = "comments";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "content" => self.content.as_deref().map(Cow::Borrowed),
            "author" => self.author().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
