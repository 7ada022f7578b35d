use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::{
    lenient_string,
    traits::Resource,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Active,
    Archived,
    #[default]
    #[serde(other)]
    Draft,
}

impl ExamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::Active => "active",
            ExamStatus::Archived => "archived",
            ExamStatus::Draft => "draft",
        }
    }
}

/// The embedded summary of the module an exam belongs to.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ModuleRef {
    pub id: i64,
    #[serde(rename = "nomMod", default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Exam {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default)]
    pub module_id: Option<i64>,
    #[serde(default)]
    pub module: Option<ModuleRef>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub status: ExamStatus,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Exam {
    const KIND: &'static str = "exams";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "title" => self.title.as_deref().map(Cow::Borrowed),
            "year" => self.year.as_deref().map(Cow::Borrowed),
            "module_id" => self.module_id
                .or_else(|| self.module.as_ref().map(|m| m.id))
                .map(|id| Cow::Owned(id.to_string())),
            "module" => self.module.as_ref()
                .and_then(|m| m.name.as_deref())
                .map(Cow::Borrowed),
            "duration" => self.duration.as_deref().map(Cow::Borrowed),
            "difficulty_level" => self.difficulty_level.as_deref().map(Cow::Borrowed),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
