use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::{
    lenient_string,
    traits::Resource,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Module {
    pub id: i64,
    #[serde(rename = "nomMod", default)]
    pub name: Option<String>,
    #[serde(rename = "descriptionMod", default)]
    pub description: Option<String>,
    #[serde(rename = "anneeMod", default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for Module {
    const KIND: &'static str = "modules";

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "name" => self.name.as_deref().map(Cow::Borrowed),
            "description" => self.description.as_deref().map(Cow::Borrowed),
            "year" => self.year.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
