use chrono::{
    DateTime,
    NaiveDateTime,
    Utc,
};
use serde::{Deserialize, Deserializer};

mod comment;
mod document;
mod exam;
mod exercise;
mod module;
mod solution;
pub mod traits;

pub use comment::{
    Comment,
    CommentAuthor,
};
pub use document::{
    Document,
    LikeReply,
    LikeStatus,
};
pub use exam::{
    Exam,
    ExamStatus,
    ModuleRef,
};
pub use exercise::Exercise;
pub use module::Module;
pub use solution::Solution;
pub use traits::Resource;

/// Parse a timestamp as emitted by the API.
///
/// Both RFC 3339 and the plain `YYYY-MM-DD HH:MM:SS` form are accepted,
/// the latter being interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.and_utc())
                .ok()
        })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Text(String),
    Integer(i64),
    Float(f64),
}

// Some endpoints emit numeric columns (year, duration) as numbers while
// others quote them; either way they are kept as text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lenient>::deserialize(deserializer)?.map(|value| match value {
        Lenient::Text(s) => s,
        Lenient::Integer(i) => i.to_string(),
        Lenient::Float(f) => f.to_string(),
    }))
}
