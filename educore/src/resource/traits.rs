use serde::{
    de::DeserializeOwned,
    Serialize,
};
use std::{
    borrow::Cow,
    fmt::Debug,
};

/// An entity exposed by the API as a named collection.
pub trait Resource: Clone + Debug + DeserializeOwned + Serialize + Send + Sync + 'static {
    /// The endpoint segment under `/api/`, e.g. `modules`.
    const KIND: &'static str;

    fn id(&self) -> i64;

    /// Text view of a named domain field.
    ///
    /// This is the only way the filter engine and the presenter look into
    /// an item; `None` means the item does not carry a value for `key`.
    fn field(&self, key: &str) -> Option<Cow<'_, str>>;

    fn created_at(&self) -> Option<&str> {
        None
    }
}
