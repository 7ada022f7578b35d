pub mod browser;
pub mod client;
#[cfg(feature = "cli")]
pub mod conf;
pub mod error;
pub mod fetcher;
pub mod presenter;
pub mod view;
