pub mod api;
pub mod error;
pub mod filter;
pub mod listing;
pub mod notice;
pub mod query;
pub mod resource;
pub mod session;
pub mod translation;
