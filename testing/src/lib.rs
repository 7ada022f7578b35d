pub mod core;
pub mod deferred;
pub mod fixture;
pub mod notice;
