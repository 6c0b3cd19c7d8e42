#![doc = include_str!("../README.md")]

mod api;
pub use api::start_identity_mock;
