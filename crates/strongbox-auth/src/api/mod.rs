//! Models for the identity `connect/token` endpoint. These cannot be auto-generated and are
//! intentionally not visible outside of this crate.

pub(crate) mod enums;
pub(crate) mod request;
pub(crate) mod response;
