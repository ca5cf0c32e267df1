//! The shared vocabulary between a Bolt cloud client and the remote service.
//!
//! This crate provides APIs to:
//!
//! - Name every remote operation exposed by the cloud, together with the
//!   channel (digital, analog, serial or servo) it acts on.
//! - Describe pin and value arguments as tagged unions. An argument is either
//!   a single token or an ordered list of tokens, and a token is either an
//!   integer or a text.
//! - Validate arguments against the small fixed sets of values accepted by a
//!   device, such as the digital pins or the digital states.
//! - Wrap the JSON envelope returned by the cloud, which always carries a
//!   `value` and a `success` field.
//!
//! Nothing in this crate performs I/O, so it can be compiled for both `std`
//! and `no_std` environments.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![no_std]

extern crate alloc;

/// Remote operations and their channels.
pub mod operation;
/// The response envelope returned by the cloud.
pub mod response;
/// Pin and value arguments along with their validation rules.
pub mod value;

#[cfg(test)]
#[cfg(feature = "deserialize")]
pub(crate) fn serialize<T: serde::Serialize>(value: T) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

#[cfg(test)]
#[cfg(feature = "deserialize")]
pub(crate) fn deserialize<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}
