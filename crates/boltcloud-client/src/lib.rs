//! The `boltcloud-client` library crate provides a set of APIs for
//! controlling Bolt devices through the Bolt cloud.
//!
//! A device is reached through its cloud account: every request carries the
//! API key of the account and the name of the device, and the cloud forwards
//! the operation to the device.
//!
//! Core functionalities of this crate include:
//!
//! - Validating pin and value arguments before any request is sent
//! - Building the request URL of every remote operation
//! - Sending `GET` requests to the cloud and decoding their `JSON` bodies
//! - Reporting every failure, local or remote, with the same envelope the
//!   cloud uses for its own failures
//!
//! Requests are sent with `reqwest`, so operations must be awaited inside an
//! asynchronous runtime such as `tokio`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// A client for controlling a device through the cloud.
pub mod client;
/// Client configuration and device credentials.
pub mod config;
/// Error management.
pub mod error;
/// Request URL construction.
pub mod request;
/// Sending requests and decoding their responses.
pub mod response;
