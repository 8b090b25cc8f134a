//! Wire types for the W3C WebDriver protocol.
//!
//! This crate contains the serde-serializable request and response bodies
//! exchanged with a WebDriver server (chromedriver, geckodriver, Selenium)
//! over HTTP. These types represent the "protocol layer" - the shapes of data
//! as they appear on the wire.
//!
//! Types in this crate are pure data and match the W3C specification field
//! names. The client that sends them lives in `sd-steps`.

pub mod capabilities;
pub mod commands;
pub mod types;

pub use capabilities::*;
pub use commands::*;
pub use types::*;
