//! Testing infrastructure for reelguess integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `FakeTransport`: in-process stand-in for the metadata API and image CDN
//!   that records every request
//! - `fixtures`: canned API payloads and generated poster images
//! - `TestWorld`: isolated data directory for CLI tests
//! - `assertions`: checks over the CLI's JSON output

pub mod assertions;
pub mod fixtures;
pub mod transport;
pub mod world;

pub use transport::FakeTransport;
pub use world::TestWorld;
