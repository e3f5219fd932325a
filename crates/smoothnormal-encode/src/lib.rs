//! Pack unit normals into two components using the octahedral mapping.
//!
//! This crate provides pure synchronous functions with no allocation and no
//! shared state, so they can be called from any worker thread. The baker in
//! the `smoothnormal` crate calls [`encode`] once per vertex when compressed
//! output is requested.
//!
//! # Design principles
//!
//! - **Pure**: Every function is a total mapping over its input
//! - **Stateless**: No caching, no lookup tables
//! - **Web-compatible**: Compiles to WASM
//!
//! # Key functions
//!
//! - [`encode`]: The fold used by baked outline normals
//! - [`encode_standard`]: The textbook full-sphere fold
//! - [`decode`]: Inverse octahedral mapping
//! - [`to_unorm`] / [`from_unorm`]: Remap to and from `[0, 1]` storage

pub mod octahedral;

pub use octahedral::{decode, encode, encode_standard, from_unorm, to_unorm};
