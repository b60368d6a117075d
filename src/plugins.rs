//! Ready-made implementations of the plugin traits in
//! [`adapters`](crate::adapters).

#[cfg(feature = "syntect")]
pub mod syntect;
