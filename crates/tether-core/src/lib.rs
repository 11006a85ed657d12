//! Tether Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tether layout and
//! connection crates. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Graph**: The node/edge data model and its integrity checks ([`graph`] module)

pub mod geometry;
pub mod graph;
pub mod identifier;
