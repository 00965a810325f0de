//! voldiag Core Types and Definitions
//!
//! This crate provides the foundational types for voldiag storage diagrams.
//! It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Colors**: CSS color parsing and conversion ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds used by the native layout ([`geometry`] module)
//! - **Semantic**: Nodes, edges, diagrams and the explicit [`semantic::DiagramBuilder`]

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod semantic;
