//! # Workflows Module
//!
//! The user-facing entry points of the library. A workflow takes a polymer
//! built by the chain-construction collaborator, runs the classification
//! engines appropriate to its backbone kind, and leaves the polymer's span
//! arena and per-monomer assignments ready for rendering and queries.

pub mod assign;
