//! # Core Module
//!
//! Stateless foundations of the chainfold library: the data structures that
//! represent biopolymer chains and their structural spans, and the pure
//! geometry routines the classification engines are built on.
//!
//! ## Key Components
//!
//! - **Chain Representation** ([`models`]) - Monomers, polymers, and typed
//!   structural spans with their axis geometry
//! - **Geometry and Tables** ([`utils`]) - Dihedral angles, line fitting,
//!   and compile-time residue-name tables

pub mod models;
pub mod utils;
