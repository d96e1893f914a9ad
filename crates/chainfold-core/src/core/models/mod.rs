//! # Core Models Module
//!
//! Data structures representing biopolymer chains for secondary-structure
//! assignment.
//!
//! A [`polymer::Polymer`] owns an ordered array of [`monomer::Monomer`]s and
//! an arena of [`structure::ProteinStructure`] spans keyed by
//! [`ids::StructureId`]. Monomers hold an optional arena key back to their
//! span and spans hold index ranges into the monomer array, so the
//! monomer/structure relationship carries no reference cycles.
//!
//! ```ignore
//! use chainfold::core::models::{monomer::{AtomRole, BackboneKind, Monomer}, polymer::Polymer};
//!
//! let monomers = vec![
//!     Monomer::new('A', 1, "ALA").with_atom(AtomRole::AlphaCarbon, Point3::origin()),
//!     // ...
//! ];
//! let polymer = Polymer::new(BackboneKind::Amino, monomers)?;
//! ```

pub mod ids;
pub mod monomer;
pub mod polymer;
pub mod structure;
