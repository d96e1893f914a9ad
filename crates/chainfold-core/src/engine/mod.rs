//! # Engine Module
//!
//! The classification engines: alpha-carbon torsion codes (Levitt-Greer),
//! Ramachandran-angle windows, and the Kabsch-Sander hydrogen-bond model.
//!
//! Engines are best-effort and never fail a pass: undefined geometry yields
//! NaN sentinels that classify as "no structure", and residues with missing
//! backbone atoms are skipped rather than reported. Errors exist only at the
//! configuration-loading edge.
//!
//! ## Key Components
//!
//! - **Configuration** ([`config`]) - Phi/psi window tables, hydrogen
//!   placement strategies, and energy thresholds
//! - **Alpha-Carbon Classification** ([`alpha`]) - Levitt-Greer torsion-code
//!   run detection
//! - **Backbone-Angle Classification** ([`amino`]) - Dihedral computation and
//!   Ramachandran window matching
//! - **Hydrogen Bonds** ([`hbond`]) - Kabsch-Sander detection, energy model,
//!   and H-bond-topology classification

pub mod alpha;
pub mod amino;
pub mod config;
pub mod hbond;
