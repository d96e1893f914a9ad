//! Backbone dihedral angles and Ramachandran-angle structure determination.
//!
//! Phi/psi/omega follow the convention of Ramachandran and Sasisekharan,
//! "Conformation of Polypeptides and Proteins", Adv. Protein Chem. 23 (1969).
//! Classification assigns each residue the category of the first configured
//! (phi, psi) window it falls in, then builds spans from tag runs.

use crate::core::models::polymer::Polymer;
use crate::core::models::structure::StructureType;
use crate::core::utils::geometry::dihedral_angle;
use crate::engine::config::StructureConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RamaTag {
    AlphaHelix,
    ThreeTenHelix,
    Sheet,
    Turn,
    Nothing,
}

/// Computes phi, psi and omega for every residue pair of the polymer and
/// stores them on the monomers.
///
/// For each adjacent pair (i, i+1):
///
/// ```text
///   phi[i+1] = torsion(C_i,  N_{i+1}, CA_{i+1}, C_{i+1})
///   psi[i]   = torsion(N_i,  CA_i,    C_i,      N_{i+1})
///   omega[i] = torsion(CA_i, C_i,     N_{i+1},  CA_{i+1})
/// ```
///
/// Chain termini keep NaN. Pairs with missing backbone atoms are skipped and
/// the affected angles stay NaN.
pub fn calculate_ramachandran_angles(polymer: &mut Polymer) {
    for i in 0..polymer.monomer_count() {
        if let Some(m) = polymer.monomer_mut(i) {
            m.reset_angles();
        }
    }
    let n = polymer.monomer_count();
    if n < 2 {
        return;
    }
    for i in 0..n - 1 {
        let (Some(r1), Some(r2)) = (polymer.monomer(i), polymer.monomer(i + 1)) else {
            continue;
        };
        let (Some(n1), Some(ca1), Some(c1)) =
            (r1.nitrogen(), r1.alpha_carbon(), r1.carbonyl_carbon())
        else {
            continue;
        };
        let (Some(n2), Some(ca2), Some(c2)) =
            (r2.nitrogen(), r2.alpha_carbon(), r2.carbonyl_carbon())
        else {
            continue;
        };

        let phi = dihedral_angle(&c1, &n2, &ca2, &c2);
        let psi = dihedral_angle(&n1, &ca1, &c1, &n2);
        // omega belongs to the leading residue, so an unusual peptide bond
        // shows up on the residue before the proline, not the proline itself
        let omega = dihedral_angle(&ca1, &c1, &n2, &ca2);

        if let Some(m) = polymer.monomer_mut(i + 1) {
            m.set_phi(phi);
        }
        if let Some(m) = polymer.monomer_mut(i) {
            m.set_psi(psi);
            m.set_omega(omega);
        }
    }
}

/// Ramachandran-angle structure determination.
///
/// Residue i is judged from its own psi and the following residue's phi.
/// Helix hits are split into alpha-type and 3-10-type tags so that distinct
/// helices separated by a kink do not fuse; both still produce HELIX spans.
pub fn classify(polymer: &mut Polymer, config: &StructureConfig) {
    calculate_ramachandran_angles(polymer);

    let n = polymer.monomer_count();
    let mut tags = vec![RamaTag::Nothing; n];
    for i in 0..n.saturating_sub(1) {
        let (Some(leading), Some(trailing)) = (polymer.monomer(i), polymer.monomer(i + 1)) else {
            continue;
        };
        let psi = leading.psi();
        let phi = trailing.phi();
        tags[i] = if config.windows.is_helix(phi, psi) {
            if phi < 0.0 && psi < 25.0 {
                RamaTag::AlphaHelix
            } else {
                RamaTag::ThreeTenHelix
            }
        } else if config.windows.is_sheet(phi, psi) {
            RamaTag::Sheet
        } else if config.windows.is_turn(phi, psi) {
            RamaTag::Turn
        } else {
            RamaTag::Nothing
        };
        debug!(residue = i, phi, psi, tag = ?tags[i], "ramachandran tag");
    }

    build_spans(polymer, &tags, RamaTag::AlphaHelix, StructureType::Helix, 4);
    build_spans(polymer, &tags, RamaTag::ThreeTenHelix, StructureType::Helix, 4);
    build_spans(polymer, &tags, RamaTag::Sheet, StructureType::Sheet, 3);
    build_spans(polymer, &tags, RamaTag::Turn, StructureType::Turn, 3);
}

/// Turns each maximal run of `tag` with length >= `min_run` into one span.
fn build_spans(
    polymer: &mut Polymer,
    tags: &[RamaTag],
    tag: RamaTag,
    structure_type: StructureType,
    min_run: usize,
) {
    let n = tags.len();
    let mut start = 0;
    while start < n {
        if tags[start] != tag {
            start += 1;
            continue;
        }
        let mut end = start + 1;
        while end < n && tags[end] == tag {
            end += 1;
        }
        let end = end - 1;
        if end + 1 - start >= min_run {
            polymer.add_structure(structure_type, 0, 0, start, end);
        }
        start = end + 1;
    }
}
