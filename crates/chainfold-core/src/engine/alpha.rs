//! Alpha-carbon-only secondary-structure determination.
//!
//! Levitt and Greer,
//! "Automatic Identification of Secondary Structure in Globular Proteins",
//! J. Mol. Biol. (1977) 114, 181-293.
//!
//! Classification runs over the virtual torsion angles of four consecutive
//! lead atoms: angle codes, a sheet/helix overlap correction, run detection,
//! run extension, a turn search, and finally span construction.

use crate::core::models::polymer::Polymer;
use crate::core::models::structure::StructureType;
use crate::core::utils::geometry::dihedral_angle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    Nada,
    RightHelix,
    BetaSheet,
    LeftHelix,
    LeftTurn,
    RightTurn,
}

/// Runs the full Levitt-Greer pass over the polymer's lead atoms.
///
/// Chains shorter than four residues carry no classifiable geometry and are
/// left untouched. Prior spans are expected to be cleared by the caller.
pub fn classify(polymer: &mut Polymer) {
    let n = polymer.monomer_count();
    if n < 4 {
        return;
    }
    let angles = lead_torsion_angles(polymer);
    let mut codes = codes_from_angles(&angles);
    correct_sheet_helix_overlap(&mut codes, &angles);
    let mut tags = runs_of_four_or_more(&codes);
    extend_runs(&mut tags);
    search_for_turns(&mut codes, &angles, &mut tags);
    debug!(monomers = n, "alpha-carbon classification tags computed");
    polymer.add_structures_from_tags(&tags);
}

/// Virtual torsion over leads (i-2, i-1, i, i+1) for each interior residue;
/// NaN at the two residues on either end.
fn lead_torsion_angles(polymer: &Polymer) -> Vec<f64> {
    let n = polymer.monomer_count();
    let leads: Vec<_> = (0..n)
        .map(|i| polymer.monomer(i).and_then(|m| m.lead()))
        .collect();
    let mut angles = vec![f64::NAN; n];
    for i in 2..=n - 2 {
        if let (Some(a), Some(b), Some(c), Some(d)) =
            (leads[i - 2], leads[i - 1], leads[i], leads[i + 1])
        {
            angles[i] = dihedral_angle(&a, &b, &c, &d);
        }
    }
    angles
}

fn codes_from_angles(angles: &[f64]) -> Vec<Code> {
    let n = angles.len();
    let mut codes = vec![Code::Nada; n];
    for i in 2..=n - 2 {
        let degrees = angles[i];
        codes[i] = if (10.0..120.0).contains(&degrees) {
            Code::RightHelix
        } else if degrees >= 120.0 || degrees < -90.0 {
            Code::BetaSheet
        } else if (-90.0..0.0).contains(&degrees) {
            Code::LeftHelix
        } else {
            Code::Nada
        };
    }
    codes
}

/// A sheet code sitting inside a right-helix context is a misclassified
/// helix residue near a kink; reclassify it when its angle stays below 140.
fn correct_sheet_helix_overlap(codes: &mut [Code], angles: &[f64]) {
    let n = codes.len();
    if n < 4 {
        return;
    }
    for i in 2..n - 2 {
        if codes[i] == Code::BetaSheet
            && angles[i] <= 140.0
            && codes[i - 2] == Code::RightHelix
            && codes[i - 1] == Code::RightHelix
            && codes[i + 1] == Code::RightHelix
            && codes[i + 2] == Code::RightHelix
        {
            codes[i] = Code::RightHelix;
        }
    }
}

/// Tags every maximal run of at least four identical non-NADA codes as
/// helix or sheet; shorter runs stay untagged.
fn runs_of_four_or_more(codes: &[Code]) -> Vec<StructureType> {
    let n = codes.len();
    let mut tags = vec![StructureType::None; n];
    let mut code = Code::Nada;
    let mut run_length = 0;
    for i in 0..n {
        if codes[i] == code && code != Code::Nada {
            run_length += 1;
            let tag = if code == Code::BetaSheet {
                StructureType::Sheet
            } else {
                StructureType::Helix
            };
            if run_length == 4 {
                for j in 0..4 {
                    tags[i - j] = tag;
                }
            } else if run_length > 4 {
                tags[i] = tag;
            }
        } else {
            run_length = 1;
            code = codes[i];
        }
    }
    tags
}

/// One leftward pass: an untagged residue just before a tagged one inherits
/// its tag, and the chain ends copy their neighbors.
fn extend_runs(tags: &mut [StructureType]) {
    let n = tags.len();
    for i in 1..n.saturating_sub(4) {
        if tags[i].is_none() && !tags[i + 1].is_none() {
            tags[i] = tags[i + 1];
        }
    }
    tags[0] = tags[1];
    tags[n - 1] = tags[n - 2];
}

/// Recomputes turn codes for residues the run passes left untagged; a
/// residue whose turn code matches its successor's is marked TURN.
fn search_for_turns(codes: &mut [Code], angles: &[f64], tags: &mut [StructureType]) {
    let n = codes.len();
    for i in (2..=n - 2).rev() {
        codes[i] = Code::Nada;
        if tags[i].is_none() {
            let angle = angles[i];
            if (-90.0..0.0).contains(&angle) {
                codes[i] = Code::LeftTurn;
            } else if (0.0..90.0).contains(&angle) {
                codes[i] = Code::RightTurn;
            }
        }
    }

    for i in (0..=n - 2).rev() {
        if codes[i] != Code::Nada && codes[i + 1] == codes[i] && tags[i].is_none() {
            tags[i] = StructureType::Turn;
        }
    }
}
