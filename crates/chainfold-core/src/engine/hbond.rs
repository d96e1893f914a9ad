//! Backbone hydrogen-bond detection and H-bond-pattern classification.
//!
//! The energy model is the Kabsch-Sander electrostatic approximation
//! (W. Kabsch and C. Sander, Biopolymers 22 (1983) 2577-2637), evaluated
//! over the four N/H/C/O interatomic distances of a candidate N-H...O=C
//! contact. Energies are integer hundredths of kcal/mol; acceptance and
//! degeneracy thresholds keep their historical values.

use crate::core::models::polymer::Polymer;
use crate::core::models::structure::StructureType;
use crate::engine::config::{HydrogenBondSettings, HydrogenPlacement};
use nalgebra::Point3;
use std::collections::HashSet;
use tracing::debug;

const Q_CONST: f64 = -332.0 * 0.42 * 0.2 * 1000.0;

/// A detected backbone hydrogen bond from a donor N-H to an acceptor C=O.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrogenBond {
    /// Donor residue index (the N-H side).
    pub donor: usize,
    /// Acceptor residue index (the C=O side).
    pub acceptor: usize,
    /// Bond energy in kcal/mol.
    pub energy_kcal: f64,
    /// Sequence separation donor - acceptor; +4 marks the alpha-helical
    /// pattern, +3 the 3-10 pattern, +5 the pi pattern.
    pub offset: isize,
}

/// Kabsch-Sander energy over the four distances of an N-H...O=C contact,
/// in hundredths of kcal/mol.
pub fn hbond_energy(d_oh: f64, d_ch: f64, d_cn: f64, d_on: f64) -> i32 {
    let energy = Q_CONST / d_oh - Q_CONST / d_ch + Q_CONST / d_cn - Q_CONST / d_on;
    energy.round() as i32
}

/// The amide hydrogen position of a donor residue.
///
/// An explicit hydrogen resolved by the chain builder wins when configured.
/// Otherwise the position is estimated one Angstrom from the nitrogen, in
/// the direction picked by the placement strategy. The chain start and
/// secondary-amine residues have no donor hydrogen.
pub(crate) fn amide_hydrogen_point(
    polymer: &Polymer,
    index: usize,
    settings: &HydrogenBondSettings,
) -> Option<Point3<f64>> {
    if index == 0 {
        return None;
    }
    let m = polymer.monomer(index)?;
    if !m.is_amide_donor() {
        return None;
    }
    let nitrogen = m.nitrogen()?;
    if settings.use_explicit_hydrogens {
        if let Some(h) = m.amide_hydrogen() {
            return Some(h);
        }
    }
    let prev = polymer.monomer(index - 1)?;
    let direction = match settings.placement {
        HydrogenPlacement::TrigonalBisector => {
            let lead = m.lead()?;
            let prev_c = prev.carbonyl_carbon()?;
            let to_lead = nitrogen - lead;
            let to_prev_c = nitrogen - prev_c;
            if to_lead.norm() < 1e-12 || to_prev_c.norm() < 1e-12 {
                return None;
            }
            to_lead.normalize() + to_prev_c.normalize()
        }
        HydrogenPlacement::CarbonylExtension => {
            let prev_c = prev.carbonyl_carbon()?;
            let prev_o = prev.carbonyl_oxygen()?;
            prev_c - prev_o
        }
    };
    let norm = direction.norm();
    if norm < 1e-12 {
        return None;
    }
    Some(nitrogen + direction / norm)
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    acceptor: usize,
    energy: i32,
    accepted: bool,
}

const EMPTY_SLOT: Slot = Slot {
    acceptor: usize::MAX,
    energy: 0,
    accepted: false,
};

/// Finds backbone hydrogen bonds from every donor of `donor_polymer` to the
/// carbonyl groups of `acceptor_polymer` (which may be the same polymer).
///
/// Each donor keeps at most its two lowest-energy acceptors; lower energy
/// always wins a slot, so the result does not depend on scan order. With
/// `check_distances` the geometric sanity checks for constructing real bonds
/// apply (C-N farther than C-H, O...H within 3 Angstroms); without it the
/// raw DSSP scoring criterion alone decides.
pub fn find_hydrogen_bonds(
    donor_polymer: &Polymer,
    acceptor_polymer: &Polymer,
    settings: &HydrogenBondSettings,
    check_distances: bool,
) -> Vec<HydrogenBond> {
    let same_polymer = std::ptr::eq(donor_polymer, acceptor_polymer);
    let max_lead_distance2 = settings.max_lead_distance * settings.max_lead_distance;
    let mut bonds = Vec::new();

    for i in 1..donor_polymer.monomer_count() {
        let Some(h_point) = amide_hydrogen_point(donor_polymer, i, settings) else {
            continue;
        };
        let Some(source) = donor_polymer.monomer(i) else {
            continue;
        };
        let Some(n_point) = source.nitrogen() else {
            continue;
        };
        // raw DSSP scoring also knocks out donors with no carbonyl oxygen
        if !check_distances && source.carbonyl_oxygen().is_none() {
            continue;
        }
        let Some(source_lead) = source.lead() else {
            continue;
        };

        let mut best = [EMPTY_SLOT; 2];
        for j in (0..acceptor_polymer.monomer_count()).rev() {
            if same_polymer && (j == i || j + 1 == i) {
                continue;
            }
            let Some(target) = acceptor_polymer.monomer(j) else {
                continue;
            };
            let (Some(o_point), Some(c_point), Some(target_lead)) = (
                target.carbonyl_oxygen(),
                target.carbonyl_carbon(),
                target.lead(),
            ) else {
                continue;
            };
            if (source_lead - target_lead).norm_squared() >= max_lead_distance2 {
                continue;
            }
            let energy = pair_energy(&n_point, &h_point, &c_point, &o_point, settings, check_distances);
            let slot = Slot {
                acceptor: j,
                energy,
                accepted: energy < settings.energy_threshold,
            };
            if energy < best[0].energy {
                best[1] = best[0];
                best[0] = slot;
            } else if energy < best[1].energy {
                best[1] = slot;
            }
        }

        for slot in best {
            if slot.accepted && slot.acceptor != usize::MAX {
                debug!(
                    donor = i,
                    acceptor = slot.acceptor,
                    energy = slot.energy,
                    "hydrogen bond"
                );
                bonds.push(HydrogenBond {
                    donor: i,
                    acceptor: slot.acceptor,
                    energy_kcal: slot.energy as f64 / 1000.0,
                    offset: i as isize - slot.acceptor as isize,
                });
            }
        }
    }
    bonds
}

/// Energy of one donor/acceptor pair, or 0 when the pair is rejected.
fn pair_energy(
    n_point: &Point3<f64>,
    h_point: &Point3<f64>,
    c_point: &Point3<f64>,
    o_point: &Point3<f64>,
    settings: &HydrogenBondSettings,
    check_distances: bool,
) -> i32 {
    let min_distance2 = settings.min_pair_distance * settings.min_pair_distance;

    let d_on2 = (o_point - n_point).norm_squared();
    if d_on2 < min_distance2 {
        return 0;
    }
    let d_oh2 = (o_point - h_point).norm_squared();
    if d_oh2 < min_distance2 {
        return 0;
    }
    let d_ch2 = (c_point - h_point).norm_squared();
    if d_ch2 < min_distance2 {
        return 0;
    }
    let d_cn2 = (c_point - n_point).norm_squared();
    if d_cn2 < min_distance2 {
        return 0;
    }

    let d_oh = d_oh2.sqrt();
    let d_ch = d_ch2.sqrt();
    let d_cn = d_cn2.sqrt();
    let d_on = d_on2.sqrt();

    let energy = hbond_energy(d_oh, d_ch, d_cn, d_on);

    let is_bond = energy < settings.energy_threshold
        && (!check_distances || (d_cn > d_ch && d_oh <= settings.max_oh_distance));
    if (!is_bond && check_distances) || energy < settings.min_energy {
        0
    } else {
        energy
    }
}

/// Secondary-structure assignment from hydrogen-bond topology.
///
/// Helices are runs of n-turns (an H-bond from residue i+n back to i): the
/// i+4 pattern marks alpha helix, i+3 the 3-10 helix, i+5 the pi helix.
/// Strand residues are paired by parallel or antiparallel bridge patterns.
/// Spans are built from the resulting tag runs.
pub fn classify_from_hbonds(polymer: &mut Polymer, settings: &HydrogenBondSettings) {
    let bonds = {
        let shared: &Polymer = polymer;
        find_hydrogen_bonds(shared, shared, settings, false)
    };
    let bond_set: HashSet<(usize, usize)> =
        bonds.iter().map(|b| (b.donor, b.acceptor)).collect();
    let has_bond = |donor: usize, acceptor: usize| bond_set.contains(&(donor, acceptor));

    let n = polymer.monomer_count();
    let mut tags = vec![StructureType::None; n];

    // alpha first so the stronger pattern wins contested residues
    for (turn_size, subtype, min_consecutive) in [
        (4usize, StructureType::HelixAlpha, 4usize),
        (3, StructureType::Helix310, 3),
        (5, StructureType::HelixPi, 3),
    ] {
        let mut consecutive = 0usize;
        for i in 0..n {
            if i + turn_size < n && has_bond(i + turn_size, i) {
                consecutive += 1;
                if consecutive >= min_consecutive {
                    let start = if consecutive == min_consecutive {
                        i + 1 - (min_consecutive - 1)
                    } else {
                        i
                    };
                    for k in start..=(i + turn_size).min(n - 1) {
                        if tags[k].is_none() {
                            tags[k] = subtype;
                        }
                    }
                }
            } else {
                consecutive = 0;
            }
        }
    }

    for i in 1..n.saturating_sub(1) {
        if tags[i].is_helix() {
            continue;
        }
        for j in i + 2..n {
            if tags[j].is_helix() {
                continue;
            }
            let parallel = (j + 1 < n && has_bond(i, j) && has_bond(j + 1, i))
                || (has_bond(j, i) && i + 1 < n && has_bond(i + 1, j));
            let antiparallel = has_bond(i, j) && has_bond(j, i);
            if parallel || antiparallel {
                tags[i] = StructureType::Sheet;
                tags[j] = StructureType::Sheet;
            }
        }
    }

    polymer.add_structures_from_tags(&tags);
}
