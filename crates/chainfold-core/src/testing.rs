//! Synthetic backbone geometry for unit tests.
//!
//! Residues are grown atom by atom from internal coordinates (bond length,
//! bond angle, dihedral), so a requested phi/psi sequence round-trips
//! exactly through the engine's dihedral computation.

use crate::core::models::monomer::{AtomRole, Monomer};
use nalgebra::Point3;

const BOND_N_CA: f64 = 1.458;
const BOND_CA_C: f64 = 1.525;
const BOND_C_N: f64 = 1.329;
const BOND_C_O: f64 = 1.231;
const ANGLE_N_CA_C: f64 = 111.2;
const ANGLE_CA_C_N: f64 = 116.2;
const ANGLE_C_N_CA: f64 = 121.7;
const ANGLE_CA_C_O: f64 = 121.0;

/// Places atom `d` bonded to `c` with the given bond length, bond angle
/// b-c-d, and dihedral a-b-c-d (degrees, engine sign convention).
pub(crate) fn place_atom(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    bond: f64,
    angle_deg: f64,
    dihedral_deg: f64,
) -> Point3<f64> {
    let bc = (c - b).normalize();
    let n = (b - a).cross(&bc).normalize();
    let m = n.cross(&bc);
    let ang = angle_deg.to_radians();
    let dih = dihedral_deg.to_radians();
    c + bc * (-bond * ang.cos())
        + m * (bond * ang.sin() * dih.cos())
        + n * (bond * ang.sin() * dih.sin())
}

/// Builds a poly-alanine backbone realizing the given per-residue
/// (phi, psi) targets, with trans peptide bonds and carbonyl oxygens.
/// The first residue's phi target is unused (undefined at the terminus).
pub(crate) fn build_backbone(phi_psi: &[(f64, f64)]) -> Vec<Monomer> {
    let n_res = phi_psi.len();
    let mut monomers = Vec::with_capacity(n_res);

    let mut n_pos = Point3::new(0.0, 0.0, 0.0);
    let mut ca_pos = Point3::new(BOND_N_CA, 0.0, 0.0);
    let mut c_pos = place_atom(
        &Point3::new(0.0, 1.0, 0.0),
        &n_pos,
        &ca_pos,
        BOND_CA_C,
        ANGLE_N_CA_C,
        60.0,
    );

    for i in 0..n_res {
        let psi = phi_psi[i].1;
        let o_pos = place_atom(&n_pos, &ca_pos, &c_pos, BOND_C_O, ANGLE_CA_C_O, psi + 180.0);
        monomers.push(
            Monomer::new('A', i as isize + 1, "ALA")
                .with_atom(AtomRole::Nitrogen, n_pos)
                .with_atom(AtomRole::AlphaCarbon, ca_pos)
                .with_atom(AtomRole::CarbonylCarbon, c_pos)
                .with_atom(AtomRole::CarbonylOxygen, o_pos),
        );
        if i + 1 < n_res {
            let n_next = place_atom(&n_pos, &ca_pos, &c_pos, BOND_C_N, ANGLE_CA_C_N, psi);
            let ca_next = place_atom(&ca_pos, &c_pos, &n_next, BOND_N_CA, ANGLE_C_N_CA, 180.0);
            let c_next = place_atom(
                &c_pos,
                &n_next,
                &ca_next,
                BOND_CA_C,
                ANGLE_N_CA_C,
                phi_psi[i + 1].0,
            );
            n_pos = n_next;
            ca_pos = ca_next;
            c_pos = c_next;
        }
    }
    monomers
}

pub(crate) fn repeated_phi_psi(phi: f64, psi: f64, n: usize) -> Vec<(f64, f64)> {
    vec![(phi, psi); n]
}
