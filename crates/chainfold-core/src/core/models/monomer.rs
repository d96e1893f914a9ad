use super::ids::StructureId;
use crate::core::utils::identifiers::is_secondary_amine;
use nalgebra::Point3;

/// Identifies the backbone family of a polymer.
///
/// This tag replaces subclassing: every monomer in a polymer shares one kind,
/// and the classification engine dispatches on it. Nucleic and phosphorus
/// chains are carried for completeness (they have lead and wing atoms and can
/// be traced), but secondary-structure classification is defined only for the
/// protein kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackboneKind {
    /// Alpha-carbon-only protein backbone (no N/C/O atoms available).
    AlphaOnly,
    /// Full amino-acid backbone (N, CA, C and usually O).
    Amino,
    /// Nucleic-acid backbone traced by C4' or P.
    Nucleic,
    /// Phosphorus-only nucleic trace.
    Phosphorus,
}

/// Role index for the backbone atoms a monomer exposes.
///
/// Roles decouple the engine from atom naming: the chain-construction
/// collaborator resolves names ("CA", "N", ...) and bonding, and registers
/// positions under these roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomRole {
    /// Explicit lead (trace) atom; falls back to the alpha carbon.
    Lead,
    /// Backbone amide nitrogen.
    Nitrogen,
    /// Alpha carbon.
    AlphaCarbon,
    /// Carbonyl carbon.
    CarbonylCarbon,
    /// Carbonyl oxygen.
    CarbonylOxygen,
    /// Explicit amide hydrogen bonded to the backbone nitrogen, if the
    /// source model resolved one.
    AmideHydrogen,
    /// Explicit wing (ribbon-orientation) atom; falls back to the carbonyl
    /// oxygen.
    Wing,
}

/// A single residue within a biopolymer chain.
///
/// Identity (chain id, sequence number, name) is immutable after
/// construction. The only state this engine mutates is the back-reference to
/// the owning structural span and the cached Ramachandran angles, which are
/// written during a classification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Monomer {
    /// Single-character identifier of the parent chain.
    pub chain_id: char,
    /// Residue sequence number from the source model.
    pub seq_number: isize,
    /// Residue name (e.g. "ALA", "PRO").
    pub name: String,
    atoms: Vec<(AtomRole, Point3<f64>)>,
    structure: Option<StructureId>,
    phi: f64,
    psi: f64,
    omega: f64,
}

impl Monomer {
    /// Creates a monomer with no registered atoms.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - Single-character identifier of the parent chain.
    /// * `seq_number` - Residue sequence number.
    /// * `name` - Residue name.
    pub fn new(chain_id: char, seq_number: isize, name: &str) -> Self {
        Self {
            chain_id,
            seq_number,
            name: name.to_string(),
            atoms: Vec::new(),
            structure: None,
            phi: f64::NAN,
            psi: f64::NAN,
            omega: f64::NAN,
        }
    }

    /// Registers (or replaces) the position of a backbone atom role.
    pub fn set_atom(&mut self, role: AtomRole, position: Point3<f64>) {
        if let Some(entry) = self.atoms.iter_mut().find(|(r, _)| *r == role) {
            entry.1 = position;
        } else {
            self.atoms.push((role, position));
        }
    }

    /// Builder-style variant of [`set_atom`](Self::set_atom).
    pub fn with_atom(mut self, role: AtomRole, position: Point3<f64>) -> Self {
        self.set_atom(role, position);
        self
    }

    /// Returns the position registered for a role, if any.
    pub fn atom(&self, role: AtomRole) -> Option<Point3<f64>> {
        self.atoms
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, p)| *p)
    }

    /// The lead (trace) atom position: the explicit lead if registered,
    /// otherwise the alpha carbon.
    pub fn lead(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::Lead).or_else(|| self.atom(AtomRole::AlphaCarbon))
    }

    pub fn nitrogen(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::Nitrogen)
    }

    pub fn alpha_carbon(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::AlphaCarbon)
    }

    pub fn carbonyl_carbon(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::CarbonylCarbon)
    }

    pub fn carbonyl_oxygen(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::CarbonylOxygen)
    }

    /// An explicit amide hydrogen resolved by the chain builder, if any.
    pub fn amide_hydrogen(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::AmideHydrogen)
    }

    /// The wing atom position used to orient ribbon geometry: the explicit
    /// wing if registered, otherwise the carbonyl oxygen.
    pub fn wing(&self) -> Option<Point3<f64>> {
        self.atom(AtomRole::Wing).or_else(|| self.atom(AtomRole::CarbonylOxygen))
    }

    /// Whether the monomer carries the N, CA and C atoms required for
    /// dihedral-angle computation.
    pub fn has_full_backbone(&self) -> bool {
        self.nitrogen().is_some()
            && self.alpha_carbon().is_some()
            && self.carbonyl_carbon().is_some()
    }

    /// Whether this residue can donate a backbone N-H hydrogen bond.
    /// Secondary-amine residues (proline and friends) cannot.
    pub fn is_amide_donor(&self) -> bool {
        self.nitrogen().is_some() && !is_secondary_amine(&self.name)
    }

    /// The structural span this monomer is currently assigned to.
    pub fn structure(&self) -> Option<StructureId> {
        self.structure
    }

    pub(crate) fn set_structure(&mut self, structure: Option<StructureId>) {
        self.structure = structure;
    }

    /// Backbone phi dihedral in degrees; NaN until computed or at the chain
    /// start.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Backbone psi dihedral in degrees; NaN until computed or at the chain
    /// end.
    pub fn psi(&self) -> f64 {
        self.psi
    }

    /// Peptide-bond omega dihedral in degrees; NaN until computed or at the
    /// chain end.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub(crate) fn set_phi(&mut self, phi: f64) {
        self.phi = phi;
    }

    pub(crate) fn set_psi(&mut self, psi: f64) {
        self.psi = psi;
    }

    pub(crate) fn set_omega(&mut self, omega: f64) {
        self.omega = omega;
    }

    pub(crate) fn reset_angles(&mut self) {
        self.phi = f64::NAN;
        self.psi = f64::NAN;
        self.omega = f64::NAN;
    }
}
