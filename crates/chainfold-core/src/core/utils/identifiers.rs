use phf::{Map, Set, phf_map, phf_set};

static SECONDARY_AMINE_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "PRO", "HYP", "PCA", "DPR",
};

// PDB HELIX record classes (columns 39-40) mapped to helix subtypes.
static PDB_HELIX_CLASSES: Map<u8, &'static str> = phf_map! {
    1u8 => "alpha",
    3u8 => "pi",
    5u8 => "3-10",
};

/// Returns whether the named residue has a secondary (ring) amine nitrogen
/// and therefore carries no amide hydrogen to donate.
pub fn is_secondary_amine(residue_name: &str) -> bool {
    SECONDARY_AMINE_RESIDUE_NAMES.contains(residue_name.trim())
}

pub(crate) fn pdb_helix_class_name(class: u8) -> Option<&'static str> {
    PDB_HELIX_CLASSES.get(&class).copied()
}
