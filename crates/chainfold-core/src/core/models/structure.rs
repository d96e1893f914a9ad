use crate::core::utils::identifiers::pdb_helix_class_name;
use nalgebra::{Point3, Vector3};

/// The structural category assigned to a residue or span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StructureType {
    /// No secondary structure.
    #[default]
    None,
    /// Helix of unspecified subtype.
    Helix,
    /// Alpha helix.
    HelixAlpha,
    /// 3-10 helix.
    Helix310,
    /// Pi helix.
    HelixPi,
    /// Beta sheet strand.
    Sheet,
    /// Turn.
    Turn,
}

impl StructureType {
    pub fn is_helix(self) -> bool {
        matches!(
            self,
            StructureType::Helix
                | StructureType::HelixAlpha
                | StructureType::Helix310
                | StructureType::HelixPi
        )
    }

    pub fn is_sheet(self) -> bool {
        self == StructureType::Sheet
    }

    pub fn is_turn(self) -> bool {
        self == StructureType::Turn
    }

    pub fn is_none(self) -> bool {
        self == StructureType::None
    }

    /// Maps a PDB HELIX record class number to a helix subtype.
    ///
    /// Classes without a recognized subtype map to the generic helix so that
    /// annotation ingestion never loses a span.
    pub fn from_pdb_helix_class(class: u8) -> StructureType {
        match pdb_helix_class_name(class) {
            Some("alpha") => StructureType::HelixAlpha,
            Some("pi") => StructureType::HelixPi,
            Some("3-10") => StructureType::Helix310,
            _ => StructureType::Helix,
        }
    }
}

/// The geometric axis of a structural span, for ribbon/cartoon rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureAxis {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub unit_vector: Vector3<f64>,
}

/// A typed, contiguous span of monomer indices within one polymer.
///
/// The span stores index ranges into the owning polymer's monomer array, not
/// references; monomers point back via an arena key. Both endpoints are
/// inclusive and `first <= last` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinStructure {
    structure_type: StructureType,
    serial_id: usize,
    strand_count: usize,
    first: usize,
    last: usize,
    axis: Option<StructureAxis>,
}

impl ProteinStructure {
    pub(crate) fn new(
        structure_type: StructureType,
        serial_id: usize,
        strand_count: usize,
        first: usize,
        last: usize,
    ) -> Self {
        Self {
            structure_type,
            serial_id,
            strand_count,
            first,
            last,
            axis: None,
        }
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure_type
    }

    /// Serial id carried over from the source annotation, or 0 when the span
    /// was derived by classification.
    pub fn serial_id(&self) -> usize {
        self.serial_id
    }

    /// Number of strands for sheet annotations; 0 otherwise.
    pub fn strand_count(&self) -> usize {
        self.strand_count
    }

    /// First monomer index of the span (inclusive).
    pub fn first(&self) -> usize {
        self.first
    }

    /// Last monomer index of the span (inclusive).
    pub fn last(&self) -> usize {
        self.last
    }

    pub fn monomer_count(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    /// Extends the span to include `index`, invalidating the cached axis.
    pub(crate) fn add_monomer(&mut self, index: usize) {
        self.reset_axis();
        self.first = self.first.min(index);
        self.last = self.last.max(index);
    }

    pub(crate) fn set_first(&mut self, first: usize) {
        self.reset_axis();
        self.first = first;
    }

    pub(crate) fn set_last(&mut self, last: usize) {
        self.reset_axis();
        self.last = last;
    }

    pub(crate) fn axis(&self) -> Option<StructureAxis> {
        self.axis
    }

    pub(crate) fn set_axis(&mut self, axis: StructureAxis) {
        self.axis = Some(axis);
    }

    pub(crate) fn reset_axis(&mut self) {
        self.axis = None;
    }
}

/// Splits the inclusive index range `[first, last]` around a removed index.
///
/// Returns the sub-ranges to the left and right of `removed`; either side is
/// `None` when the removed index sits on that boundary. A removed index
/// outside the range leaves it intact on the left side.
pub fn split_range(
    first: usize,
    last: usize,
    removed: usize,
) -> (Option<(usize, usize)>, Option<(usize, usize)>) {
    if removed < first || removed > last {
        return (Some((first, last)), None);
    }
    let left = (removed > first).then(|| (first, removed - 1));
    let right = (removed < last).then(|| (removed + 1, last));
    (left, right)
}
