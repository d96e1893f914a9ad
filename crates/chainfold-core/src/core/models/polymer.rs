use super::ids::StructureId;
use super::monomer::{BackboneKind, Monomer};
use super::structure::{ProteinStructure, StructureAxis, StructureType, split_range};
use crate::core::utils::geometry::{best_fit_line, project_onto_axis};
use nalgebra::{Point3, Vector3};
use slotmap::SlotMap;
use std::f64::consts::FRAC_PI_2;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolymerError {
    #[error("a polymer requires at least one monomer")]
    Empty,
    #[error("monomer {index} has no lead atom")]
    MissingLeadAtom { index: usize },
}

/// An ordered, fixed-length chain of same-kind monomers.
///
/// The polymer owns its monomer array and the arena of structural spans
/// assigned to it. Index `i` always refers to the i-th residue along the
/// chain. Derived geometry (lead points, lead midpoints, wing vectors) is
/// computed lazily and invalidated on structural change.
#[derive(Debug, Clone)]
pub struct Polymer {
    kind: BackboneKind,
    monomers: Vec<Monomer>,
    structures: SlotMap<StructureId, ProteinStructure>,
    lead_points: Option<Vec<Point3<f64>>>,
    lead_midpoints: Option<Vec<Point3<f64>>>,
    wing_vectors: Option<Vec<Vector3<f64>>>,
}

impl Polymer {
    /// Creates a polymer over an ordered monomer chain.
    ///
    /// Every monomer must expose a lead atom; a residue without even a trace
    /// position cannot take part in the chain.
    ///
    /// # Errors
    ///
    /// Returns [`PolymerError::Empty`] for an empty chain and
    /// [`PolymerError::MissingLeadAtom`] naming the first offending residue.
    pub fn new(kind: BackboneKind, monomers: Vec<Monomer>) -> Result<Self, PolymerError> {
        if monomers.is_empty() {
            return Err(PolymerError::Empty);
        }
        if let Some(index) = monomers.iter().position(|m| m.lead().is_none()) {
            return Err(PolymerError::MissingLeadAtom { index });
        }
        Ok(Self {
            kind,
            monomers,
            structures: SlotMap::with_key(),
            lead_points: None,
            lead_midpoints: None,
            wing_vectors: None,
        })
    }

    pub fn kind(&self) -> BackboneKind {
        self.kind
    }

    pub fn monomer_count(&self) -> usize {
        self.monomers.len()
    }

    pub fn monomer(&self, index: usize) -> Option<&Monomer> {
        self.monomers.get(index)
    }

    pub(crate) fn monomer_mut(&mut self, index: usize) -> Option<&mut Monomer> {
        self.monomers.get_mut(index)
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    /// Retrieves a span by its arena key.
    pub fn structure(&self, id: StructureId) -> Option<&ProteinStructure> {
        self.structures.get(id)
    }

    /// Iterates over all spans of this polymer.
    pub fn structures(&self) -> impl Iterator<Item = (StructureId, &ProteinStructure)> {
        self.structures.iter()
    }

    pub fn structure_id_at(&self, index: usize) -> Option<StructureId> {
        self.monomers.get(index).and_then(|m| m.structure())
    }

    /// The span owning the monomer at `index`, if any.
    pub fn structure_at(&self, index: usize) -> Option<&ProteinStructure> {
        self.structure_id_at(index).and_then(|id| self.structures.get(id))
    }

    pub fn structure_type_at(&self, index: usize) -> StructureType {
        self.structure_at(index)
            .map(|ps| ps.structure_type())
            .unwrap_or_default()
    }

    pub fn is_helix(&self, index: usize) -> bool {
        self.structure_type_at(index).is_helix()
    }

    pub fn is_sheet(&self, index: usize) -> bool {
        self.structure_type_at(index).is_sheet()
    }

    // ------------------------------------------------------------------
    // derived geometry
    // ------------------------------------------------------------------

    /// Lead atom positions, one longer than the monomer count (the final
    /// entry repeats the terminator lead). Empty when a residue lacks
    /// coordinates.
    pub fn lead_points(&mut self) -> &[Point3<f64>] {
        self.ensure_derived();
        self.lead_points.as_deref().unwrap_or(&[])
    }

    /// Midpoints between consecutive lead atoms, one longer than the monomer
    /// count: entry 0 is the initiator lead, entry i the midpoint of leads
    /// i-1 and i, and the final entry the terminator lead.
    pub fn lead_midpoints(&mut self) -> &[Point3<f64>] {
        self.ensure_derived();
        self.lead_midpoints.as_deref().unwrap_or(&[])
    }

    /// Ribbon-orientation vectors, one longer than the monomer count.
    pub fn wing_vectors(&mut self) -> &[Vector3<f64>] {
        self.ensure_derived();
        self.wing_vectors.as_deref().unwrap_or(&[])
    }

    /// Drops all derived geometry and cached span axes. Call after mutating
    /// monomer coordinates.
    pub fn invalidate_derived(&mut self) {
        self.lead_points = None;
        self.lead_midpoints = None;
        self.wing_vectors = None;
        for ps in self.structures.values_mut() {
            ps.reset_axis();
        }
    }

    /// Replaces one backbone atom position and invalidates derived geometry.
    pub fn update_atom(
        &mut self,
        index: usize,
        role: super::monomer::AtomRole,
        position: Point3<f64>,
    ) {
        if let Some(m) = self.monomers.get_mut(index) {
            m.set_atom(role, position);
            self.invalidate_derived();
        }
    }

    fn ensure_derived(&mut self) {
        if self.lead_points.is_some() {
            return;
        }
        let n = self.monomers.len();
        let mut leads = Vec::with_capacity(n + 1);
        for m in &self.monomers {
            match m.lead() {
                Some(p) => leads.push(p),
                None => return,
            }
        }
        leads.push(leads[n - 1]);

        let mut mids = Vec::with_capacity(n + 1);
        mids.push(leads[0]);
        for i in 1..n {
            mids.push(Point3::from((leads[i - 1].coords + leads[i].coords) / 2.0));
        }
        mids.push(leads[n - 1]);

        let wings = self.calc_wing_vectors(&leads, &mids);

        self.lead_points = Some(leads);
        self.lead_midpoints = Some(mids);
        self.wing_vectors = Some(wings);
    }

    fn calc_wing_vectors(
        &self,
        leads: &[Point3<f64>],
        mids: &[Point3<f64>],
    ) -> Vec<Vector3<f64>> {
        let n = self.monomers.len();
        let mut wings = vec![Vector3::x(); n + 1];
        let has_wing_points = matches!(self.kind, BackboneKind::Amino | BackboneKind::Nucleic)
            && self.monomers.iter().all(|m| m.wing().is_some());

        if has_wing_points {
            let mut previous: Option<Vector3<f64>> = None;
            for i in 1..n {
                let Some(wing_point) = self.monomers[i - 1].wing() else {
                    continue;
                };
                let a = leads[i] - leads[i - 1];
                let b = leads[i - 1] - wing_point;
                let c = a.cross(&b);
                let mut d = a.cross(&c);
                let norm = d.norm();
                if norm > 1e-12 {
                    d /= norm;
                }
                if let Some(prev) = previous {
                    // suppress ribbon flips when the frame reverses
                    if prev.angle(&d) > FRAC_PI_2 {
                        d = -d;
                    }
                }
                wings[i] = d;
                previous = Some(d);
            }
        } else if n >= 3 {
            // wing vectors from the lead trace alone
            let mut previous: Option<Vector3<f64>> = None;
            for i in 1..n {
                let a = mids[i] - leads[i];
                let b = leads[i] - mids[i + 1];
                let mut c = if b.norm() < 1e-12 {
                    previous.unwrap_or_else(Vector3::x)
                } else {
                    a.cross(&b)
                };
                let norm = c.norm();
                if norm > 1e-12 {
                    c /= norm;
                }
                if let Some(prev) = previous {
                    if prev.angle(&c) > FRAC_PI_2 {
                        c = -c;
                    }
                }
                wings[i] = c;
                previous = Some(c);
            }
        }
        wings[0] = wings[1.min(n)];
        wings[n] = wings[n - 1];
        wings
    }

    // ------------------------------------------------------------------
    // span lifecycle
    // ------------------------------------------------------------------

    /// Detaches every monomer from its span and drops all spans.
    pub fn clear_structures(&mut self) {
        for m in &mut self.monomers {
            m.set_structure(None);
        }
        self.structures.clear();
    }

    /// Creates a typed span over the inclusive range `[first, last]`,
    /// reassigning every covered monomer. Monomers already owned by another
    /// span are detached from it first so spans never overlap.
    ///
    /// Returns `None` (with a warning) for an empty type or an invalid range.
    pub fn add_structure(
        &mut self,
        structure_type: StructureType,
        serial_id: usize,
        strand_count: usize,
        first: usize,
        last: usize,
    ) -> Option<StructureId> {
        if structure_type.is_none() {
            warn!("refusing to add a span with no structure type");
            return None;
        }
        if first > last || last >= self.monomers.len() {
            warn!(first, last, "invalid secondary-structure range");
            return None;
        }
        for i in first..=last {
            self.detach_monomer(i);
        }
        let id = self.structures.insert(ProteinStructure::new(
            structure_type,
            serial_id,
            strand_count,
            first,
            last,
        ));
        for i in first..=last {
            self.monomers[i].set_structure(Some(id));
        }
        Some(id)
    }

    /// Assigns a single monomer to the given structure type, extending an
    /// adjacent span of the same type when one touches `index`, otherwise
    /// opening a fresh single-residue span. `StructureType::None` detaches
    /// the monomer.
    pub fn set_structure_type(&mut self, index: usize, structure_type: StructureType) {
        if index >= self.monomers.len() {
            return;
        }
        if structure_type.is_none() {
            self.detach_monomer(index);
            return;
        }
        if let Some(id) = self.monomers[index].structure() {
            if self
                .structures
                .get(id)
                .is_some_and(|ps| ps.structure_type() == structure_type)
            {
                return;
            }
            self.detach_monomer(index);
        }
        if index > 0 {
            if let Some(id) = self.monomers[index - 1].structure() {
                if self
                    .structures
                    .get(id)
                    .is_some_and(|ps| ps.structure_type() == structure_type && ps.last() + 1 == index)
                {
                    if let Some(ps) = self.structures.get_mut(id) {
                        ps.add_monomer(index);
                    }
                    self.monomers[index].set_structure(Some(id));
                    return;
                }
            }
        }
        if index + 1 < self.monomers.len() {
            if let Some(id) = self.monomers[index + 1].structure() {
                if self
                    .structures
                    .get(id)
                    .is_some_and(|ps| ps.structure_type() == structure_type && ps.first() == index + 1)
                {
                    if let Some(ps) = self.structures.get_mut(id) {
                        ps.add_monomer(index);
                    }
                    self.monomers[index].set_structure(Some(id));
                    return;
                }
            }
        }
        let id = self
            .structures
            .insert(ProteinStructure::new(structure_type, 0, 0, index, index));
        self.monomers[index].set_structure(Some(id));
    }

    /// Removes the monomer at `index` from its span.
    ///
    /// Boundary removal shrinks the span by one. Interior removal truncates
    /// the span on the left of `index` and re-derives the right part by
    /// re-assigning the original type residue by residue, which rebuilds a
    /// fresh contiguous span covering `[index + 1, old last]`.
    pub fn remove_monomer_from_structure(&mut self, index: usize) {
        let Some(id) = self.monomers.get(index).and_then(|m| m.structure()) else {
            return;
        };
        let Some(ps) = self.structures.get(id) else {
            self.monomers[index].set_structure(None);
            return;
        };
        let (first, last, structure_type) = (ps.first(), ps.last(), ps.structure_type());
        self.monomers[index].set_structure(None);
        if !(first..=last).contains(&index) {
            return;
        }
        if first == last {
            self.structures.remove(id);
        } else if index == first {
            if let Some(ps) = self.structures.get_mut(id) {
                ps.set_first(index + 1);
            }
        } else if index == last {
            if let Some(ps) = self.structures.get_mut(id) {
                ps.set_last(index - 1);
            }
        } else {
            if let Some(ps) = self.structures.get_mut(id) {
                ps.set_last(index - 1);
            }
            for i in index + 1..=last {
                self.monomers[i].set_structure(None);
            }
            for i in index + 1..=last {
                self.set_structure_type(i, structure_type);
            }
        }
    }

    /// Minimal structural detach of one monomer: shrinks or splits the owning
    /// span without retyping (interior detach leaves a right-hand span of the
    /// same type and serial).
    fn detach_monomer(&mut self, index: usize) {
        let Some(id) = self.monomers[index].structure() else {
            return;
        };
        self.monomers[index].set_structure(None);
        let Some(ps) = self.structures.get(id) else {
            return;
        };
        let (first, last) = (ps.first(), ps.last());
        match split_range(first, last, index) {
            (None, None) => {
                self.structures.remove(id);
            }
            (Some((f, l)), None) => {
                if let Some(ps) = self.structures.get_mut(id) {
                    ps.set_first(f);
                    ps.set_last(l);
                }
            }
            (None, Some((f, l))) => {
                if let Some(ps) = self.structures.get_mut(id) {
                    ps.set_first(f);
                    ps.set_last(l);
                }
            }
            (Some((lf, ll)), Some((rf, rl))) => {
                let Some(ps) = self.structures.get_mut(id) else {
                    return;
                };
                let (structure_type, serial_id, strand_count) =
                    (ps.structure_type(), ps.serial_id(), ps.strand_count());
                ps.set_first(lf);
                ps.set_last(ll);
                let right = self.structures.insert(ProteinStructure::new(
                    structure_type,
                    serial_id,
                    strand_count,
                    rf,
                    rl,
                ));
                for i in rf..=rl {
                    self.monomers[i].set_structure(Some(right));
                }
            }
        }
    }

    /// Builds one span per maximal run of equal non-`None` tags.
    pub(crate) fn add_structures_from_tags(&mut self, tags: &[StructureType]) {
        let count = tags.len().min(self.monomers.len());
        let mut i = 0;
        while i < count {
            let tag = tags[i];
            if tag.is_none() {
                i += 1;
                continue;
            }
            let mut i_max = i + 1;
            while i_max < count && tags[i_max] == tag {
                i_max += 1;
            }
            self.add_structure(tag, 0, 0, i, i_max - 1);
            i = i_max;
        }
    }

    // ------------------------------------------------------------------
    // span geometry
    // ------------------------------------------------------------------

    /// The geometric axis of a span, computed on first access and cached
    /// until the span or the coordinates change.
    pub fn axis(&mut self, id: StructureId) -> Option<StructureAxis> {
        self.ensure_derived();
        let (structure_type, first, last, cached) = {
            let ps = self.structures.get(id)?;
            (ps.structure_type(), ps.first(), ps.last(), ps.axis())
        };
        if let Some(axis) = cached {
            return Some(axis);
        }
        let axis = if structure_type.is_helix() {
            self.helix_axis(first, last)
        } else if structure_type.is_sheet() {
            self.sheet_axis(first, last)
        } else {
            self.span_axis(first, last)
        }?;
        if let Some(ps) = self.structures.get_mut(id) {
            ps.set_axis(axis);
        }
        Some(axis)
    }

    fn helix_axis(&self, first: usize, last: usize) -> Option<StructureAxis> {
        let mids = self.lead_midpoints.as_deref()?;
        let count = last - first + 1;
        let points = mids.get(first..=first + count)?;
        let (origin, mut unit) = best_fit_line(points, 4)?;
        let start = project_onto_axis(&points[0], &origin, &unit);
        let end = project_onto_axis(&points[count], &origin, &unit);
        if (end - start).dot(&unit) < 0.0 {
            unit = -unit;
        }
        Some(StructureAxis {
            start,
            end,
            unit_vector: unit,
        })
    }

    fn sheet_axis(&self, first: usize, last: usize) -> Option<StructureAxis> {
        let leads = self.lead_points.as_deref()?;
        let mids = self.lead_midpoints.as_deref()?;
        let n_res = last - first + 1;
        if n_res == 2 {
            let a = *leads.get(first)?;
            let b = *leads.get(first + 1)?;
            let v = b - a;
            let norm = v.norm();
            if norm < 1e-12 {
                return None;
            }
            return Some(StructureAxis {
                start: a,
                end: b,
                unit_vector: v / norm,
            });
        }
        let a = *mids.get(first + 1)?;
        let b = *mids.get(first + n_res - 1)?;
        let v = b - a;
        let norm = v.norm();
        if norm < 1e-12 {
            return None;
        }
        let unit = v / norm;
        let mut start = *leads.get(first)?;
        if !self.neighbor_is_helix_or_sheet(first, -1) {
            start = project_onto_axis(&start, &a, &unit);
        }
        let mut end = *leads.get(last)?;
        if !self.neighbor_is_helix_or_sheet(last, 1) {
            end = project_onto_axis(&end, &a, &unit);
        }
        Some(StructureAxis {
            start,
            end,
            unit_vector: unit,
        })
    }

    fn span_axis(&self, first: usize, last: usize) -> Option<StructureAxis> {
        let mids = self.lead_midpoints.as_deref()?;
        let a = *mids.get(first)?;
        let b = *mids.get(last + 1)?;
        let v = b - a;
        let norm = v.norm();
        if norm < 1e-12 {
            return None;
        }
        Some(StructureAxis {
            start: a,
            end: b,
            unit_vector: v / norm,
        })
    }

    fn neighbor_is_helix_or_sheet(&self, index: usize, direction: isize) -> bool {
        let Some(neighbor) = index.checked_add_signed(direction) else {
            return false;
        };
        if neighbor >= self.monomers.len() {
            return false;
        }
        let t = self.structure_type_at(neighbor);
        t.is_helix() || t.is_sheet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::monomer::AtomRole;
    use std::collections::HashSet;

    fn alpha_trace(points: &[Point3<f64>]) -> Polymer {
        let monomers = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Monomer::new('A', i as isize + 1, "ALA").with_atom(AtomRole::AlphaCarbon, *p)
            })
            .collect();
        Polymer::new(BackboneKind::AlphaOnly, monomers).unwrap()
    }

    fn line_trace(n: usize) -> Polymer {
        let points: Vec<Point3<f64>> = (0..n)
            .map(|i| Point3::new(i as f64 * 3.8, 0.0, 0.0))
            .collect();
        alpha_trace(&points)
    }

    fn helix_trace(n: usize) -> Polymer {
        let points: Vec<Point3<f64>> = (0..n)
            .map(|i| {
                let theta = (i as f64) * 100.0_f64.to_radians();
                Point3::new(2.3 * theta.cos(), 2.3 * theta.sin(), 1.5 * i as f64)
            })
            .collect();
        alpha_trace(&points)
    }

    fn assert_spans_consistent(polymer: &Polymer) {
        let mut covered = HashSet::new();
        for (id, ps) in polymer.structures() {
            for i in ps.first()..=ps.last() {
                assert!(covered.insert(i), "spans overlap at monomer {i}");
                assert_eq!(polymer.structure_id_at(i), Some(id));
            }
        }
        for i in 0..polymer.monomer_count() {
            if let Some(id) = polymer.structure_id_at(i) {
                let ps = polymer.structure(id).unwrap();
                assert!(ps.contains(i));
            }
        }
    }

    #[test]
    fn new_rejects_empty_chain() {
        assert_eq!(
            Polymer::new(BackboneKind::AlphaOnly, Vec::new()).unwrap_err(),
            PolymerError::Empty
        );
    }

    #[test]
    fn new_rejects_monomer_without_lead() {
        let monomers = vec![
            Monomer::new('A', 1, "ALA").with_atom(AtomRole::AlphaCarbon, Point3::origin()),
            Monomer::new('A', 2, "GLY"),
        ];
        assert_eq!(
            Polymer::new(BackboneKind::AlphaOnly, monomers).unwrap_err(),
            PolymerError::MissingLeadAtom { index: 1 }
        );
    }

    #[test]
    fn lead_midpoints_have_initiator_and_terminator_endpoints() {
        let mut polymer = line_trace(4);
        let mids = polymer.lead_midpoints().to_vec();
        assert_eq!(mids.len(), 5);
        assert_eq!(mids[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mids[1], Point3::new(1.9, 0.0, 0.0));
        assert_eq!(mids[4], Point3::new(11.4, 0.0, 0.0));
    }

    #[test]
    fn wing_vectors_have_expected_length() {
        let mut polymer = helix_trace(6);
        assert_eq!(polymer.wing_vectors().len(), 7);
    }

    #[test]
    fn add_structure_assigns_monomers_and_reports_type() {
        let mut polymer = line_trace(8);
        let id = polymer
            .add_structure(StructureType::Helix, 1, 0, 2, 5)
            .unwrap();
        assert_eq!(polymer.structure(id).unwrap().monomer_count(), 4);
        assert!(polymer.is_helix(3));
        assert!(!polymer.is_helix(1));
        assert_eq!(polymer.structure_type_at(6), StructureType::None);
        assert_spans_consistent(&polymer);
    }

    #[test]
    fn add_structure_rejects_invalid_ranges() {
        let mut polymer = line_trace(4);
        assert!(polymer.add_structure(StructureType::Helix, 0, 0, 3, 2).is_none());
        assert!(polymer.add_structure(StructureType::Helix, 0, 0, 0, 4).is_none());
        assert!(polymer.add_structure(StructureType::None, 0, 0, 0, 2).is_none());
    }

    #[test]
    fn add_structure_over_existing_span_keeps_spans_disjoint() {
        let mut polymer = line_trace(10);
        polymer.add_structure(StructureType::Helix, 0, 0, 0, 6).unwrap();
        polymer.add_structure(StructureType::Sheet, 0, 0, 3, 4).unwrap();
        assert_spans_consistent(&polymer);
        assert!(polymer.is_helix(2));
        assert!(polymer.is_sheet(3));
        assert!(polymer.is_helix(5));
    }

    #[test]
    fn remove_at_span_boundary_shrinks_span() {
        let mut polymer = line_trace(8);
        let id = polymer
            .add_structure(StructureType::Sheet, 0, 0, 2, 5)
            .unwrap();
        polymer.remove_monomer_from_structure(2);
        assert_eq!(polymer.structure(id).unwrap().first(), 3);
        polymer.remove_monomer_from_structure(5);
        assert_eq!(polymer.structure(id).unwrap().last(), 4);
        assert_spans_consistent(&polymer);
    }

    #[test]
    fn remove_last_monomer_drops_span() {
        let mut polymer = line_trace(4);
        let id = polymer
            .add_structure(StructureType::Turn, 0, 0, 1, 1)
            .unwrap();
        polymer.remove_monomer_from_structure(1);
        assert!(polymer.structure(id).is_none());
        assert!(polymer.structure_id_at(1).is_none());
    }

    #[test]
    fn remove_at_interior_index_splits_into_two_spans_of_same_type() {
        let mut polymer = line_trace(10);
        polymer.add_structure(StructureType::Helix, 0, 0, 1, 8).unwrap();
        polymer.remove_monomer_from_structure(4);

        assert!(polymer.structure_id_at(4).is_none());
        let covered: Vec<usize> = (0..10)
            .filter(|&i| polymer.structure_id_at(i).is_some())
            .collect();
        assert_eq!(covered, vec![1, 2, 3, 5, 6, 7, 8]);

        let left = polymer.structure_at(1).unwrap();
        assert_eq!((left.first(), left.last()), (1, 3));
        assert_eq!(left.structure_type(), StructureType::Helix);

        let right = polymer.structure_at(5).unwrap();
        assert_eq!((right.first(), right.last()), (5, 8));
        assert_eq!(right.structure_type(), StructureType::Helix);

        assert_ne!(
            polymer.structure_id_at(1).unwrap(),
            polymer.structure_id_at(5).unwrap()
        );
        assert_spans_consistent(&polymer);
    }

    #[test]
    fn set_structure_type_merges_with_adjacent_run() {
        let mut polymer = line_trace(6);
        polymer.set_structure_type(2, StructureType::Turn);
        polymer.set_structure_type(3, StructureType::Turn);
        polymer.set_structure_type(4, StructureType::Turn);
        let ps = polymer.structure_at(2).unwrap();
        assert_eq!((ps.first(), ps.last()), (2, 4));
        assert_eq!(polymer.structures().count(), 1);
        assert_spans_consistent(&polymer);
    }

    #[test]
    fn set_structure_type_none_detaches_monomer() {
        let mut polymer = line_trace(6);
        polymer.add_structure(StructureType::Helix, 0, 0, 0, 3).unwrap();
        polymer.set_structure_type(3, StructureType::None);
        assert!(polymer.structure_id_at(3).is_none());
        assert_eq!(polymer.structure_at(0).unwrap().last(), 2);
        assert_spans_consistent(&polymer);
    }

    #[test]
    fn clear_structures_detaches_everything() {
        let mut polymer = line_trace(6);
        polymer.add_structure(StructureType::Helix, 0, 0, 0, 2).unwrap();
        polymer.add_structure(StructureType::Sheet, 0, 0, 3, 5).unwrap();
        polymer.clear_structures();
        assert_eq!(polymer.structures().count(), 0);
        assert!((0..6).all(|i| polymer.structure_id_at(i).is_none()));
    }

    #[test]
    fn two_residue_sheet_axis_uses_raw_lead_points() {
        let mut polymer = line_trace(4);
        let id = polymer
            .add_structure(StructureType::Sheet, 0, 0, 1, 2)
            .unwrap();
        let axis = polymer.axis(id).unwrap();
        assert_eq!(axis.start, Point3::new(3.8, 0.0, 0.0));
        assert_eq!(axis.end, Point3::new(7.6, 0.0, 0.0));
        assert!((axis.unit_vector - Vector3::x()).norm() < 1e-9);
    }

    #[test]
    fn helix_axis_follows_helical_trace_direction() {
        let mut polymer = helix_trace(10);
        let id = polymer
            .add_structure(StructureType::Helix, 0, 0, 0, 9)
            .unwrap();
        let axis = polymer.axis(id).unwrap();
        assert!(axis.unit_vector.z.abs() > 0.99);
        assert!(axis.end.z > axis.start.z);
    }

    #[test]
    fn update_atom_invalidates_derived_geometry() {
        let mut polymer = line_trace(4);
        assert_eq!(polymer.lead_points()[0], Point3::new(0.0, 0.0, 0.0));
        polymer.update_atom(0, AtomRole::AlphaCarbon, Point3::new(0.0, 5.0, 0.0));
        assert_eq!(polymer.lead_points()[0], Point3::new(0.0, 5.0, 0.0));
        assert_eq!(polymer.lead_midpoints()[1], Point3::new(1.9, 2.5, 0.0));
    }

    #[test]
    fn axis_is_cached_until_span_changes() {
        let mut polymer = helix_trace(8);
        let id = polymer
            .add_structure(StructureType::Helix, 0, 0, 0, 7)
            .unwrap();
        let first = polymer.axis(id).unwrap();
        let second = polymer.axis(id).unwrap();
        assert_eq!(first, second);
        polymer.remove_monomer_from_structure(7);
        assert!(polymer.structure(id).unwrap().axis().is_none());
    }
}
