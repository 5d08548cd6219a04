//! Constraint functions of a study for one apex.

use super::types::{BoundaryVertexPosition, PathEdge, StudyError};
use super::PathStudy;
use crate::geometry::{Apex, Offset, PathGeometryRing, Scalar};

/// Signed side tests against the spine direction.
///
/// `eval(l, r)` is the dot product of the spine total with the left-hand
/// normal of the vector from left vertex `l` to right vertex `r`. All
/// values carry the ring's common denominator (a positive factor), so
/// signs and zero sets are those of the true geometric quantity.
#[derive(Debug)]
pub struct ConstraintFunctions<'a, T> {
    study: &'a PathStudy,
    geometry: PathGeometryRing<T>,
    spine_total: Offset<T>,
}

impl<'a, T: Scalar> ConstraintFunctions<'a, T> {
    pub fn spine_total(&self) -> &Offset<T> {
        &self.spine_total
    }

    pub fn geometry(&self) -> &PathGeometryRing<T> {
        &self.geometry
    }

    pub fn eval(&self, left_index: usize, right_index: usize) -> Result<T, StudyError> {
        self.eval_between(
            BoundaryVertexPosition::left(left_index),
            BoundaryVertexPosition::right(right_index),
        )
    }

    /// Same as `eval` for any two boundary positions. Zero when `from == to`.
    pub fn eval_between(
        &self,
        from: BoundaryVertexPosition,
        to: BoundaryVertexPosition,
    ) -> Result<T, StudyError> {
        let route = self.study.spine_path(from, to)?;
        let total = sum_offsets(&self.geometry, &route)?;
        Ok(total.quarter_turn().dot(&self.spine_total))
    }
}

fn sum_offsets<T: Scalar>(
    geometry: &PathGeometryRing<T>,
    edges: &[PathEdge],
) -> Result<Offset<T>, StudyError> {
    edges
        .iter()
        .try_fold(Offset::zero(), |acc, edge| -> Result<Offset<T>, StudyError> {
            Ok(acc + geometry.offset_for_edge_vector(&edge.edge_vector)?)
        })
}

impl PathStudy {
    /// Constraint functions for `apex`, over whatever scalar the apex uses.
    ///
    /// With `Apex<Polynomial>` at `(x, y)` the results are the constraint
    /// polynomials; with exact or floating coordinates, their values.
    pub fn constraint_functions<T: Scalar>(
        &self,
        apex: &Apex<T>,
    ) -> Result<ConstraintFunctions<'_, T>, StudyError> {
        let geometry = PathGeometryRing::new(apex, self.max_angles);
        let spine_total = self.spine_offsets(&geometry)?.into_iter().sum();
        Ok(ConstraintFunctions {
            study: self,
            geometry,
            spine_total,
        })
    }

    /// Offset of each spine edge, carrying the ring's denominator.
    pub fn spine_offsets<T: Scalar>(
        &self,
        geometry: &PathGeometryRing<T>,
    ) -> Result<Vec<Offset<T>>, StudyError> {
        self.spine_edges
            .iter()
            .map(|&id| -> Result<Offset<T>, StudyError> {
                Ok(geometry.offset_for_edge_vector(&self.edge(id).edge_vector)?)
            })
            .collect()
    }
}
