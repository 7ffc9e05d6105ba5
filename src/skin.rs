//! Procedural skin weights for a segmented bone chain.
//!
//! A mesh standing on the Y axis is bound to a linear chain of
//! `segment_count + 1` bones spaced `segment_height` apart. Each vertex is
//! influenced by the two bones bounding the segment it sits in, blended by
//! how far up the segment it is.
//!
//! ```
//! use bonechain::{Vec3, compute_skin_binding};
//!
//! // Chain of three unit segments, mesh centered on the origin.
//! let positions = [Vec3::new(0.0, -1.5, 0.0), Vec3::ZERO, Vec3::new(0.0, 1.5, 0.0)];
//! let binding = compute_skin_binding(&positions, 1.5, 1.0, 3).unwrap();
//!
//! let (indices, weights) = binding.influences(1);
//! assert_eq!(indices.x, 1);
//! assert_eq!(weights.x, 0.5);
//! ```

use crate::error::SkinError;
use crate::geometry::RawGeometry;
use crate::mesh::SkinnedVertex;
use glam::{DVec4, IVec4, Vec3};

/// How many `f32` ulps of the shifted coordinate a vertex may sit from a
/// bone and still snap onto it. Positions are `f32`, so anything closer is
/// rounding noise.
const SNAP_ULPS: f64 = 4.0;

/// Per-vertex skin indices and weights in the 4-influence layout.
///
/// Both buffers are positionally aligned with the vertex buffer the binding
/// was computed from. Only the first two slots are ever active.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinBinding {
    indices: Vec<IVec4>,
    weights: Vec<DVec4>,
}

/// Computes the skin binding for a mesh spanning a segmented bone chain.
///
/// Each vertex's Y is shifted by `half_height` into chain space, then
/// `floor(y / segment_height)` picks the lower bone and the fractional part
/// of the same quotient blends toward the next one. Vertices within
/// a few `f32` ulps of a bone snap onto it, so segment boundaries and the
/// chain tip bind fully to a single bone. Vertices outside the chain are not clamped
/// and extrapolate to bone indices outside `0..=segment_count`; use
/// [`SkinBinding::validate_against`] to check a binding against a skeleton.
///
/// # Errors
///
/// Fails when `segment_height` is not a positive finite number,
/// `segment_count` is zero, `half_height` is not finite, or `positions`
/// is empty.
pub fn compute_skin_binding(
    positions: &[Vec3],
    half_height: f64,
    segment_height: f64,
    segment_count: u32,
) -> Result<SkinBinding, SkinError> {
    if !segment_height.is_finite() || segment_height <= 0.0 {
        return Err(SkinError::InvalidSegmentHeight(segment_height));
    }
    if segment_count == 0 {
        return Err(SkinError::InvalidSegmentCount);
    }
    if !half_height.is_finite() {
        return Err(SkinError::InvalidHalfHeight(half_height));
    }
    if positions.is_empty() {
        return Err(SkinError::EmptyMesh);
    }

    let mut indices = vec![IVec4::ZERO; positions.len()];
    let mut weights = vec![DVec4::ZERO; positions.len()];

    for ((position, index), weight) in positions.iter().zip(&mut indices).zip(&mut weights) {
        let y = f64::from(position.y);
        let t = (y + half_height) / segment_height;
        let tolerance =
            SNAP_ULPS * f64::from(f32::EPSILON) * (y.abs() + half_height.abs()) / segment_height;

        // Index and blend come from the same quotient so they always agree.
        let near = t.round();
        let t = if (t - near).abs() <= tolerance { near } else { t };
        let bone = t.floor();
        let blend = t - bone;
        let bone = bone as i32;

        *index = IVec4::new(bone, bone + 1, 0, 0);
        *weight = DVec4::new(1.0 - blend, blend, 0.0, 0.0);
    }

    tracing::debug!(
        vertices = positions.len(),
        segment_count,
        segment_height,
        "Computed skin binding"
    );

    Ok(SkinBinding { indices, weights })
}

impl SkinBinding {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[IVec4] {
        &self.indices
    }

    pub fn weights(&self) -> &[DVec4] {
        &self.weights
    }

    /// Bone indices and weights for one vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of bounds.
    pub fn influences(&self, vertex: usize) -> (IVec4, DVec4) {
        (self.indices[vertex], self.weights[vertex])
    }

    /// Iterates `(bone, weight)` pairs with non-zero weight for every vertex.
    fn active(&self) -> impl Iterator<Item = (usize, i32, f64)> + '_ {
        self.indices
            .iter()
            .zip(&self.weights)
            .enumerate()
            .flat_map(|(vertex, (index, weight))| {
                index
                    .to_array()
                    .into_iter()
                    .zip(weight.to_array())
                    .filter(|&(_, w)| w != 0.0)
                    .map(move |(bone, w)| (vertex, bone, w))
            })
    }

    /// Highest bone index carrying a non-zero weight.
    pub fn max_active_bone(&self) -> Option<i32> {
        self.active().map(|(_, bone, _)| bone).max()
    }

    /// Checks every weighted influence names a bone in `0..bone_count`.
    ///
    /// Zero-weight slots are ignored, so the `segment_count + 1` neighbour
    /// emitted for a vertex at the very top of the chain is accepted.
    pub fn validate_against(&self, bone_count: usize) -> Result<(), SkinError> {
        match self
            .active()
            .find(|&(_, bone, _)| bone < 0 || bone as usize >= bone_count)
        {
            Some((vertex, bone, _)) => Err(SkinError::BoneOutOfRange {
                vertex,
                bone,
                bone_count,
            }),
            None => Ok(()),
        }
    }

    /// Packs the binding together with its geometry into GPU vertices.
    ///
    /// Zero-weight slots are written as joint 0, matching the unused-slot
    /// convention of the 4-influence layout.
    pub fn skinned_vertices(&self, geometry: &RawGeometry) -> Result<Vec<SkinnedVertex>, SkinError> {
        if geometry.vertices.len() != self.len() {
            return Err(SkinError::LengthMismatch {
                expected: self.len(),
                actual: geometry.vertices.len(),
            });
        }

        let mut out = Vec::with_capacity(self.len());
        for (vertex, (base, (index, weight))) in geometry
            .vertices
            .iter()
            .zip(self.indices.iter().zip(&self.weights))
            .enumerate()
        {
            let mut joints = [0u16; 4];
            for (slot, (bone, w)) in joints
                .iter_mut()
                .zip(index.to_array().into_iter().zip(weight.to_array()))
            {
                if w == 0.0 {
                    continue;
                }
                *slot = u16::try_from(bone).map_err(|_| SkinError::BoneOutOfRange {
                    vertex,
                    bone,
                    bone_count: usize::from(u16::MAX) + 1,
                })?;
            }
            out.push(SkinnedVertex::new(*base, joints, weight.as_vec4().to_array()));
        }

        Ok(out)
    }
}
