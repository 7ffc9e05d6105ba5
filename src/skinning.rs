//! CPU linear blend skinning.
//!
//! Renderers normally do this on the GPU; the CPU path is handy for
//! headless previews, picking against a posed mesh, and tests.

use crate::error::SkinError;
use crate::skin::SkinBinding;
use glam::{Mat4, Vec3};

/// Deforms `positions` by the weighted sum of their bones' skinning matrices.
///
/// `bone_matrices` are usually [`Skeleton::bone_matrices`](crate::Skeleton::bone_matrices).
/// Zero-weight influences are skipped; a weighted influence naming a missing
/// bone is an error.
pub fn skin_positions(
    positions: &[Vec3],
    binding: &SkinBinding,
    bone_matrices: &[Mat4],
) -> Result<Vec<Vec3>, SkinError> {
    if positions.len() != binding.len() {
        return Err(SkinError::LengthMismatch {
            expected: binding.len(),
            actual: positions.len(),
        });
    }

    let mut out = vec![Vec3::ZERO; positions.len()];
    for (vertex, (position, skinned)) in positions.iter().zip(&mut out).enumerate() {
        let (indices, weights) = binding.influences(vertex);

        for (bone, weight) in indices.to_array().into_iter().zip(weights.to_array()) {
            if weight == 0.0 {
                continue;
            }
            let matrix = usize::try_from(bone)
                .ok()
                .and_then(|b| bone_matrices.get(b))
                .ok_or(SkinError::BoneOutOfRange {
                    vertex,
                    bone,
                    bone_count: bone_matrices.len(),
                })?;
            *skinned += matrix.transform_point3(*position) * weight as f32;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RawGeometry;
    use crate::skeleton::Skeleton;
    use crate::skin::compute_skin_binding;
    use glam::Quat;

    fn cone_and_binding() -> (Vec<Vec3>, SkinBinding, Skeleton) {
        let geometry = RawGeometry::cone(1.0, 3.0, 8, 6, false).unwrap();
        let positions = geometry.positions();
        let binding = compute_skin_binding(&positions, 1.5, 1.0, 3).unwrap();
        let skeleton = Skeleton::chain(3, 1.0, 1.5).unwrap();
        (positions, binding, skeleton)
    }

    #[test]
    fn bind_pose_leaves_mesh_unchanged() {
        let (positions, binding, skeleton) = cone_and_binding();
        let skinned = skin_positions(&positions, &binding, &skeleton.bone_matrices()).unwrap();
        for (a, b) in positions.iter().zip(&skinned) {
            assert!((*a - *b).length() < 1e-5);
        }
    }

    #[test]
    fn bending_moves_upper_vertices_only() {
        let (positions, binding, mut skeleton) = cone_and_binding();
        skeleton.set_rotation(3, Quat::from_rotation_z(1.0)).unwrap();
        let skinned = skin_positions(&positions, &binding, &skeleton.bone_matrices()).unwrap();

        for (a, b) in positions.iter().zip(&skinned) {
            // Bone 3 sits at the tip; nothing below the last segment feels it.
            if a.y <= 0.5 {
                assert!((*a - *b).length() < 1e-5);
            }
        }
        assert!(positions.iter().zip(&skinned).any(|(a, b)| (*a - *b).length() > 1e-3));
    }

    #[test]
    fn rejects_missing_bones() {
        let (positions, binding, _) = cone_and_binding();
        let result = skin_positions(&positions, &binding, &[Mat4::IDENTITY; 2]);
        assert!(matches!(result, Err(SkinError::BoneOutOfRange { bone_count: 2, .. })));
    }

    #[test]
    fn rejects_length_mismatch() {
        let (positions, binding, skeleton) = cone_and_binding();
        let result = skin_positions(&positions[1..], &binding, &skeleton.bone_matrices());
        assert!(matches!(result, Err(SkinError::LengthMismatch { .. })));
    }
}
