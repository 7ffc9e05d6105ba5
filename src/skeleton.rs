//! Bone hierarchies.
//!
//! A [`Skeleton`] is a flat list of [`Bone`]s where every parent appears
//! before its children, so world matrices resolve in one forward pass.
//! Inverse bind matrices are captured when the skeleton is built and never
//! change; posing a bone only touches its local [`Transform`].

use crate::error::SkinError;
use crate::mesh::Transform;
use glam::{Mat4, Quat, Vec3};

/// A single node of a skeleton.
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for the root.
    pub parent: Option<usize>,
    /// Transform relative to the parent (or to the mesh for the root).
    pub local: Transform,
}

#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    inverse_bind: Vec<Mat4>,
}

impl Skeleton {
    /// Builds a linear chain of `segment_count + 1` bones along +Y.
    ///
    /// The root sits at `y = -half_height` so a mesh centered on the origin
    /// is spanned from bottom to top; every child is offset by
    /// `segment_height` from its parent.
    ///
    /// ```
    /// use bonechain::Skeleton;
    ///
    /// let chain = Skeleton::chain(3, 1.0, 1.5).unwrap();
    /// assert_eq!(chain.bone_count(), 4);
    /// let top = chain.world_matrices()[3].w_axis.truncate();
    /// assert_eq!(top.y, 1.5);
    /// ```
    pub fn chain(segment_count: u32, segment_height: f32, half_height: f32) -> Result<Self, SkinError> {
        if !segment_height.is_finite() || segment_height <= 0.0 {
            return Err(SkinError::InvalidSegmentHeight(f64::from(segment_height)));
        }
        if segment_count == 0 {
            return Err(SkinError::InvalidSegmentCount);
        }

        let bones = (0..=segment_count as usize)
            .map(|i| {
                let (parent, offset) = match i {
                    0 => (None, Vec3::new(0.0, -half_height, 0.0)),
                    _ => (Some(i - 1), Vec3::new(0.0, segment_height, 0.0)),
                };
                Bone {
                    name: format!("bone_{i}"),
                    parent,
                    local: Transform::from_position(offset),
                }
            })
            .collect();

        Ok(Self::from_bones(bones))
    }

    /// Creates a skeleton whose current pose is the bind pose.
    ///
    /// Bones must be ordered so that parents precede their children.
    pub fn from_bones(bones: Vec<Bone>) -> Self {
        let mut skeleton = Self {
            bones,
            inverse_bind: Vec::new(),
        };
        skeleton.inverse_bind = skeleton
            .world_matrices()
            .iter()
            .map(Mat4::inverse)
            .collect();
        skeleton
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind
    }

    pub fn set_rotation(&mut self, index: usize, rotation: Quat) -> Result<(), SkinError> {
        let bone = self
            .bones
            .get_mut(index)
            .ok_or(SkinError::NoSuchBone(index))?;
        bone.local.rotation = rotation;
        Ok(())
    }

    /// Returns every bone to its bind pose rotation.
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.local.rotation = Quat::IDENTITY;
        }
    }

    /// Bends the whole chain sideways, oscillating with `time`.
    ///
    /// Every bone rotates about Z by `sin(time) * 2 / bone_count`, so the
    /// total bend stays bounded regardless of chain length.
    pub fn sway(&mut self, time: f32) {
        let angle = time.sin() * 2.0 / self.bones.len() as f32;
        let rotation = Quat::from_rotation_z(angle);
        for bone in &mut self.bones {
            bone.local.rotation = rotation;
        }
    }

    /// Model-space matrix of every bone in the current pose.
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.bones.len());
        for bone in &self.bones {
            let local = bone.local.matrix();
            let matrix = match bone.parent {
                Some(parent) => world[parent] * local,
                None => local,
            };
            world.push(matrix);
        }
        world
    }

    /// Skinning matrices (`world * inverse_bind`); identity at bind pose.
    pub fn bone_matrices(&self) -> Vec<Mat4> {
        self.world_matrices()
            .into_iter()
            .zip(&self.inverse_bind)
            .map(|(world, inverse)| world * *inverse)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_is_linear() {
        let skeleton = Skeleton::chain(5, 6.0, 15.0).unwrap();
        assert_eq!(skeleton.bone_count(), 6);
        assert_eq!(skeleton.bones()[0].parent, None);
        for (i, bone) in skeleton.bones().iter().enumerate().skip(1) {
            assert_eq!(bone.parent, Some(i - 1));
        }
    }

    #[test]
    fn chain_bones_span_the_mesh_height() {
        let skeleton = Skeleton::chain(5, 6.0, 15.0).unwrap();
        let heights: Vec<f32> = skeleton
            .world_matrices()
            .iter()
            .map(|m| m.w_axis.y)
            .collect();
        assert_eq!(heights, vec![-15.0, -9.0, -3.0, 3.0, 9.0, 15.0]);
    }

    #[test]
    fn bind_pose_matrices_are_identity() {
        let skeleton = Skeleton::chain(4, 1.5, 3.0).unwrap();
        for m in skeleton.bone_matrices() {
            assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        }
    }

    #[test]
    fn rotation_propagates_to_children() {
        let mut skeleton = Skeleton::chain(2, 1.0, 1.0).unwrap();
        skeleton
            .set_rotation(1, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2))
            .unwrap();

        // Bone 2 is one unit along bone 1's rotated Y, i.e. -X.
        let tip = skeleton.world_matrices()[2].w_axis.truncate();
        assert!((tip - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn sway_and_reset() {
        let mut skeleton = Skeleton::chain(3, 1.0, 1.5).unwrap();
        skeleton.sway(std::f32::consts::FRAC_PI_2);
        let expected = Quat::from_rotation_z(2.0 / 4.0);
        assert!(skeleton.bones()[2].local.rotation.abs_diff_eq(expected, 1e-6));

        skeleton.reset_pose();
        for m in skeleton.bone_matrices() {
            assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        }
    }

    #[test]
    fn rejects_invalid_chain() {
        assert_eq!(
            Skeleton::chain(0, 1.0, 0.0).unwrap_err(),
            SkinError::InvalidSegmentCount
        );
        assert!(Skeleton::chain(2, 0.0, 0.0).is_err());
        assert_eq!(
            Skeleton::chain(2, 1.0, 1.0)
                .unwrap()
                .set_rotation(3, Quat::IDENTITY),
            Err(SkinError::NoSuchBone(3))
        );
    }
}
