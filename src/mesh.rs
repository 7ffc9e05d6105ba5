//! Vertex formats and spatial transforms.
//!
//! - [`Vertex3d`] — position, normal and UV for static geometry
//! - [`SkinnedVertex`] — a [`Vertex3d`] extended with four bone influences
//! - [`Transform`] — position, rotation and scale for placing objects and bones
//!
//! # Skinned Vertex Layout
//!
//! [`SkinnedVertex`] uses the following GPU layout (56 bytes per vertex):
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |
//! | joints    | Uint16x4  | 32     | 3               |
//! | weights   | Float32x4 | 40     | 4               |
//!
//! The layout is exposed via [`SkinnedVertex::LAYOUT`] so an external renderer
//! can build its skinning pipeline against it.

use glam::{Mat4, Quat, Vec3};

/// A vertex with position, normal, and texture coordinates.
///
/// `#[repr(C)]` and [`bytemuck::Pod`] make it safe to cast a slice of vertices
/// straight into a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Position in model space.
    pub position: [f32; 3],
    /// Surface normal (normalized).
    pub normal: [f32; 3],
    /// Texture coordinates in [0, 1].
    pub uv: [f32; 2],
}

impl Vertex3d {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Position as a [`Vec3`].
    pub fn pos(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// A vertex carrying up to four bone influences.
///
/// Unused influence slots hold joint 0 with weight 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkinnedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// Indices into the skeleton's bone array.
    pub joints: [u16; 4],
    /// Blend weights matching `joints`.
    pub weights: [f32; 4],
}

impl SkinnedVertex {
    /// The wgpu vertex buffer layout for this vertex type.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    ///     vertex: wgpu::VertexState {
    ///         module: &shader,
    ///         entry_point: Some("vs_skinned"),
    ///         buffers: &[SkinnedVertex::LAYOUT],
    ///         ..Default::default()
    ///     },
    ///     // ...
    /// });
    /// ```
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SkinnedVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
            // joints
            wgpu::VertexAttribute {
                offset: 32,
                shader_location: 3,
                format: wgpu::VertexFormat::Uint16x4,
            },
            // weights
            wgpu::VertexAttribute {
                offset: 40,
                shader_location: 4,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };

    pub fn new(vertex: Vertex3d, joints: [u16; 4], weights: [f32; 4]) -> Self {
        Self {
            position: vertex.position,
            normal: vertex.normal,
            uv: vertex.uv,
            joints,
            weights,
        }
    }
}

/// Position, rotation, and scale.
///
/// Used both for placing scene objects and as the local transform of a bone.
/// [`Transform::matrix()`] applies Scale → Rotate → Translate.
///
/// ```
/// use bonechain::{Transform, Vec3, Quat};
///
/// let transform = Transform::new()
///     .position(Vec3::new(0.0, 5.0, -10.0))
///     .rotation(Quat::from_rotation_y(std::f32::consts::PI / 4.0))
///     .uniform_scale(2.0);
/// assert_eq!(transform.scale, Vec3::splat(2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// The 4×4 matrix for this transform (SRT order).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skinned_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<SkinnedVertex>(), 56);
        assert_eq!(SkinnedVertex::LAYOUT.array_stride, 56);
        assert_eq!(SkinnedVertex::LAYOUT.attributes.len(), 5);
    }

    #[test]
    fn skinned_vertex_keeps_base_attributes() {
        let base = Vertex3d::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.75]);
        let v = SkinnedVertex::new(base, [1, 2, 0, 0], [0.5, 0.5, 0.0, 0.0]);
        assert_eq!(v.position, base.position);
        assert_eq!(v.uv, base.uv);
        assert_eq!(v.joints, [1, 2, 0, 0]);
    }

    #[test]
    fn transform_matrix_translates_points() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let p = t.matrix().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn transform_applies_scale_before_translation() {
        let t = Transform::new()
            .position(Vec3::new(1.0, 0.0, 0.0))
            .uniform_scale(2.0);
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-6);
    }
}
