//! ECS components for scene entities.
//!
//! Scene objects are spawned into a `hecs` [`World`](hecs::World) as plain
//! component bundles. Every renderable entity carries a
//! [`Transform`](crate::Transform), its [`RawGeometry`](crate::RawGeometry)
//! and a [`RenderMesh`]; skinned entities add a [`SkinnedMesh`].
//!
//! ```
//! use bonechain::*;
//!
//! let mut world = World::new();
//! let sphere = RawGeometry::sphere(1.0, 8, 6).unwrap();
//! world.spawn((
//!     Transform::new().position(Vec3::new(0.0, 0.0, -5.0)),
//!     sphere,
//!     RenderMesh::new(Color::YELLOW),
//! ));
//! assert_eq!(world.query::<&RenderMesh>().iter().count(), 1);
//! ```

use crate::color::Color;
use crate::skeleton::Skeleton;
use crate::skin::SkinBinding;

/// Surface appearance of a renderable entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderMesh {
    /// Base color of the material.
    pub color: Color,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl RenderMesh {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    /// Marks the mesh as both casting and receiving shadows.
    pub fn with_shadows(mut self) -> Self {
        self.cast_shadow = true;
        self.receive_shadow = true;
        self
    }
}

/// Skinning data for an entity whose geometry follows a skeleton.
///
/// The binding is fixed at construction; animation only poses the skeleton.
#[derive(Clone, Debug)]
pub struct SkinnedMesh {
    pub binding: SkinBinding,
    pub skeleton: Skeleton,
}

/// Human-readable entity label, used in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(pub &'static str);
