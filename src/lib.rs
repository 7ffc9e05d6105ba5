//! # Bonechain
//!
//! **Procedural skinned bone chains for 3D scenes.**
//!
//! Build a cone, run a bone chain up its axis, and get per-vertex skin
//! indices and weights ready for any skeletal-mesh renderer.
//!
//! ## Quick Start
//!
//! ```
//! use bonechain::*;
//!
//! let config = ChainConfig::new().segments(4, 8.0).radius(5.0);
//! let mut cone = SkinnedCone::build(&config).unwrap();
//!
//! // Upload these to a vertex buffer laid out as `SkinnedVertex::LAYOUT`.
//! let vertices = cone.skinned_vertices().unwrap();
//! assert_eq!(vertices.len(), cone.geometry.vertex_count());
//!
//! // Animate by posing the skeleton; the binding never changes.
//! cone.skeleton.sway(0.25);
//! let matrices = cone.skeleton.bone_matrices();
//! assert_eq!(matrices.len(), 5);
//! ```
//!
//! ## Layout
//!
//! - [`compute_skin_binding`] — the weight generator, usable on any vertex buffer
//! - [`Skeleton`] — bone hierarchy with a linear-chain constructor
//! - [`RawGeometry`] — procedural cylinders, cones, and spheres
//! - [`DemoScene`] — composes camera, light, ball, and cone into a `hecs` [`World`]

mod camera;
mod color;
mod config;
mod ecs;
mod error;
mod geometry;
mod mesh;
mod scene;
mod skeleton;
mod skin;
mod skinning;

pub use camera::Camera;
pub use color::Color;
pub use config::{ChainConfig, DemoConfig};
pub use ecs::{Label, RenderMesh, SkinnedMesh};
pub use error::{GeometryError, SkinError};
pub use geometry::RawGeometry;
pub use mesh::{SkinnedVertex, Transform, Vertex3d};
pub use scene::{Ball, DemoScene, PointLight, SceneEntities, SkinnedCone};
pub use skeleton::{Bone, Skeleton};
pub use skin::{SkinBinding, compute_skin_binding};
pub use skinning::skin_positions;

// Re-export glam math types for convenience
pub use glam::{DVec4, IVec4, Mat4, Quat, Vec3};

pub use hecs::{Entity, World};
