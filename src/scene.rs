//! Scene objects and the demo composition root.
//!
//! Every builder here returns an owned object; nothing is attached to a
//! shared scene behind the caller's back. [`DemoScene::register`] is the one
//! place objects are handed to a [`World`].
//!
//! ```
//! use bonechain::*;
//!
//! let scene = DemoScene::build(&DemoConfig::default()).unwrap();
//! let mut world = World::new();
//! let entities = scene.register(&mut world);
//!
//! DemoScene::tick(&mut world, 0.5);
//! let skinned = world.get::<&SkinnedMesh>(entities.cone).unwrap();
//! assert_eq!(skinned.skeleton.bone_count(), 5);
//! ```

use crate::camera::Camera;
use crate::color::Color;
use crate::config::{ChainConfig, DemoConfig};
use crate::ecs::{Label, RenderMesh, SkinnedMesh};
use crate::error::{GeometryError, SkinError};
use crate::geometry::RawGeometry;
use crate::mesh::{SkinnedVertex, Transform};
use crate::skeleton::Skeleton;
use crate::skin::{SkinBinding, compute_skin_binding};
use crate::skinning::skin_positions;
use glam::Vec3;
use hecs::{Entity, World};

/// An omnidirectional light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

/// A cone bound to a segmented bone chain running up its axis.
#[derive(Clone, Debug)]
pub struct SkinnedCone {
    pub geometry: RawGeometry,
    pub binding: SkinBinding,
    pub skeleton: Skeleton,
    pub color: Color,
}

impl SkinnedCone {
    /// Builds the cone, its bone chain, and the skin binding between them.
    ///
    /// The cone spans `segment_height * segment_count` centered on the
    /// origin. Chain dimensions are measured from the generated geometry so
    /// the tip lands on the last bone, and the binding is checked against
    /// the skeleton before returning.
    pub fn build(config: &ChainConfig) -> Result<Self, SkinError> {
        config.validate()?;

        let geometry = RawGeometry::cone(
            config.radius,
            config.height(),
            config.radial_segments,
            config.height_segments(),
            false,
        )?;

        let (min, max) = geometry.bounds();
        let half_height = f64::from(max.y);
        let segment_height =
            (f64::from(max.y) - f64::from(min.y)) / f64::from(config.segment_count);

        let binding = compute_skin_binding(
            &geometry.positions(),
            half_height,
            segment_height,
            config.segment_count,
        )?;
        let skeleton = Skeleton::chain(
            config.segment_count,
            segment_height as f32,
            half_height as f32,
        )?;
        binding.validate_against(skeleton.bone_count())?;

        tracing::info!(
            vertices = geometry.vertex_count(),
            bones = skeleton.bone_count(),
            "Built skinned cone"
        );

        Ok(Self {
            geometry,
            binding,
            skeleton,
            color: config.color,
        })
    }

    /// Vertex buffer contents for a skinning pipeline.
    pub fn skinned_vertices(&self) -> Result<Vec<SkinnedVertex>, SkinError> {
        self.binding.skinned_vertices(&self.geometry)
    }

    /// Vertex positions deformed by the skeleton's current pose.
    pub fn posed_positions(&self) -> Result<Vec<Vec3>, SkinError> {
        skin_positions(
            &self.geometry.positions(),
            &self.binding,
            &self.skeleton.bone_matrices(),
        )
    }
}

/// A plain colored sphere.
#[derive(Clone, Debug)]
pub struct Ball {
    pub geometry: RawGeometry,
    pub color: Color,
}

impl Ball {
    pub fn new(radius: f32, segments: u32, color: Color) -> Result<Self, GeometryError> {
        Ok(Self {
            geometry: RawGeometry::sphere(radius, segments, segments)?,
            color,
        })
    }
}

/// Entities created by [`DemoScene::register`].
#[derive(Clone, Copy, Debug)]
pub struct SceneEntities {
    pub camera: Entity,
    pub light: Entity,
    pub ball: Entity,
    pub cone: Entity,
}

/// The demo: a camera, a point light, a ball, and a skinned cone.
#[derive(Clone, Debug)]
pub struct DemoScene {
    pub camera: Camera,
    pub light: PointLight,
    pub ball: Ball,
    pub cone: SkinnedCone,
    pub cone_position: Vec3,
}

impl DemoScene {
    pub fn build(config: &DemoConfig) -> Result<Self, SkinError> {
        let camera = Camera::new()
            .at(
                config.camera_position.x,
                config.camera_position.y,
                config.camera_position.z,
            )
            .with_fov(config.fov_degrees)
            .with_aspect(config.width, config.height)
            .with_clip(config.near, config.far);

        let light = PointLight {
            color: config.light_color,
            intensity: config.light_intensity,
            position: config.light_position,
        };

        let ball = Ball::new(config.ball_radius, config.ball_segments, config.ball_color)?;
        let cone = SkinnedCone::build(&config.chain)?;

        Ok(Self {
            camera,
            light,
            ball,
            cone,
            cone_position: config.chain_position,
        })
    }

    /// Moves every object into `world`, one entity each.
    pub fn register(self, world: &mut World) -> SceneEntities {
        let camera = world.spawn((
            Label("camera"),
            Transform::from_position(self.camera.position),
            self.camera,
        ));
        let light = world.spawn((
            Label("light"),
            Transform::from_position(self.light.position),
            self.light,
        ));
        let ball = world.spawn((
            Label("ball"),
            Transform::new(),
            RenderMesh::new(self.ball.color),
            self.ball.geometry,
        ));
        let cone = world.spawn((
            Label("cone"),
            Transform::from_position(self.cone_position),
            RenderMesh::new(self.cone.color).with_shadows(),
            self.cone.geometry,
            SkinnedMesh {
                binding: self.cone.binding,
                skeleton: self.cone.skeleton,
            },
        ));

        tracing::debug!(entities = world.len(), "Registered demo scene");

        SceneEntities {
            camera,
            light,
            ball,
            cone,
        }
    }

    /// Poses every skinned entity for the given animation time.
    ///
    /// Returns the number of skeletons updated.
    pub fn tick(world: &mut World, time: f32) -> usize {
        let mut posed = 0;
        for (_, skinned) in world.query_mut::<&mut SkinnedMesh>() {
            skinned.skeleton.sway(time);
            posed += 1;
        }
        posed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_binding_matches_geometry() {
        let cone = SkinnedCone::build(&ChainConfig::new().segments(3, 1.0)).unwrap();
        assert_eq!(cone.binding.len(), cone.geometry.vertex_count());
        assert_eq!(cone.skeleton.bone_count(), 4);
        assert_eq!(cone.binding.max_active_bone(), Some(3));
        assert_eq!(cone.skinned_vertices().unwrap().len(), cone.geometry.vertex_count());
    }

    #[test]
    fn decimal_chains_build_with_tip_on_last_bone() {
        for count in 1..=12u32 {
            for k in 1..=50u32 {
                let config = ChainConfig::new().segments(count, k as f32 * 0.1);
                let cone = SkinnedCone::build(&config)
                    .unwrap_or_else(|err| panic!("count {count} height {k}/10: {err}"));

                assert_eq!(cone.binding.max_active_bone(), Some(count as i32));
                let (index, weight) = cone.binding.influences(0);
                assert_eq!(index.x, count as i32);
                assert_eq!((weight.x, weight.y), (1.0, 0.0));
            }
        }
    }

    #[test]
    fn cone_build_rejects_bad_chain() {
        let err = SkinnedCone::build(&ChainConfig::new().segments(0, 1.0)).unwrap_err();
        assert_eq!(err, SkinError::InvalidSegmentCount);
    }

    #[test]
    fn sway_bends_the_cone() {
        let mut cone = SkinnedCone::build(&ChainConfig::default()).unwrap();
        let rest = cone.posed_positions().unwrap();
        cone.skeleton.sway(1.0);
        let bent = cone.posed_positions().unwrap();

        let top = rest
            .iter()
            .zip(&bent)
            .max_by(|a, b| a.0.y.total_cmp(&b.0.y))
            .unwrap();
        assert!(top.1.x.abs() > 1.0);
    }

    #[test]
    fn register_spawns_one_entity_per_object() {
        let scene = DemoScene::build(&DemoConfig::default()).unwrap();
        let mut world = World::new();
        let entities = scene.register(&mut world);

        assert_eq!(world.len(), 4);
        assert_eq!(*world.get::<&Label>(entities.ball).unwrap(), Label("ball"));
        assert_eq!(
            world.get::<&PointLight>(entities.light).unwrap().intensity,
            0.5
        );
        assert_eq!(
            *world.get::<&Transform>(entities.light).unwrap(),
            Transform::from_position(Vec3::splat(100.0))
        );
        let camera = world.get::<&Camera>(entities.camera).unwrap();
        assert_eq!((camera.near, camera.far), (0.1, 200.0));
        assert!(world.get::<&SkinnedMesh>(entities.ball).is_err());
        assert_eq!(world.query::<&RenderMesh>().iter().count(), 2);
    }

    #[test]
    fn tick_poses_skeletons_without_touching_bindings() {
        let scene = DemoScene::build(&DemoConfig::default()).unwrap();
        let binding = scene.cone.binding.clone();
        let mut world = World::new();
        let entities = scene.register(&mut world);

        assert_eq!(DemoScene::tick(&mut world, 1.0), 1);

        let skinned = world.get::<&SkinnedMesh>(entities.cone).unwrap();
        assert_eq!(skinned.binding, binding);
        assert_ne!(
            skinned.skeleton.bones()[0].local.rotation,
            glam::Quat::IDENTITY
        );
    }
}
