//! Procedural geometry generation.
//!
//! [`RawGeometry`] is the CPU-side vertex and index data for a mesh. It is
//! owned by whoever builds it and never touches the GPU; handing it to a
//! renderer is the caller's job.
//!
//! # Primitives
//!
//! | Primitive                  | Axis | Extent on that axis          |
//! |----------------------------|------|------------------------------|
//! | [`RawGeometry::cylinder`]  | Y    | `-height/2 ..= height/2`     |
//! | [`RawGeometry::cone`]      | Y    | `-height/2 ..= height/2`     |
//! | [`RawGeometry::sphere`]    | —    | `-radius ..= radius`         |
//!
//! ```
//! use bonechain::RawGeometry;
//!
//! let cone = RawGeometry::cone(5.0, 30.0, 5, 15, true).unwrap();
//! let (min, max) = cone.bounds();
//! assert_eq!(min.y, -15.0);
//! assert_eq!(max.y, 15.0);
//! ```

use crate::error::GeometryError;
use crate::mesh::Vertex3d;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Vertex and index data before it is handed to a renderer.
#[derive(Clone, Debug, Default)]
pub struct RawGeometry {
    /// Vertex positions, normals, and UVs.
    pub vertices: Vec<Vertex3d>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn new(vertices: Vec<Vertex3d>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions in buffer order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(Vertex3d::pos).collect()
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().map(Vertex3d::pos).fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        )
    }

    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (v.pos() + offset).into();
        }
    }

    /// Centers the geometry's bounding box at the origin.
    pub fn recenter(&mut self) {
        let center = self.center();
        self.translate(-center);
    }

    /// Generates a (possibly tapered) cylinder standing on the Y axis.
    ///
    /// Rows run from the top (`+height/2`) down to the bottom, each with
    /// `radial_segments + 1` vertices so the seam gets its own UVs. Caps are
    /// added for each end with a non-zero radius unless `open_ended` is set.
    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
        open_ended: bool,
    ) -> Result<Self, GeometryError> {
        positive("radius_top", radius_top, true)?;
        positive("radius_bottom", radius_bottom, true)?;
        positive("height", height, false)?;
        nonzero("radial_segments", radial_segments)?;
        nonzero("height_segments", height_segments)?;
        if radius_top == 0.0 && radius_bottom == 0.0 {
            return Err(GeometryError::InvalidParameter {
                name: "radius_bottom",
                value: 0.0,
            });
        }

        let mut geometry = Self::default();
        let half_height = height * 0.5;
        let slope = (radius_bottom - radius_top) / height;

        let columns = radial_segments + 1;
        for row in 0..=height_segments {
            let v = row as f32 / height_segments as f32;
            let radius = v * (radius_bottom - radius_top) + radius_top;
            let y = -v * height + half_height;

            for col in 0..=radial_segments {
                let u = col as f32 / radial_segments as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                let normal = Vec3::new(sin, slope, cos).normalize();

                geometry.vertices.push(Vertex3d::new(
                    [radius * sin, y, radius * cos],
                    normal.into(),
                    [u, 1.0 - v],
                ));
            }
        }

        for col in 0..radial_segments {
            for row in 0..height_segments {
                let a = row * columns + col;
                let b = (row + 1) * columns + col;
                let c = (row + 1) * columns + col + 1;
                let d = row * columns + col + 1;
                geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        if !open_ended {
            if radius_top > 0.0 {
                geometry.push_cap(radius_top, half_height, radial_segments, true);
            }
            if radius_bottom > 0.0 {
                geometry.push_cap(radius_bottom, half_height, radial_segments, false);
            }
        }

        Ok(geometry)
    }

    /// Generates a cone with its tip at `+height/2` and base at `-height/2`.
    pub fn cone(
        radius: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
        open_ended: bool,
    ) -> Result<Self, GeometryError> {
        Self::cylinder(
            0.0,
            radius,
            height,
            radial_segments,
            height_segments,
            open_ended,
        )
    }

    /// Generates a UV sphere centered at the origin.
    pub fn sphere(
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> Result<Self, GeometryError> {
        positive("radius", radius, false)?;
        if width_segments < 3 {
            return Err(GeometryError::InvalidParameter {
                name: "width_segments",
                value: f64::from(width_segments),
            });
        }
        if height_segments < 2 {
            return Err(GeometryError::InvalidParameter {
                name: "height_segments",
                value: f64::from(height_segments),
            });
        }

        let mut geometry = Self::default();
        let columns = width_segments + 1;

        for ring in 0..=height_segments {
            let v = ring as f32 / height_segments as f32;
            let (sin_phi, cos_phi) = (v * PI).sin_cos();

            for seg in 0..=width_segments {
                let u = seg as f32 / width_segments as f32;
                let (sin_theta, cos_theta) = (u * TAU).sin_cos();
                let normal = Vec3::new(-cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);

                geometry.vertices.push(Vertex3d::new(
                    (normal * radius).into(),
                    normal.normalize_or_zero().into(),
                    [u, 1.0 - v],
                ));
            }
        }

        for ring in 0..height_segments {
            for seg in 0..width_segments {
                let a = ring * columns + seg + 1;
                let b = ring * columns + seg;
                let c = (ring + 1) * columns + seg;
                let d = (ring + 1) * columns + seg + 1;

                // Poles collapse to a single triangle per quad.
                if ring != 0 {
                    geometry.indices.extend_from_slice(&[a, b, d]);
                }
                if ring != height_segments - 1 {
                    geometry.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Ok(geometry)
    }

    fn push_cap(&mut self, radius: f32, half_height: f32, radial_segments: u32, top: bool) {
        let sign = if top { 1.0 } else { -1.0 };
        let y = half_height * sign;
        let normal = [0.0, sign, 0.0];

        let center_start = self.vertices.len() as u32;
        for _ in 0..radial_segments {
            self.vertices
                .push(Vertex3d::new([0.0, y, 0.0], normal, [0.5, 0.5]));
        }

        let rim_start = self.vertices.len() as u32;
        for col in 0..=radial_segments {
            let u = col as f32 / radial_segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            self.vertices.push(Vertex3d::new(
                [radius * sin, y, radius * cos],
                normal,
                [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
            ));
        }

        for col in 0..radial_segments {
            let c = center_start + col;
            let i = rim_start + col;
            if top {
                self.indices.extend_from_slice(&[i, i + 1, c]);
            } else {
                self.indices.extend_from_slice(&[i + 1, i, c]);
            }
        }
    }
}

fn positive(name: &'static str, value: f32, allow_zero: bool) -> Result<(), GeometryError> {
    let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
    if ok {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter {
            name,
            value: f64::from(value),
        })
    }
}

fn nonzero(name: &'static str, value: u32) -> Result<(), GeometryError> {
    if value == 0 {
        Err(GeometryError::InvalidParameter { name, value: 0.0 })
    } else {
        Ok(())
    }
}
