//! Builder-style configuration for the demo scene.

use crate::color::Color;
use crate::error::SkinError;
use glam::Vec3;

/// Shape of a skinned cone and the bone chain driving it.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainConfig {
    /// Length of one bone segment.
    pub segment_height: f32,
    /// Number of segments; the chain has one more bone than this.
    pub segment_count: u32,
    /// Base radius of the cone.
    pub radius: f32,
    pub radial_segments: u32,
    /// Tessellation rows per bone segment.
    pub rows_per_segment: u32,
    pub color: Color,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            segment_height: 8.0,
            segment_count: 4,
            radius: 5.0,
            radial_segments: 8,
            rows_per_segment: 3,
            color: Color::ORANGE,
        }
    }
}

impl ChainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(mut self, count: u32, height: f32) -> Self {
        self.segment_count = count;
        self.segment_height = height;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn tessellation(mut self, radial_segments: u32, rows_per_segment: u32) -> Self {
        self.radial_segments = radial_segments;
        self.rows_per_segment = rows_per_segment;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Total height of the chain (`segment_height * segment_count`).
    pub fn height(&self) -> f32 {
        self.segment_height * self.segment_count as f32
    }

    pub fn half_height(&self) -> f32 {
        self.height() * 0.5
    }

    pub fn height_segments(&self) -> u32 {
        self.segment_count * self.rows_per_segment
    }

    pub fn validate(&self) -> Result<(), SkinError> {
        if !self.segment_height.is_finite() || self.segment_height <= 0.0 {
            return Err(SkinError::InvalidSegmentHeight(f64::from(self.segment_height)));
        }
        if self.segment_count == 0 {
            return Err(SkinError::InvalidSegmentCount);
        }
        Ok(())
    }
}

/// Everything needed to compose the demo scene.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub chain: ChainConfig,
    pub chain_position: Vec3,
    pub ball_radius: f32,
    pub ball_segments: u32,
    pub ball_color: Color,
    pub light_color: Color,
    pub light_intensity: f32,
    pub light_position: Vec3,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 50.0,
            near: 0.1,
            far: 200.0,
            camera_position: Vec3::new(0.0, 30.0, 30.0),
            chain: ChainConfig::default(),
            chain_position: Vec3::new(25.0, 0.0, 0.0),
            ball_radius: 10.0,
            ball_segments: 10,
            ball_color: Color::YELLOW,
            light_color: Color::WHITE,
            light_intensity: 0.5,
            light_position: Vec3::splat(100.0),
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn chain(mut self, chain: ChainConfig) -> Self {
        self.chain = chain;
        self
    }

    pub fn ball(mut self, radius: f32, segments: u32) -> Self {
        self.ball_radius = radius;
        self.ball_segments = segments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_dimensions() {
        let chain = ChainConfig::new().segments(3, 1.0).tessellation(6, 2);
        assert_eq!(chain.height(), 3.0);
        assert_eq!(chain.half_height(), 1.5);
        assert_eq!(chain.height_segments(), 6);
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn chain_validation() {
        assert_eq!(
            ChainConfig::new().segments(0, 1.0).validate(),
            Err(SkinError::InvalidSegmentCount)
        );
        assert_eq!(
            ChainConfig::new().segments(2, -1.0).validate(),
            Err(SkinError::InvalidSegmentHeight(-1.0))
        );
    }
}
