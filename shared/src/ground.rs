//! Ground contact probe.
//!
//! The sensor is a sphere placed relative to the player. It is sampled once per fixed tick
//! against whatever world geometry the host exposes through [`SurfaceQuery`].

use bevy::prelude::*;

use crate::config::GroundConfig;

/// World geometry that can answer sphere overlap queries.
pub trait SurfaceQuery {
    /// True if a sphere at `center` overlaps any surface whose layer bits intersect `layers`.
    fn overlaps_sphere(&self, center: Vec3, radius: f32, layers: u32) -> bool;
}

/// Probe configuration: sphere offset from the player origin, radius and ground layers.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GroundSensor {
    pub offset: Vec3,
    pub radius: f32,
    pub layers: u32,
}

impl GroundSensor {
    pub fn from_config(config: &GroundConfig) -> Self {
        Self {
            offset: Vec3::from_array(config.probe_offset),
            radius: config.distance,
            layers: config.layers,
        }
    }

    pub fn probe_center(&self, origin: Vec3) -> Vec3 {
        origin + self.offset
    }

    pub fn sample<W: SurfaceQuery + ?Sized>(&self, origin: Vec3, world: &W) -> bool {
        world.overlaps_sphere(self.probe_center(origin), self.radius, self.layers)
    }
}

/// Result of the last ground sample.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grounded(pub bool);

/// Axis-aligned box surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBox {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layers: u32,
}

impl SurfaceBox {
    pub fn new(center: Vec3, half_extents: Vec3, layers: u32) -> Self {
        Self {
            center,
            half_extents,
            layers,
        }
    }

    pub fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;
        let closest = center.clamp(min, max);
        closest.distance_squared(center) <= radius * radius
    }
}

impl SurfaceQuery for [SurfaceBox] {
    fn overlaps_sphere(&self, center: Vec3, radius: f32, layers: u32) -> bool {
        self.iter()
            .filter(|surface| surface.layers & layers != 0)
            .any(|surface| surface.overlaps_sphere(center, radius))
    }
}
