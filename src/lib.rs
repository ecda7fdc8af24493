pub mod aabb;
pub mod bvh;
pub mod camera;
pub mod config;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod vec3;

pub use camera::{Camera, CameraParams};
pub use config::Config;
pub use hittable::{Hit, Hittable, HittableList};
pub use interval::Interval;
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use ray::Ray;
pub use renderer::Renderer;
pub use vec3::{Axis, Color, Point3, Vec3};

/// Each render worker owns one of these; seeded independently so workers
/// never contend on a shared generator.
pub type CrateRng = rand::rngs::SmallRng;

use anyhow::{Context, Result};

pub trait ResultExt<T> {
    fn render_context(self, what: &str) -> Result<T>;
}
impl<T> ResultExt<T> for Result<T> {
    /// Attach a short label identifying which render-lifecycle step failed.
    fn render_context(self, what: &str) -> Result<T> {
        self.with_context(|| format!("render step failed: {what}"))
    }
}
