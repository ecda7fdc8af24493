use std::sync::Arc;

use rand::Rng;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::ray::Ray;
use crate::vec3::{Color, Point3, Vec3};
use crate::CrateRng;

/// Configurable camera parameters, set between construction and [`Camera::init`].
#[derive(Debug, Clone, Copy)]
pub struct CameraParams {
    pub samples: u32,
    pub max_depth: u32,
    pub vfov: f64,
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: Vec3,
    pub defocus_angle: f64,
    pub focus_dist: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            samples: 100,
            max_depth: 50,
            vfov: 20.,
            lookfrom: Point3::new(13., 2., 3.),
            lookat: Point3::ORIGIN,
            vup: Vec3::UNIT_Y,
            defocus_angle: 0.6,
            focus_dist: 10.,
        }
    }
}

/// A thin-lens, shutter-sampling camera. `init` derives the eye frame and
/// viewport geometry once; `get_ray` and `ray_color` are then called per
/// sample from render worker threads.
#[derive(Debug)]
pub struct Camera {
    params: CameraParams,
    image_width: u32,
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    sample_scale: f64,
}

impl Camera {
    pub fn init(params: CameraParams, image_width: u32, image_height: u32) -> Self {
        let center = params.lookfrom;

        let theta = params.vfov.to_radians();
        let h = (theta / 2.).tan();
        let viewport_height = 2. * h * params.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        let w = Vec3::normalized(params.lookfrom - params.lookat);
        let u = Vec3::normalized(params.vup.cross(w));
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - params.focus_dist * w - viewport_u / 2. - viewport_v / 2.;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = params.focus_dist * (params.defocus_angle / 2.).to_radians().tan();
        let defocus_disk_u = u * defocus_radius;
        let defocus_disk_v = v * defocus_radius;

        Self {
            params,
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_disk_u,
            defocus_disk_v,
            sample_scale: 1. / params.samples as f64,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples(&self) -> u32 {
        self.params.samples
    }

    pub fn sample_scale(&self) -> f64 {
        self.sample_scale
    }

    /// Generates one jittered, shutter-sampled, defocus-sampled ray through
    /// pixel `(x, y)`.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut CrateRng) -> Ray {
        let offset = Vec3::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5, 0.);
        let pixel_sample = self.pixel00_loc
            + (x as f64 + offset.x) * self.pixel_delta_u
            + (y as f64 + offset.y) * self.pixel_delta_v;

        let origin = if self.params.defocus_angle <= 0. {
            self.center
        } else {
            let p = Vec3::rand_unit_disk(rng);
            self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
        };
        let direction = pixel_sample - origin;
        let time = rng.gen::<f64>();

        Ray::new(origin, direction, time)
    }

    /// Recursively traces `ray` through `world`, consulting materials at
    /// each bounce, down to `depth` remaining bounces.
    pub fn ray_color(
        &self,
        ray: &Ray,
        depth: u32,
        world: &Arc<dyn Hittable>,
        rng: &mut CrateRng,
    ) -> Color {
        if depth == 0 {
            return Color::ORIGIN;
        }

        if let Some(hit) = world.hit(ray, Interval::new(0.001, f64::INFINITY)) {
            return match hit.mat.scatter(ray, &hit, rng) {
                Some(scatter) => {
                    scatter.attenuation * self.ray_color(&scatter.ray, depth - 1, world, rng)
                }
                None => Color::ORIGIN,
            };
        }

        let unit_dir = Vec3::normalized(ray.dir);
        let a = 0.5 * (unit_dir.y + 1.);
        (1. - a) * Color::new(1., 1., 1.) + a * Color::new(0.5, 0.7, 1.0)
    }

    pub fn max_depth(&self) -> u32 {
        self.params.max_depth
    }

    /// Accumulates `samples` samples for pixel `(x, y)`, gamma-corrects,
    /// and returns the three output bytes in RGB order.
    pub fn render_pixel(&self, x: u32, y: u32, world: &Arc<dyn Hittable>, rng: &mut CrateRng) -> [u8; 3] {
        let mut color = Color::ORIGIN;
        for _ in 0..self.params.samples {
            let ray = self.get_ray(x, y, rng);
            color += self.ray_color(&ray, self.params.max_depth, world, rng);
        }
        color *= self.sample_scale;

        let gamma = |c: f64| if c > 0. { c.sqrt() } else { 0. };
        let to_byte = |c: f64| {
            let c = Interval::new(0.000, 0.999).clamp(gamma(c));
            (256. * c) as u8
        };
        [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use rand::SeedableRng;

    fn rng() -> CrateRng {
        CrateRng::seed_from_u64(7)
    }

    #[test]
    fn sky_gradient_at_straight_up_is_blue_tinted() {
        let cam = Camera::init(CameraParams::default(), 100, 100);
        let world: Arc<dyn Hittable> = Arc::new(HittableList::new());
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(0., 1., 0.), 0.);
        let color = cam.ray_color(&ray, 10, &world, &mut rng());
        assert_eq!(color, Color::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn sky_gradient_at_straight_down_is_white() {
        let cam = Camera::init(CameraParams::default(), 100, 100);
        let world: Arc<dyn Hittable> = Arc::new(HittableList::new());
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(0., -1., 0.), 0.);
        let color = cam.ray_color(&ray, 10, &world, &mut rng());
        assert_eq!(color, Color::new(1., 1., 1.));
    }

    #[test]
    fn zero_depth_returns_black_regardless_of_hit() {
        let cam = Camera::init(CameraParams::default(), 100, 100);
        let world: Arc<dyn Hittable> = Arc::new(HittableList::new());
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(0., 0., -1.), 0.);
        assert_eq!(cam.ray_color(&ray, 0, &world, &mut rng()), Color::ORIGIN);
    }

    #[test]
    fn gamma_round_trip_is_approximately_identity() {
        for i in 0..=10 {
            let c = i as f64 / 10.;
            let gamma = c.sqrt();
            assert!((gamma * gamma - c).abs() < 1e-12);
        }
    }
}
