use std::fmt::Debug;

use rand::Rng;

use crate::hittable::Hit;
use crate::ray::Ray;
use crate::vec3::{Color, Vec3};
use crate::CrateRng;

/// What a [`Material`] hands back from a successful scatter: the light
/// weighting to apply and the ray to continue tracing.
pub struct Scatter {
    pub attenuation: Color,
    pub ray: Ray,
}

/// A surface's response to an incident ray: absorb (`None`) or scatter.
pub trait Material: Send + Sync + Debug {
    fn scatter(&self, ray_in: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter>;
}

/// Perfectly matte surface: bounces light in a direction biased toward the
/// normal, always scattering.
#[derive(Debug, Clone, Copy)]
pub struct Lambertian {
    pub albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        let mut direction = hit.normal + Vec3::rand_unit_vector(rng);
        if direction.near_zero() {
            direction = hit.normal;
        }
        Some(Scatter {
            attenuation: self.albedo,
            ray: Ray::new(hit.p, direction, ray_in.time),
        })
    }
}

/// Reflective surface with a `fuzz` parameter that jitters the reflected
/// ray; fuzz is clamped to `[0, 1]` at construction.
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    pub albedo: Color,
    pub fuzz: f64,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        let reflected = ray_in.dir.reflect(hit.normal);
        let reflected = Vec3::normalized(reflected) + self.fuzz * Vec3::rand_unit_vector(rng);
        if reflected.dot(hit.normal) <= 0. {
            // Fuzz pushed the scattered ray below the surface: absorbed.
            return None;
        }
        Some(Scatter {
            attenuation: self.albedo,
            ray: Ray::new(hit.p, reflected, ray_in.time),
        })
    }
}

/// A transparent dielectric (glass, water, ...) that probabilistically
/// reflects or refracts according to Schlick's approximation.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    pub refraction_index: f64,
}

impl Dielectric {
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    /// Schlick's approximation to the Fresnel reflectance.
    fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
        let r0 = (1. - refraction_index) / (1. + refraction_index);
        let r0 = r0 * r0;
        r0 + (1. - r0) * (1. - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        let eta = if hit.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_dir = Vec3::normalized(ray_in.dir);
        let cos_theta = (-unit_dir).dot(hit.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = eta * sin_theta > 1.0;
        let direction = if cannot_refract || Self::reflectance(cos_theta, eta) > rng.gen::<f64>() {
            unit_dir.reflect(hit.normal)
        } else {
            unit_dir.refract(hit.normal, eta)
        };

        Some(Scatter {
            attenuation: Color::new(1., 1., 1.),
            ray: Ray::new(hit.p, direction, ray_in.time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::Point3;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn make_rng() -> CrateRng {
        CrateRng::seed_from_u64(42)
    }

    fn sample_hit(front_face: bool) -> Hit {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        Hit {
            p: Point3::new(0., 0., -1.),
            normal: Vec3::new(0., 0., -1.),
            mat,
            t: 4.,
            front_face,
        }
    }

    #[test]
    fn lambertian_always_scatters_with_its_albedo() {
        let mut rng = make_rng();
        let lam = Lambertian::new(Color::new(0.5, 0.5, 0.5));
        let ray_in = Ray::new(Point3::new(0., 0., -5.), Vec3::new(0., 0., 1.), 0.);
        let hit = sample_hit(true);
        let scattered = lam.scatter(&ray_in, &hit, &mut rng).unwrap();
        assert_eq!(scattered.attenuation, Color::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn metal_zero_fuzz_reflects_exactly() {
        let mut rng = make_rng();
        let metal = Metal::new(Color::splat(1.0), 0.0);
        let ray_in = Ray::new(Point3::new(0., 0., -5.), Vec3::new(0., 0., 1.), 0.);
        let hit = sample_hit(true);
        let scattered = metal.scatter(&ray_in, &hit, &mut rng).unwrap();
        let expected = Vec3::normalized(ray_in.dir.reflect(hit.normal));
        assert!((scattered.ray.dir - expected).norm() < 1e-12);
    }

    #[test]
    fn metal_fuzz_is_clamped_to_one() {
        let metal = Metal::new(Color::splat(1.0), 5.0);
        assert_eq!(metal.fuzz, 1.0);
    }

    #[test]
    fn dielectric_total_internal_reflection_never_refracts() {
        let mut rng = make_rng();
        let glass = Dielectric::new(1.5);
        // 80 degrees from the normal, from inside the medium (front_face=false).
        let theta = 80f64.to_radians();
        let unit_dir = Vec3::new(theta.sin(), -theta.cos(), 0.);
        let ray_in = Ray::new(Point3::ORIGIN, unit_dir, 0.);
        let hit = Hit {
            p: Point3::new(0., -1., 0.),
            normal: Vec3::new(0., 1., 0.),
            mat: Arc::new(glass),
            t: 1.,
            front_face: false,
        };
        let scattered = glass.scatter(&ray_in, &hit, &mut rng).unwrap();
        let reflected = unit_dir.reflect(hit.normal);
        assert!((scattered.ray.dir - reflected).norm() < 1e-9);
    }
}
