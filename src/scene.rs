use std::sync::Arc;

use rand::Rng;

use crate::bvh::BvhNode;
use crate::hittable::{Hittable, HittableList};
use crate::material::{Dielectric, Lambertian, Material, Metal};
use crate::sphere::Sphere;
use crate::vec3::{Color, Point3, Vec3};
use crate::CrateRng;

const FEATURE_SPHERES: [(f64, f64, f64); 3] = [(0., 1., 0.), (-4., 1., 0.), (4., 1., 0.)];
const FEATURE_RADIUS: f64 = 1.0;
const EXCLUSION_CENTER: Point3 = Point3::new(4., 0.2, 0.);
const EXCLUSION_RADIUS: f64 = 0.9;
const FIELD_HALF_EXTENT: i32 = 11;

/// Builds the classic "book cover" demo scene: a huge ground sphere, a
/// scattered field of small spheres with randomly chosen materials (some
/// of the diffuse ones given linear motion), and three named feature
/// spheres. Returns the world wrapped in a [`BvhNode`] for fast querying.
pub fn book_cover(rng: &mut CrateRng) -> Arc<dyn Hittable> {
    let mut world = HittableList::new();

    let ground_mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.push(Sphere::stationary(Point3::new(0., -1000., 0.), 1000., ground_mat));

    for a in -FIELD_HALF_EXTENT..FIELD_HALF_EXTENT {
        for b in -FIELD_HALF_EXTENT..FIELD_HALF_EXTENT {
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - EXCLUSION_CENTER).norm() <= EXCLUSION_RADIUS {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let mat: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = Color::rand(rng) * Color::rand(rng);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Vec3::rand_range(rng, 0.5, 1.);
                let fuzz = rng.gen_range(0.0..0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                Arc::new(Dielectric::new(1.5))
            };

            if choose_mat < 0.8 {
                let center1 = center + Vec3::new(0., rng.gen_range(0.0..0.5), 0.);
                world.push(Sphere::moving(center, center1, 0.2, mat));
            } else {
                world.push(Sphere::stationary(center, 0.2, mat));
            }
        }
    }

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    world.push(Sphere::stationary(
        Point3::new(FEATURE_SPHERES[0].0, FEATURE_SPHERES[0].1, FEATURE_SPHERES[0].2),
        FEATURE_RADIUS,
        glass,
    ));

    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    world.push(Sphere::stationary(
        Point3::new(FEATURE_SPHERES[1].0, FEATURE_SPHERES[1].1, FEATURE_SPHERES[1].2),
        FEATURE_RADIUS,
        diffuse,
    ));

    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    world.push(Sphere::stationary(
        Point3::new(FEATURE_SPHERES[2].0, FEATURE_SPHERES[2].1, FEATURE_SPHERES[2].2),
        FEATURE_RADIUS,
        metal,
    ));

    BvhNode::new(world.into_objects())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::ray::Ray;
    use rand::SeedableRng;

    #[test]
    fn book_cover_builds_a_nonempty_tree_that_hits_the_ground() {
        let mut rng = CrateRng::seed_from_u64(1);
        let world = book_cover(&mut rng);
        let ray = Ray::new(Point3::new(0., 5., 0.), Vec3::new(0., -1., 0.), 0.);
        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_some());
    }

    #[test]
    fn feature_spheres_are_reachable() {
        let mut rng = CrateRng::seed_from_u64(2);
        let world = book_cover(&mut rng);
        let ray = Ray::new(Point3::new(0., 1., 10.), Vec3::new(0., 0., -1.), 0.);
        let hit = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.p.z - 1.).abs() < 1e-6);
    }
}
