use std::sync::Arc;

use crate::aabb::Aabb;
use crate::hittable::{Hit, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;

/// A bounding-volume-hierarchy node. Leaves hold the objects directly;
/// internal nodes hold exactly two children and prune the far subtree
/// whenever the ray misses their bounding box.
#[derive(Debug)]
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Builds a balanced-ish tree over `objects` by recursively splitting
    /// on the longest axis of the running bounding box and recursing on
    /// the median.
    pub fn new(mut objects: Vec<Arc<dyn Hittable>>) -> Arc<dyn Hittable> {
        assert!(!objects.is_empty(), "BvhNode::new requires at least one object");

        let mut bbox = Aabb::EMPTY;
        for obj in &objects {
            bbox = Aabb::union(bbox, obj.bounding_box());
        }
        let axis = bbox.longest_axis();

        match objects.len() {
            1 => return objects.pop().unwrap(),
            2 => {
                let right = objects.pop().unwrap();
                let left = objects.pop().unwrap();
                let bbox = Aabb::union(left.bounding_box(), right.bounding_box());
                return Arc::new(Self { left, right, bbox });
            }
            _ => {}
        }

        objects.sort_by(|a, b| {
            let ca = a.bounding_box().axis_interval(axis).min;
            let cb = b.bounding_box().axis_interval(axis).min;
            ca.partial_cmp(&cb).expect("bounding box interval is NaN")
        });

        let mid = objects.len() / 2;
        let right_half = objects.split_off(mid);
        let left = Self::new(objects);
        let right = Self::new(right_half);
        let bbox = Aabb::union(left.bounding_box(), right.bounding_box());

        Arc::new(Self { left, right, bbox })
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<Hit> {
        if !self.bbox.hit(ray, t_range) {
            return None;
        }

        let hit_left = self.left.hit(ray, t_range);
        let right_range = Interval::new(t_range.min, hit_left.as_ref().map_or(t_range.max, |h| h.t));
        let hit_right = self.right.hit(ray, right_range);

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::material::Material;
    use crate::ray::Ray;
    use crate::sphere::Sphere;
    use crate::vec3::{Color, Point3, Vec3};

    fn mat() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn single_object_tree_is_the_object_itself() {
        let s: Arc<dyn Hittable> = Arc::new(Sphere::stationary(Point3::ORIGIN, 1., mat()));
        let tree = BvhNode::new(vec![s.clone()]);
        let ray = Ray::new(Point3::new(0., 0., -5.), Vec3::new(0., 0., 1.), 0.);
        assert_eq!(
            tree.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap().t,
            s.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap().t
        );
    }

    #[test]
    fn tree_finds_nearest_of_many_spheres() {
        let spheres: Vec<Arc<dyn Hittable>> = (0..10)
            .map(|i| {
                Arc::new(Sphere::stationary(Point3::new(0., 0., -2. - i as f64), 0.4, mat()))
                    as Arc<dyn Hittable>
            })
            .collect();
        let tree = BvhNode::new(spheres);
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(0., 0., -1.), 0.);
        let hit = tree.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((hit.t - 1.6).abs() < 1e-9);
    }

    #[test]
    fn ray_missing_bbox_entirely_returns_none() {
        let spheres: Vec<Arc<dyn Hittable>> = (0..5)
            .map(|i| Arc::new(Sphere::stationary(Point3::new(i as f64 * 3., 0., 0.), 0.4, mat())) as Arc<dyn Hittable>)
            .collect();
        let tree = BvhNode::new(spheres);
        let ray = Ray::new(Point3::new(0., 100., 0.), Vec3::new(0., 0., 1.), 0.);
        assert!(tree.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }
}
