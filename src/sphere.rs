use std::sync::Arc;

use crate::aabb::Aabb;
use crate::hittable::{Hit, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// A sphere, optionally translating linearly between two centers over the
/// camera's shutter interval (`time` in `[0, 1]`).
#[derive(Debug, Clone)]
pub struct Sphere {
    center0: Point3,
    /// `None` for a stationary sphere.
    center_delta: Option<Vec3>,
    radius: f64,
    mat: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// A sphere fixed at `center`.
    pub fn stationary(center: Point3, radius: f64, mat: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.);
        let rvec = Vec3::splat(radius);
        Self {
            center0: center,
            center_delta: None,
            radius,
            mat,
            bbox: Aabb::from_points(center - rvec, center + rvec),
        }
    }

    /// A sphere whose center moves linearly from `center0` at `time=0` to
    /// `center1` at `time=1`.
    pub fn moving(center0: Point3, center1: Point3, radius: f64, mat: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.);
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);
        Self {
            center0,
            center_delta: Some(center1 - center0),
            radius,
            mat,
            bbox: Aabb::union(box0, box1),
        }
    }

    fn center(&self, time: f64) -> Point3 {
        match self.center_delta {
            Some(delta) => self.center0 + time * delta,
            None => self.center0,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<Hit> {
        let center = self.center(ray.time);
        let oc = center - ray.origin;
        let a = ray.dir.norm_squared();
        let h = ray.dir.dot(oc);
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0. {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let mut root = (h - sqrtd) / a;
        if !t_range.surrounds(root) {
            root = (h + sqrtd) / a;
            if !t_range.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - center) / self.radius;
        Some(Hit::new(ray, p, outward_normal, root, self.mat.clone()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
