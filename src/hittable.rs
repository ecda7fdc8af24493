use std::fmt::Debug;
use std::sync::Arc;

use crate::aabb::Aabb;
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// The result of a successful ray/geometry intersection.
pub struct Hit {
    pub p: Point3,
    /// Unit-length, always oriented against the incident ray.
    pub normal: Vec3,
    pub mat: Arc<dyn Material>,
    pub t: f64,
    pub front_face: bool,
}

impl Hit {
    /// Builds a [`Hit`], orienting `outward_normal` against `ray` and
    /// recording which face was struck.
    pub fn new(ray: &Ray, p: Point3, outward_normal: Vec3, t: f64, mat: Arc<dyn Material>) -> Self {
        let front_face = ray.dir.dot(outward_normal) < 0.;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            mat,
            t,
            front_face,
        }
    }
}

/// A value that can be intersected by a ray and that owns a bounding box.
/// `Sphere`, `HittableList`, and `BvhNode` all satisfy this contract, which
/// is what lets a `BvhNode` hold other `BvhNode`s as children.
pub trait Hittable: Send + Sync + Debug {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<Hit>;
    fn bounding_box(&self) -> Aabb;
}

/// An ordered collection of hittables with a cached union bounding box.
#[derive(Default, Debug)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: Hittable + 'static>(&mut self, object: T) {
        self.push_arc(Arc::new(object));
    }

    pub fn push_arc(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::union(self.bbox, object.bounding_box());
        self.objects.push(object);
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Consumes the list, handing back its objects for BVH construction.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, t_range: Interval) -> Option<Hit> {
        let mut closest = t_range.max;
        let mut result = None;
        for object in &self.objects {
            if let Some(hit) = object.hit(ray, Interval::new(t_range.min, closest)) {
                closest = hit.t;
                result = Some(hit);
            }
        }
        result
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
