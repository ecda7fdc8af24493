use crate::interval::Interval;
use crate::ray::Ray;
use crate::vec3::{Axis, Point3};

/// An axis-aligned bounding box, stored as one [`Interval`] per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Self = Self::from_intervals(Interval::EMPTY, Interval::EMPTY, Interval::EMPTY);
    pub const UNIVERSE: Self =
        Self::from_intervals(Interval::UNIVERSE, Interval::UNIVERSE, Interval::UNIVERSE);

    pub const fn from_intervals(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Box spanning two corner points, in either order.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Union of two boxes.
    ///
    /// # Example
    /// ```
    /// # use rtweekend::aabb::Aabb;
    /// # use rtweekend::vec3::Point3;
    /// let a = Aabb::from_points(Point3::new(0., 0., 0.), Point3::new(1., 1., 1.));
    /// assert_eq!(Aabb::union(a, a), a);
    /// ```
    pub fn union(a: Aabb, b: Aabb) -> Self {
        Self {
            x: Interval::union(a.x, b.x),
            y: Interval::union(a.y, b.y),
            z: Interval::union(a.z, b.z),
        }
    }

    pub fn axis_interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// The index of the widest axis; ties break toward the lower index.
    pub fn longest_axis(&self) -> Axis {
        if self.x.size() >= self.y.size() && self.x.size() >= self.z.size() {
            Axis::X
        } else if self.y.size() >= self.z.size() {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Slab-test intersection. Division by zero is allowed to propagate as
    /// IEEE infinities; the resulting comparisons still resolve to a
    /// correct miss.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in Axis::ALL {
            let ax = self.axis_interval(axis);
            let adinv = 1.0 / ray.dir[axis];

            let mut t0 = (ax.min - ray.origin[axis]) * adinv;
            let mut t1 = (ax.max - ray.origin[axis]) * adinv;
            if adinv < 0. {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = ray_t.min.max(t0);
            ray_t.max = ray_t.max.min(t1);

            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
