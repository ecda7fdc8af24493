use crate::vec3::{Point3, Vec3};

/// A parametric line `origin + t * dir`, carrying a shutter `time` in
/// `[0, 1]` used only to interpolate moving geometry.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub dir: Vec3,
    pub time: f64,
}

impl Ray {
    pub fn new(origin: Point3, dir: Vec3, time: f64) -> Self {
        Self { origin, dir, time }
    }

    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_interpolates_along_direction() {
        let r = Ray::new(Point3::new(1., 2., 3.), Vec3::new(0., 0., 1.), 0.);
        assert_eq!(r.at(2.), Point3::new(1., 2., 5.));
    }
}
