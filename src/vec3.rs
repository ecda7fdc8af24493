use std::ops;

use anyhow::{ensure, Result};
use rand::Rng;
use rand_distr::{Distribution, Standard, Uniform};

use crate::CrateRng;

/// A 3-component double-precision vector. Doubles as a point in R^3 and as
/// an RGB color -- the representation is shared, only the interpretation
/// at the call site differs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

const ERR_NORMED_0: &str = "Tried to normalize vector of length 0!";

impl Vec3 {
    pub const ORIGIN: Self = Self::new(0., 0., 0.);
    pub const UNIT_X: Self = Self::new(1., 0., 0.);
    pub const UNIT_Y: Self = Self::new(0., 1., 0.);
    pub const UNIT_Z: Self = Self::new(0., 0., 1.);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// # Example
    /// ```
    /// # use rtweekend::vec3::Vec3;
    /// let a = Vec3::new(1., 2., 3.);
    /// let b = Vec3::normalized(a);
    /// assert!((b.norm() - 1.).abs() < 1e-12);
    /// ```
    pub fn normalized(v: Vec3) -> Self {
        let normed = v / v.norm();
        debug_assert!(!normed.is_nan(), "{}", ERR_NORMED_0);
        normed
    }

    /// # Example
    /// ```
    /// # use rtweekend::vec3::Vec3;
    /// let a = Vec3::new(0., 0., 0.);
    /// assert!(Vec3::checked_normalized(a).is_err());
    /// ```
    pub fn checked_normalized(v: Vec3) -> Result<Self> {
        let norm = v.norm();
        ensure!(norm != 0., ERR_NORMED_0);
        Ok(v / norm)
    }

    /// Uniform sample in `[0, 1)` per component.
    pub fn rand(rng: &mut CrateRng) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    /// Uniform sample in `[min, max)` per component.
    pub fn rand_range(rng: &mut CrateRng, min: f64, max: f64) -> Self {
        let dist = Uniform::new(min, max);
        Self::new(dist.sample(rng), dist.sample(rng), dist.sample(rng))
    }

    /// Rejection-samples a point inside the unit ball (not just its surface).
    pub fn rand_in_unit_ball(rng: &mut CrateRng) -> Self {
        loop {
            let p = Self::rand_range(rng, -1., 1.);
            if p.norm_squared() < 1. {
                return p;
            }
        }
    }

    /// Uniform direction on the surface of the unit sphere.
    pub fn rand_unit_vector(rng: &mut CrateRng) -> Self {
        Self::normalized(Self::rand_unit_sphere_surface(rng))
    }

    fn rand_unit_sphere_surface(rng: &mut CrateRng) -> Self {
        rand_distr::UnitSphere.sample(rng).into()
    }

    /// Rejection-samples a point in the unit disk in the `x`/`y` plane. `z` is 0.
    pub fn rand_unit_disk(rng: &mut CrateRng) -> Self {
        loop {
            let p = Self::new(
                Uniform::new(-1., 1.).sample(rng),
                Uniform::new(-1., 1.).sample(rng),
                0.,
            );
            if p.norm_squared() < 1. {
                return p;
            }
        }
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.x.powi(2) + self.y.powi(2) + self.z.powi(2)
    }

    /// # Example
    /// ```
    /// # use rtweekend::vec3::Vec3;
    /// let a = Vec3::new(4., 8., 10.);
    /// let b = Vec3::new(9., 2., 7.);
    /// assert_eq!(a.dot(b), 122.);
    /// ```
    pub fn dot(&self, rhs: Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// # Example
    /// ```
    /// # use rtweekend::vec3::Vec3;
    /// let a = Vec3::new(2., 3., 4.);
    /// let b = Vec3::new(5., 6., 7.);
    /// assert_eq!(a.cross(b), Vec3::new(-3., 6., -3.));
    /// ```
    pub fn cross(&self, rhs: Vec3) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    pub fn reflect(&self, normal: Vec3) -> Self {
        *self - 2. * self.dot(normal) * normal
    }

    /// Refract `self` (a unit vector) through a surface with the given
    /// outward normal and ratio `eta_i_over_eta_t`.
    pub fn refract(&self, normal: Vec3, eta_i_over_eta_t: f64) -> Self {
        let cos_theta = (-*self).dot(normal).min(1.);
        let r_out_perp = eta_i_over_eta_t * (*self + cos_theta * normal);
        let r_out_parallel = -(1. - r_out_perp.norm_squared()).abs().sqrt() * normal;
        r_out_perp + r_out_parallel
    }

    /// True when every component is smaller in magnitude than `1e-8`.
    pub fn near_zero(&self) -> bool {
        const EPS: f64 = 1e-8;
        self.x.abs() < EPS && self.y.abs() < EPS && self.z.abs() < EPS
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl ops::Index<Axis> for Vec3 {
    type Output = f64;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl ops::IndexMut<Axis> for Vec3 {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}
impl ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
impl ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

/// Multiply the corresponding components together (used to combine a
/// material's albedo with an incoming ray color).
impl ops::Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}
impl ops::Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}
impl ops::MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl ops::Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}
impl ops::DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

/// A point in R^3. Distinguished from [`Vec3`] only by name.
pub type Point3 = Vec3;
/// An RGB color, each component nominally in `[0, 1]`.
pub type Color = Vec3;

#[derive(Copy, Clone, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}
impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}
impl Distribution<Axis> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Axis {
        match Uniform::new(0u8, 3).sample(rng) {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_zero_detects_degenerate_vector() {
        assert!(Vec3::new(1e-9, -1e-9, 0.).near_zero());
        assert!(!Vec3::new(1e-9, 0.1, 0.).near_zero());
    }

    #[test]
    fn reflect_preserves_length_against_axis_aligned_normal() {
        let v = Vec3::new(1., -1., 0.);
        let n = Vec3::UNIT_Y;
        let r = v.reflect(n);
        assert!((r.norm() - v.norm()).abs() < 1e-12);
        assert_eq!(r, Vec3::new(1., 1., 0.));
    }

    #[test]
    fn index_matches_named_field() {
        let v = Vec3::new(1., 2., 3.);
        assert_eq!(v[Axis::X], v.x);
        assert_eq!(v[Axis::Y], v.y);
        assert_eq!(v[Axis::Z], v.z);
    }
}
