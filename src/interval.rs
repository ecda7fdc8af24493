/// A closed `[min, max]` range of doubles.
///
/// `Interval::EMPTY` and `Interval::UNIVERSE` are the two degenerate
/// endpoints of the lattice: nothing contains `EMPTY`, everything is
/// `surrounds`ed by `UNIVERSE`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const EMPTY: Self = Self::new(f64::INFINITY, f64::NEG_INFINITY);
    pub const UNIVERSE: Self = Self::new(f64::NEG_INFINITY, f64::INFINITY);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Union of two intervals: componentwise min-of-mins, max-of-maxes.
    ///
    /// # Example
    /// ```
    /// # use rtweekend::interval::Interval;
    /// let a = Interval::new(-2., 3.);
    /// let b = Interval::new(-5., 1.);
    /// let u = Interval::union(a, b);
    /// assert_eq!(u, Interval::new(-5., 3.));
    /// ```
    pub fn union(a: Interval, b: Interval) -> Self {
        Self::new(a.min.min(b.min), a.max.max(b.max))
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive containment: `min <= x <= max`.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Exclusive containment: `min < x < max`.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Grow the interval symmetrically by `delta / 2` on each side.
    pub fn expand(&self, delta: f64) -> Self {
        let padding = delta / 2.;
        Self::new(self.min - padding, self.max + padding)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_idempotent() {
        let a = Interval::new(1., 4.);
        assert_eq!(Interval::union(a, a), a);
    }

    #[test]
    fn union_takes_max_of_maxes_not_the_source_typo() {
        // Regression test for a historical typo (`a.max >= -b.max`) that
        // would have produced `Interval::new(-3., 2.)` here instead.
        let a = Interval::new(-3., 2.);
        let b = Interval::new(-1., 5.);
        assert_eq!(Interval::union(a, b), Interval::new(-3., 5.));
    }

    #[test]
    fn surrounds_is_strict_contains_is_inclusive() {
        let i = Interval::new(0., 1.);
        assert!(i.contains(0.) && i.contains(1.));
        assert!(!i.surrounds(0.) && !i.surrounds(1.));
        assert!(i.surrounds(0.5));
    }

    #[test]
    fn expand_grows_symmetrically() {
        let i = Interval::new(1., 3.).expand(2.);
        assert_eq!(i, Interval::new(0., 4.));
    }

    #[test]
    fn empty_contains_nothing_universe_contains_everything() {
        assert!(!Interval::EMPTY.contains(0.));
        assert!(Interval::UNIVERSE.surrounds(1e300));
    }
}
