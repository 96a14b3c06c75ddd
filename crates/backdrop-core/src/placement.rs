//! Spatial bookkeeping for one render pass.
//!
//! [`Placement`] is an arena of bounding boxes committed so far. Shape
//! generators ask it for candidate anchor points that are biased toward the
//! container edges, and commit a box only when it stays clear of the center
//! zone and of every earlier box. The arena is created for a single pass and
//! dropped with it.

use log::trace;

use crate::{
    geometry::{Bounds, Point, Size},
    rng::RandomSource,
};

/// Attempt ceiling for single-shape generators.
pub const SHAPE_ATTEMPTS: usize = 20;

/// Attempt ceiling for each confetti piece.
pub const CONFETTI_ATTEMPTS: usize = 10;

/// Rules for keeping the middle of a container clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterRules {
    enabled: bool,
    radius: f32,
}

impl CenterRules {
    /// Creates rules with `radius` expressed as a fraction of the shorter side.
    pub fn new(enabled: bool, radius: f32) -> Self {
        Self { enabled, radius }
    }

    /// Rules that never exclude anything.
    pub fn disabled() -> Self {
        Self::new(false, 0.0)
    }

    pub fn enabled(self) -> bool {
        self.enabled
    }

    pub fn radius(self) -> f32 {
        self.radius
    }
}

impl Default for CenterRules {
    fn default() -> Self {
        Self::new(true, 0.22)
    }
}

/// Committed bounding boxes plus the area they live in.
#[derive(Debug, Clone)]
pub struct Placement {
    area: Size,
    center: CenterRules,
    placed: Vec<Bounds>,
}

impl Placement {
    /// Creates an empty arena for an area of the given size.
    pub fn new(area: Size, center: CenterRules) -> Self {
        Self {
            area,
            center,
            placed: Vec::new(),
        }
    }

    /// Returns the drawable area.
    pub fn area(&self) -> Size {
        self.area
    }

    /// Returns every box committed so far, in commit order.
    pub fn placed(&self) -> &[Bounds] {
        &self.placed
    }

    /// Draws a point whose coordinates are skewed toward the high end of
    /// each axis by the transform `v ↦ 1 - (1 - v)²`.
    ///
    /// Consumes exactly two draws, x first.
    pub fn biased_point<R: RandomSource>(&self, rng: &mut R) -> Point {
        let rx = rng.next_f64();
        let ry = rng.next_f64();
        Point::new(
            (bias(rx) * f64::from(self.area.width())) as f32,
            (bias(ry) * f64::from(self.area.height())) as f32,
        )
    }

    /// Returns true when center avoidance is on and `point` lies strictly
    /// inside the exclusion circle.
    pub fn in_center_zone(&self, point: Point) -> bool {
        if !self.center.enabled() {
            return false;
        }
        let limit = self.center.radius() * self.area.min_side();
        point.sub_point(self.area.center()).hypot() < limit
    }

    /// Returns true if `bounds` intersects any committed box.
    ///
    /// The test is closed, not half-open: a candidate that only touches a
    /// committed box along an edge or at a corner is rejected.
    pub fn overlaps(&self, bounds: Bounds) -> bool {
        self.placed.iter().any(|placed| placed.intersects(bounds))
    }

    /// Bounded rejection sampling.
    ///
    /// Each attempt draws a biased anchor point. Anchors inside the center
    /// zone are rejected outright; otherwise `candidate` derives the shape's
    /// geometry and bounding box from the anchor. The first candidate whose
    /// box clears every committed box is committed and its geometry returned.
    /// After `max_attempts` failures the result is `None`, which callers treat
    /// as "draw nothing".
    pub fn try_place<R, T, F>(
        &mut self,
        rng: &mut R,
        max_attempts: usize,
        mut candidate: F,
    ) -> Option<T>
    where
        R: RandomSource,
        F: FnMut(&mut R, Point) -> (Bounds, T),
    {
        for attempt in 0..max_attempts {
            let anchor = self.biased_point(rng);
            if self.in_center_zone(anchor) {
                continue;
            }

            let (bounds, geometry) = candidate(rng, anchor);
            if self.overlaps(bounds) {
                continue;
            }

            trace!(attempt, placed = self.placed.len(); "Committed shape bounds");
            self.placed.push(bounds);
            return Some(geometry);
        }

        trace!(max_attempts; "No placement found");
        None
    }
}

fn bias(v: f64) -> f64 {
    1.0 - (1.0 - v) * (1.0 - v)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::rng::Mulberry32;

    struct Scripted {
        values: Vec<f64>,
        cursor: usize,
    }

    impl Scripted {
        fn new(values: Vec<f64>) -> Self {
            Self { values, cursor: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let value = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            value
        }
    }

    fn square(x: f32, y: f32, side: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(side, side))
    }

    #[test]
    fn test_biased_point_transform() {
        let placement = Placement::new(Size::new(200.0, 100.0), CenterRules::disabled());
        let mut rng = Scripted::new(vec![0.5, 0.0]);

        let point = placement.biased_point(&mut rng);

        // 1 - 0.25 = 0.75 of the width, 0 of the height
        assert_approx_eq!(f32, point.x(), 150.0);
        assert_approx_eq!(f32, point.y(), 0.0);
        assert_eq!(rng.cursor, 2);
    }

    #[test]
    fn test_in_center_zone() {
        let placement = Placement::new(Size::new(800.0, 600.0), CenterRules::new(true, 0.22));

        // Limit is 0.22 * 600 = 132
        assert!(placement.in_center_zone(Point::new(400.0, 300.0)));
        assert!(placement.in_center_zone(Point::new(500.0, 300.0)));
        assert!(!placement.in_center_zone(Point::new(532.0, 300.0)));
        assert!(!placement.in_center_zone(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_in_center_zone_disabled() {
        let placement = Placement::new(Size::new(800.0, 600.0), CenterRules::new(false, 0.22));
        assert!(!placement.in_center_zone(Point::new(400.0, 300.0)));
    }

    #[test]
    fn test_overlaps() {
        let mut placement = Placement::new(Size::new(100.0, 100.0), CenterRules::disabled());
        let mut rng = Scripted::new(vec![0.0]);
        let committed = placement.try_place(&mut rng, 1, |_, _| (square(0.0, 0.0, 10.0), ()));
        assert!(committed.is_some());

        assert!(placement.overlaps(square(5.0, 5.0, 10.0)));
        assert!(!placement.overlaps(square(20.0, 20.0, 10.0)));
    }

    #[test]
    fn test_overlaps_rejects_touching_boxes() {
        let mut placement = Placement::new(Size::new(100.0, 100.0), CenterRules::disabled());
        let mut rng = Scripted::new(vec![0.0]);
        let committed = placement.try_place(&mut rng, 1, |_, _| (square(0.0, 0.0, 10.0), ()));
        assert!(committed.is_some());

        assert!(placement.overlaps(square(10.0, 0.0, 10.0)));
        assert!(placement.overlaps(square(0.0, 10.0, 10.0)));
        assert!(placement.overlaps(square(10.0, 10.0, 10.0)));
        assert!(!placement.overlaps(square(10.5, 0.0, 10.0)));
    }

    #[test]
    fn test_try_place_commits_first_clear_candidate() {
        let mut placement = Placement::new(Size::new(100.0, 100.0), CenterRules::disabled());
        let mut rng = Mulberry32::new(7);

        let first = placement.try_place(&mut rng, SHAPE_ATTEMPTS, |_, p| (p.to_bounds(Size::new(4.0, 4.0)), p));
        assert!(first.is_some());
        assert_eq!(placement.placed().len(), 1);
    }

    #[test]
    fn test_try_place_exhausts_attempts() {
        let mut placement = Placement::new(Size::new(100.0, 100.0), CenterRules::disabled());
        let mut rng = Mulberry32::new(7);

        // A box covering everything blocks all later candidates.
        placement.try_place(&mut rng, 1, |_, _| (square(-1000.0, -1000.0, 3000.0), ()));

        let mut calls = 0;
        let result = placement.try_place(&mut rng, SHAPE_ATTEMPTS, |_, p| {
            calls += 1;
            (p.to_bounds(Size::new(1.0, 1.0)), ())
        });

        assert!(result.is_none());
        assert_eq!(calls, SHAPE_ATTEMPTS);
        assert_eq!(placement.placed().len(), 1);
    }

    #[test]
    fn test_try_place_skips_center_without_calling_candidate() {
        let mut placement = Placement::new(Size::new(100.0, 100.0), CenterRules::new(true, 0.5));
        // bias(1 - sqrt(0.5)) = 0.5, so every anchor lands on the center
        let centered = 1.0 - 0.5_f64.sqrt();
        let mut rng = Scripted::new(vec![centered]);

        let mut calls = 0;
        let result = placement.try_place(&mut rng, CONFETTI_ATTEMPTS, |_, p| {
            calls += 1;
            (p.to_bounds(Size::new(1.0, 1.0)), ())
        });

        assert!(result.is_none());
        assert_eq!(calls, 0);
        assert_eq!(rng.cursor, 2 * CONFETTI_ATTEMPTS);
    }

    #[test]
    fn test_try_place_zero_attempts() {
        let mut placement = Placement::new(Size::new(100.0, 100.0), CenterRules::disabled());
        let mut rng = Mulberry32::new(1);
        let result = placement.try_place(&mut rng, 0, |_, p| (p.to_bounds(Size::new(1.0, 1.0)), ()));
        assert!(result.is_none());
    }
}
