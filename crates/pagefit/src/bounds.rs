//! Axis-aligned bounding boxes over optional extremes.
//!
//! A fresh [`Bounds`] is fully unset; it only gains coordinates through
//! [`Bounds::update`] and [`Bounds::merge`]. Each of the four fields is
//! tracked (and merged) independently, so a box that has only seen X
//! information never suppresses Y updates.

use crate::geom::{Point, Size};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_x: Option<f64>,
    pub max_y: Option<f64>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands the box to include `point`.
    pub fn update(&mut self, point: Point) {
        self.min_x = Some(fold_min(self.min_x, point.x));
        self.min_y = Some(fold_min(self.min_y, point.y));
        self.max_x = Some(fold_max(self.max_x, point.x));
        self.max_y = Some(fold_max(self.max_y, point.y));
    }

    /// Expands the box to include all extremes of `other`.
    ///
    /// Every field is gated on its own presence in the source: an unset
    /// `min_x` must not stop a set `max_y` from merging.
    pub fn merge(&mut self, other: &Bounds) {
        if let Some(v) = other.min_x {
            self.min_x = Some(fold_min(self.min_x, v));
        }
        if let Some(v) = other.min_y {
            self.min_y = Some(fold_min(self.min_y, v));
        }
        if let Some(v) = other.max_x {
            self.max_x = Some(fold_max(self.max_x, v));
        }
        if let Some(v) = other.max_y {
            self.max_y = Some(fold_max(self.max_y, v));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x.is_none() && self.min_y.is_none() && self.max_x.is_none() && self.max_y.is_none()
    }

    /// Width and height, once all four extremes are known.
    pub fn extent(&self) -> Option<Size> {
        Some(euclid::size2(
            self.max_x? - self.min_x?,
            self.max_y? - self.min_y?,
        ))
    }
}

fn fold_min(current: Option<f64>, candidate: f64) -> f64 {
    match current {
        Some(v) if v <= candidate => v,
        _ => candidate,
    }
}

fn fold_max(current: Option<f64>, candidate: f64) -> f64 {
    match current {
        Some(v) if v >= candidate => v,
        _ => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    fn boxed(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
        Bounds {
            min_x: Some(min_x),
            min_y: Some(min_y),
            max_x: Some(max_x),
            max_y: Some(max_y),
        }
    }

    #[test]
    fn update_tracks_extremes() {
        let mut b = Bounds::new();
        b.update(point(3.0, -1.0));
        b.update(point(-2.0, 4.0));
        b.update(point(0.0, 0.0));
        assert_eq!(b, boxed(-2.0, -1.0, 3.0, 4.0));
    }

    #[test]
    fn merge_with_unset_source_is_a_no_op() {
        let mut b = boxed(0.0, 0.0, 5.0, 5.0);
        b.merge(&Bounds::new());
        assert_eq!(b, boxed(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let a = boxed(-1.0, 2.0, 3.0, 4.0);
        let b = boxed(0.0, -5.0, 1.0, 9.0);
        let c = boxed(-3.0, 0.0, 0.0, 1.0);

        let mut ab = a;
        ab.merge(&b);
        let mut ba = b;
        ba.merge(&a);
        assert_eq!(ab, ba);

        let mut ab_c = ab;
        ab_c.merge(&c);
        let mut bc = b;
        bc.merge(&c);
        let mut a_bc = a;
        a_bc.merge(&bc);
        assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn merge_fields_are_independent() {
        // A source carrying only Y information must still merge it.
        let src = Bounds {
            min_x: None,
            min_y: Some(-7.0),
            max_x: None,
            max_y: Some(7.0),
        };
        let mut dest = Bounds::new();
        dest.merge(&src);
        assert_eq!(dest.min_x, None);
        assert_eq!(dest.min_y, Some(-7.0));
        assert_eq!(dest.max_x, None);
        assert_eq!(dest.max_y, Some(7.0));
    }

    #[test]
    fn extent_requires_all_four_fields() {
        let mut b = Bounds::new();
        assert!(b.extent().is_none());
        b.update(point(1.0, 2.0));
        b.update(point(4.0, 10.0));
        let size = b.extent().unwrap();
        assert_eq!(size.width, 3.0);
        assert_eq!(size.height, 8.0);
    }
}
