use crate::{Point, Vector, PARALLEL_EPSILON};

#[cfg(test)]
use crate::point;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    #[inline]
    pub fn to_line(&self) -> Line {
        Line {
            point: self.from,
            vector: self.to - self.from,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> f32 {
        self.to_vector().square_length()
    }

    /// Returns true if both endpoints are at the same position.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.square_length() == 0.0
    }

    /// Computes the intersection (if any) between this segment and another one.
    ///
    /// The result is provided in the form of the `t` parameter of each
    /// segment. To get the intersection point, sample one of the segments
    /// at the corresponding value.
    pub fn intersection_t(&self, other: &Self) -> Option<(f32, f32)> {
        let (t, u) = self.to_line().intersection_t(&other.to_line())?;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some((t, u))
    }

    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        self.intersection_t(other).map(|(t, _)| self.sample(t))
    }
}

/// An infinite line defined by a point and a vector.
///
/// The vector does not need to be normalized, but the parameters returned by
/// `intersection_t` are expressed in multiples of it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line {
    pub point: Point,
    pub vector: Vector,
}

impl Line {
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.point + self.vector * t
    }

    /// Solves `self.point + self.vector * t == other.point + other.vector * u`.
    ///
    /// Returns `None` if the lines are parallel (or too close to parallel for the
    /// result to be meaningful).
    pub fn intersection_t(&self, other: &Self) -> Option<(f32, f32)> {
        let det = self.vector.cross(other.vector);
        let scale = self.vector.length() * other.vector.length();

        if det.abs() <= PARALLEL_EPSILON * scale || scale == 0.0 {
            return None;
        }

        let v = other.point - self.point;
        let t = v.cross(other.vector) / det;
        let u = v.cross(self.vector) / det;

        Some((t, u))
    }

    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        self.intersection_t(other).map(|(t, _)| self.sample(t))
    }

    /// Positive on the left side of the line (counter-clockwise of its vector).
    pub fn signed_distance_to_point(&self, p: Point) -> f32 {
        let v = p - self.point;
        self.vector.cross(v) / self.vector.length()
    }

    pub fn distance_to_point(&self, p: Point) -> f32 {
        self.signed_distance_to_point(p).abs()
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point, b: Point, epsilon: f32) -> bool {
    (a - b).square_length() <= epsilon * epsilon
}

#[test]
fn intersection_rotating() {
    use core::f32::consts::PI;
    use crate::vector;

    let count = 50;
    let epsilon = 0.0001;
    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f32 / (count as f32) * 2.0 * PI;
            let angle2 = j as f32 / (count as f32) * 2.0 * PI;

            let l1 = Line {
                point: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                vector: vector(-20.0 * angle1.cos(), -20.0 * angle1.sin()),
            };

            let l2 = Line {
                point: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                vector: vector(-20.0 * angle2.cos(), -20.0 * angle2.sin()),
            };

            let (t, u) = l1.intersection_t(&l2).unwrap();

            assert!(fuzzy_eq_point(l1.sample(t), point(0.0, 0.0), epsilon));
            assert!(fuzzy_eq_point(l2.sample(u), point(0.0, 0.0), epsilon));
        }
    }
}

#[test]
fn intersection_parameter_sign() {
    use crate::vector;

    // Two edges of a right angle corner, the first one stopping before the corner.
    let l1 = Line {
        point: point(8.0, 2.0),
        vector: vector(1.0, 0.0),
    };
    let l2 = Line {
        point: point(12.0, 0.0),
        vector: vector(0.0, 1.0),
    };

    let (t, u) = l1.intersection_t(&l2).unwrap();
    assert!((t - 4.0).abs() < 1e-5);
    assert!((u - 2.0).abs() < 1e-5);

    let (t, _) = l2.intersection_t(&l1).unwrap();
    assert!((t - 2.0).abs() < 1e-5);
}

#[test]
fn parallel_lines() {
    use crate::vector;

    let l1 = Line {
        point: point(0.0, 0.0),
        vector: vector(1.0, 1.0),
    };
    let l2 = Line {
        point: point(0.0, 1.0),
        vector: vector(-2.0, -2.0),
    };
    let degenerate = Line {
        point: point(0.0, 1.0),
        vector: vector(0.0, 0.0),
    };

    assert!(l1.intersection(&l2).is_none());
    assert!(l1.intersection(&degenerate).is_none());
}

#[test]
fn segment_intersection_touching() {
    let l1 = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 10.0),
    };

    let l2 = LineSegment {
        from: point(0.0, 10.0),
        to: point(10.0, 0.0),
    };

    let l3 = LineSegment {
        from: point(20.0, 0.0),
        to: point(30.0, -10.0),
    };

    assert!(fuzzy_eq_point(l1.intersection(&l2).unwrap(), point(5.0, 5.0), 1e-5));
    assert!(l1.intersection(&l3).is_none());
}

#[test]
fn signed_distance() {
    use crate::vector;

    let l = Line {
        point: point(1.0, 1.0),
        vector: vector(2.0, 0.0),
    };

    assert_eq!(l.signed_distance_to_point(point(5.0, 3.0)), 2.0);
    assert_eq!(l.signed_distance_to_point(point(-5.0, -1.0)), -2.0);
    assert_eq!(l.distance_to_point(point(-5.0, -1.0)), 2.0);
}
