use crate::{vector, Point, Vector};

/// Left-hand normal of a vector (rotated by 90 degrees counter-clockwise).
///
/// The length of the result is the length of the input.
#[inline]
pub fn normal(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Normalized direction from `from` to `to`, or `fallback` if both points are
/// at the same position.
#[inline]
pub fn direction_or(from: Point, to: Point, fallback: Vector) -> Vector {
    normalized_or(to - from, fallback)
}

/// Normalizes `v`, returning `fallback` for zero-length (or non-finite) vectors.
#[inline]
pub fn normalized_or(v: Vector, fallback: Vector) -> Vector {
    let square_length = v.square_length();
    if square_length == 0.0 || !square_length.is_finite() {
        return fallback;
    }

    v / square_length.sqrt()
}

/// Reflection of `p` through `center`.
#[inline]
pub fn point_reflection(p: Point, center: Point) -> Point {
    center + (center - p)
}

#[test]
fn normals_and_fallbacks() {
    use crate::point;

    assert_eq!(normal(vector(1.0, 0.0)), vector(0.0, 1.0));
    assert_eq!(normal(vector(0.0, 2.0)), vector(-2.0, 0.0));

    let fallback = vector(1.0, 0.0);
    assert_eq!(direction_or(point(1.0, 1.0), point(1.0, 1.0), fallback), fallback);
    assert_eq!(direction_or(point(1.0, 1.0), point(1.0, 4.0), fallback), vector(0.0, 1.0));
    assert_eq!(normalized_or(vector(f32::NAN, 0.0), fallback), fallback);

    assert_eq!(point_reflection(point(3.0, 1.0), point(1.0, 1.0)), point(-1.0, 1.0));
}
