//! Corner resolution.
//!
//! Lines are first tessellated independently, as if they were not connected. A joint then
//! takes the quads of the line before and the line after the corner and returns adjusted
//! copies of them along with its own vertices, if any.
//!
//! Quads use the start-left, end-left, start-right, end-right vertex order, so the corner is
//! made of vertices 1 and 3 of the line before and vertices 0 and 2 of the line after.

use crate::geom::utils::{direction_or, normal, normalized_or, point_reflection};
use crate::geom::{Line, PARALLEL_EPSILON};
use crate::math::{Point, Vector};
use crate::path::PathPoint;
use crate::stroke::{StrokeVertices, FALLBACK_AXIS};
use crate::{
    Circle, InternalError, PrimitiveKind, Quad, Stroke, StrokeVertex, TessellationError,
    UnsupportedParameter,
};

/// The result of resolving a joint.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedJoint {
    /// The line before the corner.
    pub before: Quad,
    /// The line after the corner.
    pub after: Quad,
    /// Vertices of the joint itself.
    pub vertices: StrokeVertices,
}

/// Resolves a joint between the already tessellated lines `before` and `after`.
///
/// `joint` must be a `Sharp`, `Arc` or `Fill` stroke. The neighbouring quads are taken by
/// value and returned modified, nothing else is touched.
pub fn resolve_joint(
    joint: &Stroke,
    before: Option<&Quad>,
    after: Option<&Quad>,
    zoom: f32,
) -> Result<ResolvedJoint, TessellationError> {
    let (before, after) = match (before, after) {
        (Some(b), Some(a)) => (*b, *a),
        _ => return Err(InternalError::MissingNeighbourLine.into()),
    };

    let mut resolved = ResolvedJoint {
        before,
        after,
        vertices: StrokeVertices::new(),
    };

    match *joint {
        Stroke::Sharp { .. } => {
            sharp_join(&mut resolved.before, &mut resolved.after);
        }
        Stroke::Arc { ref at } => {
            resolved.vertices = arc_join(at, &mut resolved.before, &mut resolved.after, zoom);
        }
        Stroke::Fill { .. } => {
            return Err(UnsupportedParameter::FillJoin.into());
        }
        Stroke::Line { .. } | Stroke::Cap { .. } | Stroke::Dot { .. } => {
            return Err(InternalError::NotAJoint.into());
        }
    }

    Ok(resolved)
}

/// Axis of a line quad, from its tessellated endpoint circles.
fn quad_axis(quad: &Quad) -> Vector {
    direction_or(quad[0].first.center, quad[0].second.center, FALLBACK_AXIS)
}

/// The left edges of both lines, through the corner vertices.
fn left_edges(before: &Quad, after: &Quad) -> (Line, Line) {
    (
        Line {
            point: before[1].position,
            vector: quad_axis(before),
        },
        Line {
            point: after[0].position,
            vector: quad_axis(after),
        },
    )
}

/// Miter join.
///
/// Both corner vertices on the left side are moved to the intersection of the left edges and
/// both vertices on the right side to its reflection through the corner. When the two lines
/// have different radii the right side does not exactly follow the edges.
fn sharp_join(before: &mut Quad, after: &mut Quad) {
    let (edge0, edge1) = left_edges(before, after);
    let corner = before[0].second.center;

    let p = match edge0.intersection(&edge1) {
        Some(p) => p,
        // Aligned lines already meet.
        None => return,
    };

    let reflected = point_reflection(p, corner);

    before[1].position = p;
    after[0].position = p;
    before[3].position = reflected;
    after[2].position = reflected;
}

/// Rounded corner with a true circular arc.
///
/// The arc is tangent to the outer edges of both lines. Its center is on the bisector of the
/// corner, `arc_radius - stroke_radius` away from the outer edges, and both lines are
/// retracted to the tangent points. The gap is covered by a fan made of the retracted corner
/// vertices and the intersection of the outer edges.
fn arc_join(at: &PathPoint, before: &mut Quad, after: &mut Quad, zoom: f32) -> StrokeVertices {
    let corner = at.position;
    let a0 = quad_axis(before);
    let a1 = quad_axis(after);
    let r = at.stroke_radius;
    let arc_radius = at.arc_radius;
    let edge_blend = at.edge_blend / zoom;
    let cross = a0.cross(a1);

    let (edge0, edge1) = left_edges(before, after);
    // The left edges meet past the end of the first line when the corner turns right, which
    // makes the left side the outer side.
    let left_is_outer = match edge0.intersection_t(&edge1) {
        Some((t, _)) => t > 0.0,
        None => cross <= 0.0,
    };

    let (outer0, inner0, outer1, inner1) = if left_is_outer {
        (1, 3, 0, 2)
    } else {
        (3, 1, 2, 0)
    };

    let vertex = |position: Point, circle: Circle, inner_circle: Circle| StrokeVertex {
        position,
        first: circle,
        second: inner_circle,
        color: at.color,
        kind: PrimitiveKind::Arc,
        edge_blend,
    };

    let mut fan = StrokeVertices::new();

    if cross.abs() <= PARALLEL_EPSILON && a0.dot(a1) < 0.0 {
        // The path goes back on itself: cover a full disc around the point with a square
        // continuing the first line.
        log::warn!("Arc join at {:?} on a path that doubles back", corner);
        let circle = Circle::new(corner, r);
        let inner_circle = Circle::new(corner, -r);
        let extent = a0 * (r + edge_blend);
        let outer = before[outer0].position;
        let inner = before[inner0].position;

        fan.push(vertex(outer, circle, inner_circle));
        fan.push(vertex(outer + extent, circle, inner_circle));
        fan.push(vertex(inner, circle, inner_circle));
        fan.push(vertex(inner + extent, circle, inner_circle));
        fan.push(vertex(inner + extent, circle, inner_circle));

        return fan;
    }

    let side = if left_is_outer { 1.0 } else { -1.0 };
    let o0 = normal(a0) * side;
    let o1 = normal(a1) * side;
    let u = normalized_or(o0 + o1, o0);
    let d = u.dot(o0);
    let offset = arc_radius - r;

    let center = corner - u * (offset / d);
    let circle = Circle::new(center, arc_radius);
    let inner_circle = Circle::new(center, arc_radius - 2.0 * r);

    let shorten = offset * u.dot(a0).abs() / d;
    if shorten > 0.0 {
        let len0 = (before[0].second.center - before[0].first.center).length();
        let len1 = (after[0].second.center - after[0].first.center).length();
        if shorten > len0 || shorten > len1 {
            log::warn!(
                "Arc join at {:?} retracts the adjoining lines by {} (line lengths {} and {})",
                corner,
                shorten,
                len0,
                len1,
            );
        }

        for &i in &[1, 3] {
            before[i].position -= a0 * shorten;
        }
        for &i in &[0, 2] {
            after[i].position += a1 * shorten;
        }
    }

    let outer_edge0 = Line {
        point: before[outer0].position,
        vector: a0,
    };
    let outer_edge1 = Line {
        point: after[outer1].position,
        vector: a1,
    };
    let tip = outer_edge0
        .intersection(&outer_edge1)
        .unwrap_or_else(|| before[outer0].position.lerp(after[outer1].position, 0.5));

    fan.push(vertex(before[inner0].position, circle, inner_circle));
    fan.push(vertex(before[outer0].position, circle, inner_circle));
    fan.push(vertex(after[inner1].position, circle, inner_circle));
    fan.push(vertex(after[outer1].position, circle, inner_circle));
    fan.push(vertex(tip, circle, inner_circle));

    fan
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::{Color, PointAction};

#[cfg(test)]
fn corner_point(x: f32, y: f32, stroke_radius: f32, arc_radius: f32, sharp: bool) -> PathPoint {
    PathPoint {
        action: PointAction::AddPoint,
        position: point(x, y),
        color: Color::GREEN,
        stroke_radius,
        arc_radius,
        sharp,
        edge_blend: 1.0,
    }
}

#[cfg(test)]
fn line(from: PathPoint, to: PathPoint, zoom: f32) -> Quad {
    let v = Stroke::Line { from, to }.vertices(zoom);
    [v[0], v[1], v[2], v[3]]
}

#[cfg(test)]
fn approx_eq(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn sharp_right_angle() {
    let p0 = corner_point(0.0, 0.0, 2.0, 2.0, true);
    let p1 = corner_point(10.0, 0.0, 2.0, 2.0, true);
    let p2 = corner_point(10.0, 10.0, 2.0, 2.0, true);

    let resolved = resolve_joint(
        &Stroke::Sharp { at: p1 },
        Some(&line(p0, p1, 1.0)),
        Some(&line(p1, p2, 1.0)),
        1.0,
    )
    .unwrap();

    assert!(resolved.vertices.is_empty());
    assert_eq!(resolved.before[1].position, point(7.0, 3.0));
    assert_eq!(resolved.after[0].position, point(7.0, 3.0));
    assert_eq!(resolved.before[3].position, point(13.0, -3.0));
    assert_eq!(resolved.after[2].position, point(13.0, -3.0));

    // The far ends are untouched.
    assert_eq!(resolved.before[0].position, point(0.0, 3.0));
    assert_eq!(resolved.after[1].position, point(7.0, 10.0));
    assert_eq!(resolved.after[3].position, point(13.0, 10.0));
}

#[test]
fn sharp_collinear() {
    let p0 = corner_point(0.0, 0.0, 2.0, 2.0, true);
    let p1 = corner_point(10.0, 0.0, 2.0, 2.0, true);
    let p2 = corner_point(20.0, 0.0, 2.0, 2.0, true);

    let before = line(p0, p1, 1.0);
    let after = line(p1, p2, 1.0);
    let resolved = resolve_joint(&Stroke::Sharp { at: p1 }, Some(&before), Some(&after), 1.0)
        .unwrap();

    assert_eq!(resolved.before, before);
    assert_eq!(resolved.after, after);
}

#[test]
fn arc_left_turn() {
    // r = 1, R = 3, blend 1.
    let p0 = corner_point(0.0, 0.0, 1.0, 3.0, false);
    let p1 = corner_point(10.0, 0.0, 1.0, 3.0, false);
    let p2 = corner_point(10.0, 10.0, 1.0, 3.0, false);

    let resolved = resolve_joint(
        &Stroke::Arc { at: p1 },
        Some(&line(p0, p1, 1.0)),
        Some(&line(p1, p2, 1.0)),
        1.0,
    )
    .unwrap();

    assert_eq!(resolved.vertices.len(), 5);
    for v in &resolved.vertices {
        assert_eq!(v.kind, PrimitiveKind::Arc);
        assert!(approx_eq(v.first.center, point(8.0, 2.0)));
        assert_eq!(v.first.radius, 3.0);
        assert_eq!(v.second.center, v.first.center);
        assert_eq!(v.second.radius, 1.0);
        assert_eq!(v.color, Color::GREEN);
    }

    // Both lines are retracted by R - r along their axis.
    assert!(approx_eq(resolved.before[1].position, point(8.0, 2.0)));
    assert!(approx_eq(resolved.before[3].position, point(8.0, -2.0)));
    assert!(approx_eq(resolved.after[0].position, point(8.0, 2.0)));
    assert!(approx_eq(resolved.after[2].position, point(12.0, 2.0)));

    // Fan: inner/outer end of the first line, inner/outer start of the second, outer tip.
    let fan: Vec<Point> = resolved.vertices.iter().map(|v| v.position).collect();
    assert!(approx_eq(fan[0], point(8.0, 2.0)));
    assert!(approx_eq(fan[1], point(8.0, -2.0)));
    assert!(approx_eq(fan[2], point(8.0, 2.0)));
    assert!(approx_eq(fan[3], point(12.0, 2.0)));
    assert!(approx_eq(fan[4], point(12.0, -2.0)));

    // The outer vertices are on the arc, pushed out by the edge blend.
    let center = resolved.vertices[0].first.center;
    assert!(((fan[1] - center).length() - 4.0).abs() < 1e-4);
    assert!(((fan[3] - center).length() - 4.0).abs() < 1e-4);
}

#[test]
fn arc_right_turn_uses_left_side() {
    let p0 = corner_point(0.0, 0.0, 1.0, 3.0, false);
    let p1 = corner_point(10.0, 0.0, 1.0, 3.0, false);
    let p2 = corner_point(10.0, -10.0, 1.0, 3.0, false);

    let resolved = resolve_joint(
        &Stroke::Arc { at: p1 },
        Some(&line(p0, p1, 1.0)),
        Some(&line(p1, p2, 1.0)),
        1.0,
    )
    .unwrap();

    let center = resolved.vertices[0].first.center;
    assert!(approx_eq(center, point(8.0, -2.0)));
    // Outer vertex of the first line is on its left side.
    assert!(approx_eq(resolved.vertices[1].position, point(8.0, 2.0)));
    assert!(approx_eq(resolved.vertices[4].position, point(12.0, 2.0)));
}

#[test]
fn round_join_keeps_the_corner_as_center() {
    // R == r: the classic round join.
    let p0 = corner_point(0.0, 0.0, 2.0, 2.0, false);
    let p1 = corner_point(10.0, 0.0, 2.0, 2.0, false);
    let p2 = corner_point(10.0, 10.0, 2.0, 2.0, false);

    let before = line(p0, p1, 1.0);
    let after = line(p1, p2, 1.0);
    let resolved =
        resolve_joint(&Stroke::Arc { at: p1 }, Some(&before), Some(&after), 1.0).unwrap();

    assert!(approx_eq(resolved.vertices[0].first.center, point(10.0, 0.0)));
    assert_eq!(resolved.before, before);
    assert_eq!(resolved.after, after);
}

#[test]
fn fill_join_is_unsupported() {
    let p0 = corner_point(0.0, 0.0, 2.0, 1.0, false);
    let p1 = corner_point(10.0, 0.0, 2.0, 1.0, false);
    let p2 = corner_point(10.0, 10.0, 2.0, 1.0, false);

    assert_eq!(
        resolve_joint(
            &Stroke::Fill { at: p1 },
            Some(&line(p0, p1, 1.0)),
            Some(&line(p1, p2, 1.0)),
            1.0,
        ),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::FillJoin
        ))
    );
}

#[test]
fn missing_neighbour() {
    let p0 = corner_point(0.0, 0.0, 2.0, 2.0, true);
    let p1 = corner_point(10.0, 0.0, 2.0, 2.0, true);

    assert!(matches!(
        resolve_joint(&Stroke::Sharp { at: p1 }, Some(&line(p0, p1, 1.0)), None, 1.0),
        Err(TessellationError::Internal(InternalError::MissingNeighbourLine))
    ));
}

#[test]
fn arc_on_path_doubling_back() {
    let p0 = corner_point(0.0, 0.0, 1.0, 1.0, false);
    let p1 = corner_point(10.0, 0.0, 1.0, 1.0, false);

    let resolved = resolve_joint(
        &Stroke::Arc { at: p1 },
        Some(&line(p0, p1, 1.0)),
        Some(&line(p1, p0, 1.0)),
        1.0,
    )
    .unwrap();

    assert_eq!(resolved.vertices.len(), 5);
    for v in &resolved.vertices {
        assert!(v.position.x.is_finite() && v.position.y.is_finite());
        assert_eq!(v.first, Circle::new(point(10.0, 0.0), 1.0));
    }
    // A square covering the disc beyond the turning point.
    assert!(approx_eq(resolved.vertices[0].position, point(10.0, 2.0)));
    assert!(approx_eq(resolved.vertices[1].position, point(12.0, 2.0)));
    assert!(approx_eq(resolved.vertices[2].position, point(10.0, -2.0)));
    assert!(approx_eq(resolved.vertices[4].position, point(12.0, -2.0)));
    // Neighbours are not retracted.
    assert_eq!(resolved.before[1].position, point(10.0, 2.0));
}

#[cfg(test)]
fn check_arc_corner(p2: Point, expected_center: Point, expected_retraction: f32) {
    // r = 1, R = 3, blend 1.
    let p0 = corner_point(0.0, 0.0, 1.0, 3.0, false);
    let p1 = corner_point(10.0, 0.0, 1.0, 3.0, false);
    let p2 = corner_point(p2.x, p2.y, 1.0, 3.0, false);

    let before = line(p0, p1, 1.0);
    let after = line(p1, p2, 1.0);
    let resolved =
        resolve_joint(&Stroke::Arc { at: p1 }, Some(&before), Some(&after), 1.0).unwrap();

    assert_eq!(resolved.vertices.len(), 5);
    let center = resolved.vertices[0].first.center;
    assert!(approx_eq(center, expected_center), "{:?}", center);
    for v in &resolved.vertices {
        assert_eq!(v.first, Circle::new(center, 3.0));
        assert_eq!(v.second, Circle::new(center, 1.0));
    }

    // The arc is tangent to the center lines of both strokes.
    let axis0 = Line {
        point: p0.position,
        vector: p1.position - p0.position,
    };
    let axis1 = Line {
        point: p1.position,
        vector: p2.position - p1.position,
    };
    assert!((axis0.distance_to_point(center) - 2.0).abs() < 1e-4);
    assert!((axis1.distance_to_point(center) - 2.0).abs() < 1e-4);

    // Both lines are retracted by (R - r) * tan(angle / 2).
    let a0 = axis0.vector.normalize();
    let a1 = axis1.vector.normalize();
    let angle = a0.cross(a1).atan2(a0.dot(a1)).abs();
    assert!((2.0 * (angle / 2.0).tan() - expected_retraction).abs() < 1e-3);
    for &i in &[1, 3] {
        let retraction = (before[i].position - resolved.before[i].position).length();
        assert!((retraction - expected_retraction).abs() < 1e-3, "{}", retraction);
    }
    for &i in &[0, 2] {
        let retraction = (after[i].position - resolved.after[i].position).length();
        assert!((retraction - expected_retraction).abs() < 1e-3, "{}", retraction);
    }
    // The far ends are untouched.
    assert_eq!(resolved.before[0], before[0]);
    assert_eq!(resolved.after[1], after[1]);

    // Fan vertices are the retracted corner vertices, the outer ones on the arc pushed out by
    // the edge blend.
    let fan: Vec<Point> = resolved.vertices.iter().map(|v| v.position).collect();
    let outer0 = if approx_eq(fan[0], resolved.before[1].position) { 3 } else { 1 };
    let outer1 = if outer0 == 1 { 0 } else { 2 };
    assert!(approx_eq(fan[0], resolved.before[4 - outer0].position));
    assert!(approx_eq(fan[1], resolved.before[outer0].position));
    assert!(approx_eq(fan[2], resolved.after[2 - outer1].position));
    assert!(approx_eq(fan[3], resolved.after[outer1].position));
    assert!(((fan[1] - center).length() - 4.0).abs() < 1e-3);
    assert!(((fan[3] - center).length() - 4.0).abs() < 1e-3);

    // The tip is on both outer edges.
    let tip_to_axis0 = axis0.distance_to_point(fan[4]);
    let tip_to_axis1 = axis1.distance_to_point(fan[4]);
    assert!((tip_to_axis0 - 2.0).abs() < 1e-3, "{}", tip_to_axis0);
    assert!((tip_to_axis1 - 2.0).abs() < 1e-3, "{}", tip_to_axis1);
    assert!((fan[4] - center).length() > 4.0);
}

#[test]
fn arc_obtuse_left_turn() {
    // A 26.6 degrees turn.
    check_arc_corner(point(20.0, 5.0), point(9.527864, 2.0), 0.472136);
}

#[test]
fn arc_acute_left_turn() {
    // A 143.1 degrees turn.
    check_arc_corner(point(2.0, 6.0), point(4.0, 2.0), 6.0);
}

#[test]
fn arc_acute_right_turn() {
    check_arc_corner(point(2.0, -6.0), point(4.0, -2.0), 6.0);
}
