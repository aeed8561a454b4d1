use crate::geom::utils::{direction_or, normal};
use crate::math::{vector, Point, Vector};
use crate::path::{Color, JoinKind, PathPoint, SubPath};
use crate::{Circle, PrimitiveKind, StrokeVertex};

use arrayvec::ArrayVec;

/// Resolved vertices of a stroke. Joints that only adjust their neighbours have none.
pub type StrokeVertices = ArrayVec<StrokeVertex, 5>;

/// Which end of an open path a cap is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CapEnd {
    Start,
    End,
}

impl CapEnd {
    /// Direction of the cap when the path has zero length.
    ///
    /// Consistent with the fallback direction of zero-length lines, so that a path whose
    /// points are all at the same position covers the same area as a dot.
    #[inline]
    pub fn fallback_axis(self) -> Vector {
        match self {
            CapEnd::Start => vector(-1.0, 0.0),
            CapEnd::End => vector(1.0, 0.0),
        }
    }
}

/// A renderable primitive or a corner between two lines.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Stroke {
    /// A ribbon between two points.
    Line { from: PathPoint, to: PathPoint },
    /// A round end of an open path, flared away from the neighbouring point.
    Cap {
        at: PathPoint,
        neighbor: Point,
        end: CapEnd,
    },
    /// An isolated dot.
    Dot { at: PathPoint },
    /// Mitered corner. Only moves the vertices of the adjoining lines.
    Sharp { at: PathPoint },
    /// Rounded corner drawn as a circular arc.
    Arc { at: PathPoint },
    /// Rounded corner with an arc radius smaller than the stroke radius.
    Fill { at: PathPoint },
}

/// Line direction when both endpoints are at the same position.
pub const FALLBACK_AXIS: Vector = Vector::new(1.0, 0.0);

impl Stroke {
    /// The joint used at a path point.
    pub fn joint(at: PathPoint) -> Self {
        match at.join_kind() {
            JoinKind::Sharp => Stroke::Sharp { at },
            JoinKind::Arc => Stroke::Arc { at },
            JoinKind::Fill => Stroke::Fill { at },
        }
    }

    #[inline]
    pub fn is_joint(&self) -> bool {
        matches!(
            self,
            Stroke::Sharp { .. } | Stroke::Arc { .. } | Stroke::Fill { .. }
        )
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Stroke::Line { .. })
    }

    /// Number of vertices this stroke contributes to the mesh.
    pub fn num_vertices(&self) -> usize {
        match self {
            Stroke::Line { .. } | Stroke::Cap { .. } | Stroke::Dot { .. } => 4,
            Stroke::Arc { .. } => 5,
            Stroke::Sharp { .. } | Stroke::Fill { .. } => 0,
        }
    }

    /// Number of indices this stroke contributes to the mesh.
    pub fn num_indices(&self) -> usize {
        match self {
            Stroke::Line { .. } | Stroke::Cap { .. } | Stroke::Dot { .. } => 6,
            Stroke::Arc { .. } => 9,
            Stroke::Sharp { .. } | Stroke::Fill { .. } => 0,
        }
    }

    /// The primitive tag of the vertices produced by this stroke.
    pub fn primitive_kind(&self) -> PrimitiveKind {
        match self {
            Stroke::Line { .. } => PrimitiveKind::Line,
            Stroke::Cap { .. } | Stroke::Dot { .. } => PrimitiveKind::Dot,
            Stroke::Arc { .. } => PrimitiveKind::Arc,
            Stroke::Sharp { .. } | Stroke::Fill { .. } => PrimitiveKind::None,
        }
    }

    /// Computes the vertices that do not depend on other strokes.
    ///
    /// Joints return an empty set here. They are resolved in a second pass by
    /// [`resolve_joint`](fn.resolve_joint.html) once every line has its vertices.
    pub fn vertices(&self, zoom: f32) -> StrokeVertices {
        let mut output = StrokeVertices::new();
        match *self {
            Stroke::Line { ref from, ref to } => {
                output.extend(line_quad(from, to, zoom).iter().cloned());
            }
            Stroke::Cap {
                ref at,
                neighbor,
                end,
            } => {
                output.extend(cap_quad(at, neighbor, end, zoom).iter().cloned());
            }
            Stroke::Dot { ref at } => {
                output.extend(dot_quad(at, zoom).iter().cloned());
            }
            Stroke::Sharp { .. } | Stroke::Arc { .. } | Stroke::Fill { .. } => {}
        }

        output
    }
}

/// Appends the strokes of a sub-path to `output`.
///
/// Open paths get a cap at each end and a joint between consecutive lines. Each point of a
/// loop gets the line to the next point immediately followed by that point's joint, the last
/// joint being the one at the first point.
pub fn strokes_for_sub_path(sub_path: &SubPath, output: &mut Vec<Stroke>) {
    let points = &sub_path.points[..];
    let n = points.len();
    if n < 2 {
        return;
    }

    if sub_path.closed {
        output.reserve(n * 2);
        for i in 0..n {
            let next = points[(i + 1) % n];
            output.push(Stroke::Line {
                from: points[i],
                to: next,
            });
            output.push(Stroke::joint(next));
        }

        return;
    }

    output.reserve(n * 2 + 1);
    output.push(Stroke::Cap {
        at: points[0],
        neighbor: points[1].position,
        end: CapEnd::Start,
    });
    for i in 0..(n - 1) {
        if i > 0 {
            output.push(Stroke::joint(points[i]));
        }
        output.push(Stroke::Line {
            from: points[i],
            to: points[i + 1],
        });
    }
    output.push(Stroke::Cap {
        at: points[n - 1],
        neighbor: points[n - 2].position,
        end: CapEnd::End,
    });
}

/// Stroke radius plus the antialiasing margin, in local units.
#[inline]
pub(crate) fn inflated_radius(p: &PathPoint, zoom: f32) -> f32 {
    p.stroke_radius + p.edge_blend / zoom
}

/// Corners of a rectangle around the segment `start -> end`, extended by `start_radius`
/// (resp. `end_radius`) on each side of the axis.
///
/// The order is start-left, end-left, start-right, end-right.
pub(crate) fn quad_positions(
    start: Point,
    end: Point,
    axis: Vector,
    start_radius: f32,
    end_radius: f32,
) -> [Point; 4] {
    let n = normal(axis);
    [
        start + n * start_radius,
        end + n * end_radius,
        start - n * start_radius,
        end - n * end_radius,
    ]
}

/// Corners of the capsule-shaped quad covering a segment and both of its round ends.
pub(crate) fn capsule_positions(
    from: Point,
    to: Point,
    axis: Vector,
    from_radius: f32,
    to_radius: f32,
) -> [Point; 4] {
    quad_positions(
        from - axis * from_radius,
        to + axis * to_radius,
        axis,
        from_radius,
        to_radius,
    )
}

pub(crate) struct QuadEnd {
    pub circle: Circle,
    pub color: Color,
    pub edge_blend: f32,
}

pub(crate) fn make_quad(
    positions: [Point; 4],
    start: QuadEnd,
    end: QuadEnd,
    first: Circle,
    second: Circle,
    kind: PrimitiveKind,
) -> [StrokeVertex; 4] {
    let vertex = |position, end: &QuadEnd| StrokeVertex {
        position,
        first,
        second,
        color: end.color,
        kind,
        edge_blend: end.edge_blend,
    };

    [
        vertex(positions[0], &start),
        vertex(positions[1], &end),
        vertex(positions[2], &start),
        vertex(positions[3], &end),
    ]
}

fn quad_end(p: &PathPoint, zoom: f32) -> QuadEnd {
    QuadEnd {
        circle: Circle::new(p.position, p.stroke_radius),
        color: p.color,
        edge_blend: p.edge_blend / zoom,
    }
}

fn line_quad(from: &PathPoint, to: &PathPoint, zoom: f32) -> [StrokeVertex; 4] {
    let axis = direction_or(from.position, to.position, FALLBACK_AXIS);
    let positions = quad_positions(
        from.position,
        to.position,
        axis,
        inflated_radius(from, zoom),
        inflated_radius(to, zoom),
    );

    let start = quad_end(from, zoom);
    let end = quad_end(to, zoom);
    let (first, second) = (start.circle, end.circle);

    make_quad(positions, start, end, first, second, PrimitiveKind::Line)
}

fn cap_quad(at: &PathPoint, neighbor: Point, end: CapEnd, zoom: f32) -> [StrokeVertex; 4] {
    let axis = direction_or(neighbor, at.position, end.fallback_axis());
    let radius = inflated_radius(at, zoom);
    let positions = quad_positions(
        at.position,
        at.position + axis * radius,
        axis,
        radius,
        radius,
    );

    let circle = Circle::new(at.position, at.stroke_radius);

    make_quad(
        positions,
        quad_end(at, zoom),
        quad_end(at, zoom),
        circle,
        circle,
        PrimitiveKind::Dot,
    )
}

pub(crate) fn dot_quad(at: &PathPoint, zoom: f32) -> [StrokeVertex; 4] {
    let radius = inflated_radius(at, zoom);
    let positions = capsule_positions(at.position, at.position, FALLBACK_AXIS, radius, radius);

    let circle = Circle::new(at.position, at.stroke_radius);

    make_quad(
        positions,
        quad_end(at, zoom),
        quad_end(at, zoom),
        circle,
        circle,
        PrimitiveKind::Dot,
    )
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::PointAction;

#[cfg(test)]
fn test_point(x: f32, y: f32, sharp: bool) -> PathPoint {
    PathPoint {
        action: PointAction::AddPoint,
        position: point(x, y),
        color: Color::RED,
        stroke_radius: 2.0,
        arc_radius: 2.0,
        sharp,
        edge_blend: 1.0,
    }
}

#[test]
fn open_path_strokes() {
    let sub_path = SubPath {
        points: vec![
            test_point(0.0, 0.0, true),
            test_point(10.0, 0.0, true),
            test_point(10.0, 10.0, false),
            test_point(0.0, 10.0, true),
        ],
        closed: false,
    };

    let mut strokes = Vec::new();
    strokes_for_sub_path(&sub_path, &mut strokes);

    let kinds: Vec<&str> = strokes
        .iter()
        .map(|s| match s {
            Stroke::Line { .. } => "line",
            Stroke::Cap { .. } => "cap",
            Stroke::Dot { .. } => "dot",
            Stroke::Sharp { .. } => "sharp",
            Stroke::Arc { .. } => "arc",
            Stroke::Fill { .. } => "fill",
        })
        .collect();

    assert_eq!(
        kinds,
        vec!["cap", "line", "sharp", "line", "arc", "line", "cap"]
    );

    match strokes[0] {
        Stroke::Cap { neighbor, end, .. } => {
            assert_eq!(neighbor, point(10.0, 0.0));
            assert_eq!(end, CapEnd::Start);
        }
        _ => panic!(),
    }
    match strokes[6] {
        Stroke::Cap { at, neighbor, end } => {
            assert_eq!(at.position, point(0.0, 10.0));
            assert_eq!(neighbor, point(10.0, 10.0));
            assert_eq!(end, CapEnd::End);
        }
        _ => panic!(),
    }
}

#[test]
fn loop_strokes() {
    let sub_path = SubPath {
        points: vec![
            test_point(0.0, 0.0, true),
            test_point(10.0, 0.0, false),
            test_point(10.0, 10.0, true),
        ],
        closed: true,
    };

    let mut strokes = Vec::new();
    strokes_for_sub_path(&sub_path, &mut strokes);

    assert_eq!(strokes.len(), 6);
    for (i, pair) in strokes.chunks(2).enumerate() {
        match (pair[0], pair[1]) {
            (Stroke::Line { from, to }, joint) => {
                assert_eq!(from.position, sub_path.points[i].position);
                assert_eq!(to.position, sub_path.points[(i + 1) % 3].position);
                assert!(joint.is_joint());
            }
            _ => panic!("expected a line followed by a joint"),
        }
    }
    assert!(matches!(strokes[1], Stroke::Arc { .. }));
    assert!(matches!(strokes[3], Stroke::Sharp { .. }));
    assert!(matches!(strokes[5], Stroke::Sharp { .. }));
}

#[test]
fn line_vertices() {
    let from = test_point(0.0, 0.0, true);
    let mut to = test_point(10.0, 0.0, true);
    to.stroke_radius = 4.0;
    to.color = Color::BLUE;

    // zoom 2: edge blend of 1 pixel is 0.5 local units.
    let vertices = Stroke::Line { from, to }.vertices(2.0);
    assert_eq!(vertices.len(), 4);

    let positions: Vec<Point> = vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        vec![
            point(0.0, 2.5),
            point(10.0, 4.5),
            point(0.0, -2.5),
            point(10.0, -4.5)
        ]
    );

    for v in &vertices {
        assert_eq!(v.kind, PrimitiveKind::Line);
        assert_eq!(v.first, Circle::new(point(0.0, 0.0), 2.0));
        assert_eq!(v.second, Circle::new(point(10.0, 0.0), 4.0));
        assert_eq!(v.edge_blend, 0.5);
    }
    assert_eq!(vertices[0].color, Color::RED);
    assert_eq!(vertices[1].color, Color::BLUE);
    assert_eq!(vertices[2].color, Color::RED);
    assert_eq!(vertices[3].color, Color::BLUE);
}

#[test]
fn cap_points_away_from_neighbor() {
    let at = test_point(0.0, 0.0, true);
    let vertices = Stroke::Cap {
        at,
        neighbor: point(0.0, 10.0),
        end: CapEnd::Start,
    }
    .vertices(1.0);

    assert_eq!(vertices.len(), 4);
    for v in &vertices {
        assert_eq!(v.kind, PrimitiveKind::Dot);
        assert_eq!(v.first, Circle::new(point(0.0, 0.0), 2.0));
        assert!(v.position.y <= 0.0);
        assert!(v.position.y >= -3.0);
        assert!(v.position.x.abs() <= 3.0);
    }
}

#[test]
fn joints_have_no_own_vertices() {
    let at = test_point(0.0, 0.0, true);
    assert!(Stroke::Sharp { at }.vertices(1.0).is_empty());
    assert!(Stroke::Arc { at }.vertices(1.0).is_empty());
    assert!(Stroke::Fill { at }.vertices(1.0).is_empty());
    assert_eq!(Stroke::Arc { at }.num_vertices(), 5);
    assert_eq!(Stroke::Arc { at }.num_indices(), 9);
}

#[test]
fn joint_classification() {
    let mut p = test_point(0.0, 0.0, true);
    assert!(matches!(Stroke::joint(p), Stroke::Sharp { .. }));
    p.sharp = false;
    p.arc_radius = 3.0;
    assert!(matches!(Stroke::joint(p), Stroke::Arc { .. }));
    p.arc_radius = 1.0;
    assert!(matches!(Stroke::joint(p), Stroke::Fill { .. }));
}
