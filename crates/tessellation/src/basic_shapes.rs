//! One-shot tessellation of a single capped line segment or a single dot.
//!
//! These produce one quad each and do not go through joint resolution.

use crate::batch::check_zoom;
use crate::geom::utils::direction_or;
use crate::geom::LineSegment;
use crate::math::Point;
use crate::mesh::assemble;
use crate::path::{Color, PathPoint};
use crate::stroke::{capsule_positions, dot_quad, make_quad, QuadEnd, FALLBACK_AXIS};
use crate::{Circle, PrimitiveKind, TessellationResult, UnsupportedParameter};

fn check_point(p: Point) -> TessellationResult {
    if p.x.is_nan() || p.y.is_nan() {
        return Err(UnsupportedParameter::PositionIsNaN.into());
    }

    Ok(())
}

fn check_width(width: f32) -> TessellationResult {
    if !width.is_finite() || width <= 0.0 {
        return Err(UnsupportedParameter::WidthIsNotPositive.into());
    }

    Ok(())
}

fn check_edge_blend(edge_blend: f32) -> TessellationResult {
    if !edge_blend.is_finite() || edge_blend < 0.0 {
        return Err(UnsupportedParameter::EdgeBlendIsNegative.into());
    }

    Ok(())
}

/// Tessellates a line segment with round ends as a single quad.
///
/// Colors and widths are interpolated from `from` to `to`. The quad extends past each end by
/// the radius at that end so that the fragment program can draw the round caps.
pub fn tessellate_line(
    segment: &LineSegment,
    colors: [Color; 2],
    widths: [f32; 2],
    edge_blend: f32,
    zoom: f32,
    output: &mut dyn crate::StrokeGeometryBuilder,
) -> TessellationResult {
    check_zoom(zoom)?;
    check_point(segment.from)?;
    check_point(segment.to)?;
    check_width(widths[0])?;
    check_width(widths[1])?;
    check_edge_blend(edge_blend)?;

    let blend = edge_blend / zoom;
    let r0 = widths[0] * 0.5;
    let r1 = widths[1] * 0.5;
    let axis = direction_or(segment.from, segment.to, FALLBACK_AXIS);

    let positions = capsule_positions(segment.from, segment.to, axis, r0 + blend, r1 + blend);
    let start = QuadEnd {
        circle: Circle::new(segment.from, r0),
        color: colors[0],
        edge_blend: blend,
    };
    let end = QuadEnd {
        circle: Circle::new(segment.to, r1),
        color: colors[1],
        edge_blend: blend,
    };
    let (first, second) = (start.circle, end.circle);

    let quad = make_quad(positions, start, end, first, second, PrimitiveKind::Line);

    assemble(std::iter::once(&quad[..]), output)
}

/// Tessellates a dot of the given diameter as a single quad.
pub fn tessellate_dot(
    center: Point,
    color: Color,
    diameter: f32,
    edge_blend: f32,
    zoom: f32,
    output: &mut dyn crate::StrokeGeometryBuilder,
) -> TessellationResult {
    check_zoom(zoom)?;
    check_point(center)?;
    check_width(diameter)?;
    check_edge_blend(edge_blend)?;

    let quad = dot_quad(&PathPoint::dot(center, color, diameter * 0.5, edge_blend), zoom);

    assemble(std::iter::once(&quad[..]), output)
}

#[cfg(test)]
use crate::geometry_builder::{BuffersBuilder, VertexBuffers};
#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::StrokeVertex;

#[cfg(test)]
fn line_buffers(
    segment: LineSegment,
    widths: [f32; 2],
    zoom: f32,
) -> VertexBuffers<StrokeVertex, u16> {
    let mut buffers = VertexBuffers::new();
    tessellate_line(
        &segment,
        [Color::RED, Color::BLUE],
        widths,
        1.0,
        zoom,
        &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v),
    )
    .unwrap();

    buffers
}

#[test]
fn capped_line() {
    let segment = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
    };
    let buffers = line_buffers(segment, [2.0, 4.0], 1.0);

    assert_eq!(buffers.indices, vec![0, 1, 3, 0, 3, 2]);

    let positions: Vec<Point> = buffers.vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        vec![
            point(-2.0, 2.0),
            point(13.0, 3.0),
            point(-2.0, -2.0),
            point(13.0, -3.0),
        ]
    );

    let v = &buffers.vertices[0];
    assert_eq!(v.kind, PrimitiveKind::Line);
    assert_eq!(v.first, Circle::new(point(0.0, 0.0), 1.0));
    assert_eq!(v.second, Circle::new(point(10.0, 0.0), 2.0));
    assert_eq!(buffers.vertices[0].color, Color::RED);
    assert_eq!(buffers.vertices[3].color, Color::BLUE);
}

#[test]
fn edge_blend_follows_zoom() {
    let segment = LineSegment {
        from: point(0.0, 0.0),
        to: point(0.0, 10.0),
    };
    let buffers = line_buffers(segment, [2.0, 2.0], 4.0);

    for v in &buffers.vertices {
        assert_eq!(v.edge_blend, 0.25);
        assert_eq!(v.position.x.abs(), 1.25);
    }
}

#[test]
fn degenerate_line_is_a_dot() {
    let p = point(3.0, -2.0);
    let mut dot: VertexBuffers<StrokeVertex, u16> = VertexBuffers::new();
    tessellate_dot(
        p,
        Color::GREEN,
        6.0,
        1.5,
        2.0,
        &mut BuffersBuilder::new(&mut dot, |v: StrokeVertex| v),
    )
    .unwrap();

    let mut line: VertexBuffers<StrokeVertex, u16> = VertexBuffers::new();
    tessellate_line(
        &LineSegment { from: p, to: p },
        [Color::GREEN, Color::GREEN],
        [6.0, 6.0],
        1.5,
        2.0,
        &mut BuffersBuilder::new(&mut line, |v: StrokeVertex| v),
    )
    .unwrap();

    assert_eq!(dot.indices, line.indices);
    assert_eq!(dot.vertices.len(), line.vertices.len());
    for (d, l) in dot.vertices.iter().zip(line.vertices.iter()) {
        assert_eq!(d.position, l.position);
        assert_eq!(d.first, l.first);
        assert_eq!(d.second, l.second);
        assert_eq!(d.color, l.color);
        assert_eq!(d.edge_blend, l.edge_blend);
    }
    assert_eq!(dot.vertices[0].kind, PrimitiveKind::Dot);
}

#[test]
fn invalid_parameters() {
    use crate::geometry_builder::NoOutput;
    use crate::TessellationError;

    let segment = LineSegment {
        from: point(0.0, 0.0),
        to: point(1.0, 0.0),
    };
    let mut output = NoOutput::new();

    assert_eq!(
        tessellate_line(&segment, [Color::RED; 2], [1.0, 1.0], 1.0, 0.0, &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::ZoomIsNotPositive
        ))
    );
    assert_eq!(
        tessellate_line(&segment, [Color::RED; 2], [1.0, -1.0], 1.0, 1.0, &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::WidthIsNotPositive
        ))
    );
    assert_eq!(
        tessellate_dot(point(f32::NAN, 0.0), Color::RED, 1.0, 1.0, 1.0, &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );
    assert_eq!(
        tessellate_dot(point(0.0, 0.0), Color::RED, 1.0, -1.0, 1.0, &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::EdgeBlendIsNegative
        ))
    );
}
