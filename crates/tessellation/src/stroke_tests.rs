use crate::geometry_builder::{BuffersBuilder, NoOutput, VertexBuffers};
use crate::math::{point, Box2D, Point};
use crate::path::{Color, PathError, PointStyle, StrokeStyle};
use crate::{PrimitiveKind, Stroke, StrokeBatch, StrokeVertex, TessellationError};

fn tessellate(batch: &mut StrokeBatch, zoom: f32) -> VertexBuffers<StrokeVertex, u32> {
    let mut buffers = VertexBuffers::new();
    batch
        .tessellate(zoom, &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v))
        .unwrap();

    buffers
}

fn approx_eq(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-4
}

fn count(batch: &StrokeBatch, pred: fn(&Stroke) -> bool) -> usize {
    batch.strokes().iter().filter(|s| pred(s)).count()
}

fn add_path(batch: &mut StrokeBatch, points: &[Point], style: &StrokeStyle, closed: bool) {
    if closed {
        batch.start_loop(points[0], style).unwrap();
    } else {
        batch.start_path(points[0], style).unwrap();
    }
    for p in &points[1..] {
        batch.add_point(*p, &PointStyle::INHERIT).unwrap();
    }
    batch.end().unwrap();
}

fn polygon(n: usize, radius: f32) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f32 * std::f32::consts::PI * 2.0 / n as f32;
            point(a.cos() * radius, a.sin() * radius)
        })
        .collect()
}

fn check_indices(buffers: &VertexBuffers<StrokeVertex, u32>) {
    assert_eq!(buffers.indices.len() % 3, 0);
    for idx in &buffers.indices {
        assert!((*idx as usize) < buffers.vertices.len());
    }
    for v in &buffers.vertices {
        assert!(v.position.x.is_finite() && v.position.y.is_finite());
    }
}

#[test]
fn open_sharp_path_primitive_counts() {
    for n in 2..8 {
        let points: Vec<Point> = (0..n)
            .map(|i| point(i as f32 * 10.0, if i % 2 == 0 { 0.0 } else { 7.0 }))
            .collect();

        let mut batch = StrokeBatch::new();
        let style = StrokeStyle::new(Color::BLACK, 3.0).with_sharp_joins(true);
        add_path(&mut batch, &points, &style, false);

        assert_eq!(count(&batch, Stroke::is_line), n - 1);
        assert_eq!(count(&batch, |s| matches!(s, Stroke::Cap { .. })), 2);
        assert_eq!(count(&batch, |s| matches!(s, Stroke::Sharp { .. })), n - 2);
        assert_eq!(count(&batch, |s| matches!(s, Stroke::Arc { .. })), 0);

        assert_eq!(batch.vertex_count(), (n - 1) * 4 + 8);
        assert_eq!(batch.index_count(), (n - 1) * 6 + 12);

        let buffers = tessellate(&mut batch, 1.0);
        assert_eq!(buffers.vertices.len(), batch.vertex_count());
        assert_eq!(buffers.indices.len(), batch.index_count());
        check_indices(&buffers);
    }
}

#[test]
fn closed_rounded_loop_primitive_counts() {
    for n in 3..9 {
        let mut batch = StrokeBatch::new();
        let style = StrokeStyle::new(Color::BLUE, 2.0).with_arc_radius(3.0);
        add_path(&mut batch, &polygon(n, 50.0), &style, true);

        assert_eq!(count(&batch, Stroke::is_line), n);
        assert_eq!(count(&batch, |s| matches!(s, Stroke::Arc { .. })), n);
        assert_eq!(count(&batch, |s| matches!(s, Stroke::Cap { .. })), 0);

        let mut output = NoOutput::new();
        batch.tessellate(1.0, &mut output).unwrap();
        assert_eq!(output.num_vertices() as usize, n * 4 + n * 5);
        assert_eq!(output.num_triangles() as usize, n * 2 + n * 3);
        assert_eq!(batch.vertex_count(), n * 9);
        assert_eq!(batch.index_count(), n * 15);
    }
}

#[test]
fn concrete_sharp_path() {
    let mut batch = StrokeBatch::new();
    let style = StrokeStyle::new(Color::RED, 4.0).with_sharp_joins(true);
    add_path(
        &mut batch,
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        &style,
        false,
    );

    assert_eq!(batch.strokes().len(), 5);
    assert_eq!(count(&batch, Stroke::is_line), 2);
    assert_eq!(count(&batch, |s| matches!(s, Stroke::Cap { .. })), 2);
    assert_eq!(count(&batch, |s| matches!(s, Stroke::Sharp { .. })), 1);

    let buffers = tessellate(&mut batch, 1.0);
    assert_eq!(buffers.vertices.len(), 16);
    assert_eq!(buffers.indices.len() / 3, 8);
    check_indices(&buffers);

    // Cap: 0..4, first line: 4..8, second line: 8..12, cap: 12..16.
    let v = &buffers.vertices;
    assert_eq!(v[5].position, v[8].position);
    assert_eq!(v[7].position, v[10].position);
    assert_eq!(v[5].position, point(7.0, 3.0));
    assert_eq!(v[7].position, point(13.0, -3.0));

    for v in &v[0..4] {
        assert_eq!(v.kind, PrimitiveKind::Dot);
        assert_eq!(v.color, Color::RED);
    }
    for v in &v[4..12] {
        assert_eq!(v.kind, PrimitiveKind::Line);
    }
}

#[test]
fn arc_vertices_report_the_configured_arc() {
    let mut batch = StrokeBatch::new();
    let style = StrokeStyle::new(Color::BLACK, 2.0).with_arc_radius(3.0);
    add_path(
        &mut batch,
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ],
        &style,
        true,
    );

    let buffers = tessellate(&mut batch, 1.0);
    check_indices(&buffers);

    // Line, arc, line, arc... with 4 + 5 vertices per pair.
    let expected_centers = [
        point(8.0, 2.0),
        point(8.0, 8.0),
        point(2.0, 8.0),
        point(2.0, 2.0),
    ];
    for (i, center) in expected_centers.iter().enumerate() {
        let arc = &buffers.vertices[(i * 9 + 4)..(i * 9 + 9)];
        for v in arc {
            assert_eq!(v.kind, PrimitiveKind::Arc);
            assert_eq!(v.first.radius, 3.0);
            assert_eq!(v.second.radius, 1.0);
            assert_eq!(v.first.center, arc[0].first.center);
            assert!(approx_eq(v.first.center, *center));
        }
    }

    // Each line is retracted by R - r = 2 at both ends.
    let first_line = &buffers.vertices[0..4];
    assert!(approx_eq(first_line[0].position, point(2.0, 2.0)));
    assert!(approx_eq(first_line[1].position, point(8.0, 2.0)));
    assert!(approx_eq(first_line[2].position, point(2.0, -2.0)));
    assert!(approx_eq(first_line[3].position, point(8.0, -2.0)));
}

#[test]
fn render_is_memoized() {
    let mut batch = StrokeBatch::new();
    let style = StrokeStyle::new(Color::BLACK, 2.0);
    add_path(
        &mut batch,
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        &style,
        false,
    );

    assert!(batch.needs_rebuild(1.0));
    let first = tessellate(&mut batch, 1.0);
    assert_eq!(batch.rebuild_count(), 1);
    assert!(!batch.needs_rebuild(1.0));

    let second = tessellate(&mut batch, 1.0);
    assert_eq!(batch.rebuild_count(), 1);
    assert_eq!(first.vertices, second.vertices);
    assert_eq!(first.indices, second.indices);

    // The edge blend depends on the zoom.
    assert!(batch.needs_rebuild(2.0));
    tessellate(&mut batch, 2.0);
    assert_eq!(batch.rebuild_count(), 2);

    batch.add_dot(point(20.0, 20.0), Color::RED, 1.0).unwrap();
    assert!(batch.needs_rebuild(2.0));
    tessellate(&mut batch, 2.0);
    assert_eq!(batch.rebuild_count(), 3);
}

#[test]
fn zero_length_path_covers_a_dot() {
    let p = point(4.0, 4.0);
    let style = StrokeStyle::new(Color::GREEN, 6.0).with_edge_blend(1.0);

    let mut path = StrokeBatch::new();
    add_path(&mut path, &[p, p], &style, false);
    let path = tessellate(&mut path, 1.0);

    let mut dot = StrokeBatch::new();
    dot.add_dot_with_edge_blend(p, Color::GREEN, 3.0, 1.0).unwrap();
    let dot = tessellate(&mut dot, 1.0);

    let bounds = |buffers: &VertexBuffers<StrokeVertex, u32>| {
        Box2D::from_points(buffers.vertices.iter().map(|v| v.position))
    };

    assert_eq!(bounds(&path), bounds(&dot));
    assert_eq!(bounds(&dot), Box2D::new(point(0.0, 0.0), point(8.0, 8.0)));
}

#[test]
fn edge_blend_is_in_screen_pixels() {
    let mut batch = StrokeBatch::new();
    batch
        .add_dot_with_edge_blend(point(0.0, 0.0), Color::BLACK, 1.0, 2.0)
        .unwrap();

    let buffers = tessellate(&mut batch, 4.0);
    for v in &buffers.vertices {
        assert_eq!(v.edge_blend, 0.5);
        assert_eq!(v.position.x.abs(), 1.5);
        assert_eq!(v.position.y.abs(), 1.5);
    }
}

#[test]
fn invalid_paths_leave_the_batch_untouched() {
    let mut batch = StrokeBatch::new();
    batch.add_dot(point(0.0, 0.0), Color::BLACK, 1.0).unwrap();

    // Arc radius smaller than the stroke radius.
    let style = StrokeStyle::new(Color::BLACK, 4.0).with_arc_radius(1.0);
    assert!(matches!(
        batch.start_path(point(0.0, 0.0), &style),
        Err(PathError::UnsupportedJoin { .. })
    ));

    let style = StrokeStyle::new(Color::BLACK, 4.0);
    batch.start_loop(point(0.0, 0.0), &style).unwrap();
    assert_eq!(batch.end(), Err(PathError::TooFewPoints(1)));

    assert_eq!(batch.strokes().len(), 1);
    assert_eq!(batch.vertex_count(), 4);

    // The batch is still usable.
    add_path(&mut batch, &[point(0.0, 0.0), point(1.0, 0.0)], &style, false);
    assert_eq!(batch.strokes().len(), 4);
}

#[test]
fn paths_and_dots_share_one_mesh() {
    let mut batch = StrokeBatch::new();
    let round = StrokeStyle::new(Color::BLACK, 2.0);
    let sharp = round.with_sharp_joins(true);

    add_path(&mut batch, &polygon(5, 10.0), &round, true);
    batch.add_dot(point(30.0, 0.0), Color::RED, 2.0).unwrap();
    add_path(
        &mut batch,
        &[point(0.0, 30.0), point(10.0, 35.0), point(20.0, 30.0)],
        &sharp,
        false,
    );
    batch.add_dot(point(40.0, 0.0), Color::RED, 2.0).unwrap();

    let buffers = tessellate(&mut batch, 1.5);
    assert_eq!(buffers.vertices.len(), batch.vertex_count());
    assert_eq!(buffers.indices.len(), batch.index_count());
    check_indices(&buffers);
}

#[test]
fn path_doubling_back() {
    let mut batch = StrokeBatch::new();
    let style = StrokeStyle::new(Color::BLACK, 2.0);
    add_path(&mut batch, &[point(0.0, 0.0), point(10.0, 0.0)], &style, true);

    assert_eq!(count(&batch, |s| matches!(s, Stroke::Arc { .. })), 2);

    let buffers = tessellate(&mut batch, 1.0);
    assert_eq!(buffers.vertices.len(), 18);
    check_indices(&buffers);
}

#[test]
fn clear() {
    let mut batch = StrokeBatch::new();
    batch.add_dot(point(0.0, 0.0), Color::BLACK, 1.0).unwrap();
    tessellate(&mut batch, 1.0);

    batch.clear();
    assert!(batch.is_empty());
    assert_eq!(batch.vertex_count(), 0);
    assert_eq!(batch.index_count(), 0);
    assert!(batch.needs_rebuild(1.0));

    let buffers = tessellate(&mut batch, 1.0);
    assert!(buffers.vertices.is_empty());
    assert!(buffers.indices.is_empty());
}

#[test]
fn invalid_zoom() {
    let mut batch = StrokeBatch::new();
    batch.add_dot(point(0.0, 0.0), Color::BLACK, 1.0).unwrap();

    assert!(matches!(
        batch.tessellate(0.0, &mut NoOutput::new()),
        Err(TessellationError::UnsupportedParameter(_))
    ));
    assert!(matches!(
        batch.tessellate(f32::NAN, &mut NoOutput::new()),
        Err(TessellationError::UnsupportedParameter(_))
    ));
    assert_eq!(batch.rebuild_count(), 0);
}

#[test]
#[should_panic]
fn add_point_without_start() {
    let mut batch = StrokeBatch::new();
    let _ = batch.add_point(point(0.0, 0.0), &PointStyle::INHERIT);
}

#[test]
fn cloned_batches_have_their_own_id() {
    let batch = StrokeBatch::new();
    let copy = batch.clone();

    assert_ne!(batch.id(), copy.id());
    assert_ne!(batch.id(), StrokeBatch::new().id());
    assert_eq!(batch.id(), batch.id());
}
