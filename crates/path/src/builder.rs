//! Path building utilities.
//!
//! A path or loop is described with an imperative sequence of calls:
//!
//! - `start_path` or `start_loop` with the first point and the default style of the
//!   sub-path,
//! - any number of `add_point` calls, each optionally overriding part of the style,
//! - `end`, which validates the sub-path as a whole and returns it.
//!
//! ## Contracts
//!
//! Calling the methods out of order (`add_point` or `end` without a matching `start_*`,
//! or `start_*` while a sub-path is still open) is a programming error and panics.
//!
//! Invalid data is rejected with a [`PathError`](../enum.PathError.html) by the call that
//! introduces it:
//!
//! - positions must be finite, stroke widths finite and positive, edge blends finite and
//!   non-negative,
//! - a rounded corner needs an arc radius at least as large as the stroke radius (smaller
//!   radii would require a filled join, which is not supported),
//! - when any point of a sub-path has a rounded corner, the stroke width must be the same
//!   for every point of that sub-path,
//! - a sub-path needs at least two points.
//!
//! ## Examples
//!
//! ```
//! use ribbon_path::{Color, PointStyle, StrokeStyle};
//! use ribbon_path::builder::PathBuilder;
//! use ribbon_path::math::point;
//!
//! let mut builder = PathBuilder::new();
//!
//! // A closed triangle with rounded corners of radius 3.
//! let style = StrokeStyle::new(Color::BLACK, 2.0).with_arc_radius(3.0);
//! builder.start_loop(point(0.0, 0.0), &style)?;
//! builder.add_point(point(10.0, 0.0), &PointStyle::INHERIT)?;
//! builder.add_point(point(5.0, 8.0), &PointStyle::INHERIT)?;
//!
//! let triangle = builder.end()?;
//! assert!(triangle.closed);
//! assert_eq!(triangle.num_segments(), 3);
//! # Ok::<(), ribbon_path::PathError>(())
//! ```

use crate::math::Point;
use crate::{Color, JoinKind, PathError, PathPoint, PointAction, PointStyle, StrokeStyle};

/// A validated open path or closed loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SubPath {
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

impl SubPath {
    /// Number of straight segments: one less than the number of points for an open path,
    /// one per point for a loop.
    pub fn num_segments(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len().saturating_sub(1)
        }
    }

    /// Number of corners that need a join.
    pub fn num_joins(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len().saturating_sub(2)
        }
    }
}

/// Accumulates the points of one sub-path at a time.
///
/// See the [module documentation](index.html).
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    points: Vec<PathPoint>,
    style: StrokeStyle,
    in_sub_path: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(points: usize) -> Self {
        PathBuilder {
            points: Vec::with_capacity(points),
            ..Self::default()
        }
    }

    /// Starts an open path, which will have caps at both ends.
    pub fn start_path(&mut self, at: Point, style: &StrokeStyle) -> Result<(), PathError> {
        self.start(PointAction::StartPath, at, style)
    }

    /// Starts a closed loop. The last point is connected back to the first one.
    pub fn start_loop(&mut self, at: Point, style: &StrokeStyle) -> Result<(), PathError> {
        self.start(PointAction::StartLoop, at, style)
    }

    fn start(
        &mut self,
        action: PointAction,
        at: Point,
        style: &StrokeStyle,
    ) -> Result<(), PathError> {
        assert!(
            !self.in_sub_path,
            "start_path/start_loop called while a sub-path is open, call end() first"
        );

        let point = style.to_point(action, at);
        check_point(&point, point.stroke_radius)?;

        self.points.clear();
        self.points.push(point);
        self.style = *style;
        self.in_sub_path = true;

        Ok(())
    }

    /// Adds a point to the current sub-path.
    ///
    /// Values not set in `style` are inherited from the most recent `start_*` call.
    ///
    /// # Panics
    ///
    /// If no sub-path is open.
    pub fn add_point(&mut self, at: Point, style: &PointStyle) -> Result<(), PathError> {
        assert!(
            self.in_sub_path,
            "add_point called before start_path or start_loop"
        );

        let point = style
            .resolve(&self.style)
            .to_point(PointAction::AddPoint, at);
        check_point(&point, self.points[0].stroke_radius)?;

        self.points.push(point);

        Ok(())
    }

    /// Ends the current sub-path and returns it.
    ///
    /// On error the sub-path is discarded and the builder is ready for another `start_*`
    /// call.
    ///
    /// # Panics
    ///
    /// If no sub-path is open.
    pub fn end(&mut self) -> Result<SubPath, PathError> {
        assert!(self.in_sub_path, "end called before start_path or start_loop");
        self.in_sub_path = false;

        let points = std::mem::take(&mut self.points);

        if points.len() < 2 {
            return Err(PathError::TooFewPoints(points.len()));
        }

        // A rounded corner anywhere requires a constant width everywhere.
        if points.iter().any(|p| !p.sharp) {
            let expected = points[0].stroke_radius;
            if let Some(p) = points.iter().find(|p| p.stroke_radius != expected) {
                return Err(PathError::VariableWidthRoundJoin {
                    expected: expected * 2.0,
                    actual: p.stroke_width(),
                });
            }
        }

        let closed = points[0].action == PointAction::StartLoop;

        Ok(SubPath { points, closed })
    }

    /// Validates and creates an isolated dot.
    pub fn dot(
        at: Point,
        color: Color,
        radius: f32,
        edge_blend: f32,
    ) -> Result<PathPoint, PathError> {
        let point = PathPoint::dot(at, color, radius, edge_blend);
        check_point(&point, radius)?;

        Ok(point)
    }

    /// Returns true between `start_*` and `end`.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.in_sub_path
    }

    /// Number of points of the current sub-path.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}

fn check_point(point: &PathPoint, sub_path_radius: f32) -> Result<(), PathError> {
    if !point.position.x.is_finite() || !point.position.y.is_finite() {
        return Err(PathError::NonFinitePosition(point.position));
    }

    let width = point.stroke_width();
    if !width.is_finite() || width <= 0.0 {
        return Err(PathError::InvalidStrokeWidth(width));
    }

    if !point.edge_blend.is_finite() || point.edge_blend < 0.0 {
        return Err(PathError::InvalidEdgeBlend(point.edge_blend));
    }

    if point.action == PointAction::DrawDot || point.sharp {
        return Ok(());
    }

    if point.join_kind() == JoinKind::Fill || !point.arc_radius.is_finite() {
        return Err(PathError::UnsupportedJoin {
            arc_radius: point.arc_radius,
            stroke_radius: point.stroke_radius,
        });
    }

    if point.stroke_radius != sub_path_radius {
        return Err(PathError::VariableWidthRoundJoin {
            expected: sub_path_radius * 2.0,
            actual: width,
        });
    }

    Ok(())
}

#[cfg(test)]
use crate::math::point;

#[test]
fn open_path() {
    let mut builder = PathBuilder::new();
    let style = StrokeStyle::new(Color::RED, 4.0).with_sharp_joins(true);

    builder.start_path(point(0.0, 0.0), &style).unwrap();
    assert!(builder.is_open());
    builder.add_point(point(10.0, 0.0), &PointStyle::INHERIT).unwrap();
    builder
        .add_point(point(10.0, 10.0), &PointStyle::INHERIT.with_width(8.0))
        .unwrap();
    assert_eq!(builder.num_points(), 3);

    let sub_path = builder.end().unwrap();
    assert!(!builder.is_open());
    assert!(!sub_path.closed);
    assert_eq!(sub_path.num_segments(), 2);
    assert_eq!(sub_path.num_joins(), 1);

    assert_eq!(sub_path.points[0].action, PointAction::StartPath);
    assert_eq!(sub_path.points[1].action, PointAction::AddPoint);
    assert_eq!(sub_path.points[1].color, Color::RED);
    assert_eq!(sub_path.points[1].stroke_radius, 2.0);
    assert_eq!(sub_path.points[2].stroke_radius, 4.0);
    assert!(sub_path.points.iter().all(|p| p.sharp));
}

#[test]
fn closed_loop() {
    let mut builder = PathBuilder::new();
    let style = StrokeStyle::new(Color::BLUE, 2.0).with_arc_radius(5.0);

    builder.start_loop(point(0.0, 0.0), &style).unwrap();
    builder.add_point(point(10.0, 0.0), &PointStyle::INHERIT).unwrap();
    builder
        .add_point(point(10.0, 10.0), &PointStyle::INHERIT.with_arc_radius(2.0))
        .unwrap();

    let sub_path = builder.end().unwrap();
    assert!(sub_path.closed);
    assert_eq!(sub_path.num_segments(), 3);
    assert_eq!(sub_path.num_joins(), 3);
    assert_eq!(sub_path.points[1].arc_radius, 5.0);
    assert_eq!(sub_path.points[2].arc_radius, 2.0);
    assert_eq!(sub_path.points[2].join_kind(), JoinKind::Arc);
}

#[test]
fn start_resets_inherited_style() {
    let mut builder = PathBuilder::new();

    builder
        .start_path(point(0.0, 0.0), &StrokeStyle::new(Color::RED, 2.0))
        .unwrap();
    builder.add_point(point(1.0, 0.0), &PointStyle::INHERIT).unwrap();
    builder.end().unwrap();

    builder
        .start_path(point(0.0, 0.0), &StrokeStyle::new(Color::GREEN, 2.0))
        .unwrap();
    builder.add_point(point(1.0, 0.0), &PointStyle::INHERIT).unwrap();
    let sub_path = builder.end().unwrap();

    assert_eq!(sub_path.points.len(), 2);
    assert_eq!(sub_path.points[1].color, Color::GREEN);
}

#[test]
fn fill_join_is_rejected() {
    let mut builder = PathBuilder::new();
    let style = StrokeStyle::new(Color::BLACK, 4.0);

    assert_eq!(
        builder.start_path(point(0.0, 0.0), &style.with_arc_radius(1.0)),
        Err(PathError::UnsupportedJoin {
            arc_radius: 1.0,
            stroke_radius: 2.0
        })
    );
    assert!(!builder.is_open());

    builder.start_path(point(0.0, 0.0), &style).unwrap();
    assert!(builder
        .add_point(point(5.0, 0.0), &PointStyle::INHERIT.with_arc_radius(0.5))
        .is_err());
    // The rejected point was not added.
    assert_eq!(builder.num_points(), 1);

    // Sharp corners ignore the arc radius.
    builder
        .add_point(
            point(5.0, 0.0),
            &PointStyle::INHERIT.with_arc_radius(0.5).with_sharp_join(true),
        )
        .unwrap();
    assert_eq!(builder.num_points(), 2);
}

#[test]
fn rounded_joins_require_constant_width() {
    let mut builder = PathBuilder::new();

    builder
        .start_path(point(0.0, 0.0), &StrokeStyle::new(Color::BLACK, 4.0))
        .unwrap();
    assert_eq!(
        builder.add_point(point(5.0, 0.0), &PointStyle::INHERIT.with_width(6.0)),
        Err(PathError::VariableWidthRoundJoin {
            expected: 4.0,
            actual: 6.0
        })
    );

    // A sharp point with a different width is accepted by add_point but the rounded
    // start makes the whole path invalid.
    builder
        .add_point(
            point(5.0, 0.0),
            &PointStyle::INHERIT.with_width(6.0).with_sharp_join(true),
        )
        .unwrap();
    assert!(matches!(
        builder.end(),
        Err(PathError::VariableWidthRoundJoin { .. })
    ));

    // Only sharp corners: variable widths are fine.
    let sharp = StrokeStyle::new(Color::BLACK, 4.0).with_sharp_joins(true);
    builder.start_path(point(0.0, 0.0), &sharp).unwrap();
    builder
        .add_point(point(5.0, 0.0), &PointStyle::INHERIT.with_width(6.0))
        .unwrap();
    assert!(builder.end().is_ok());
}

#[test]
fn invalid_values() {
    let mut builder = PathBuilder::new();
    let style = StrokeStyle::new(Color::BLACK, 2.0);

    assert!(matches!(
        builder.start_path(point(f32::NAN, 0.0), &style),
        Err(PathError::NonFinitePosition(_))
    ));
    assert_eq!(
        builder.start_path(point(0.0, 0.0), &style.with_width(0.0)),
        Err(PathError::InvalidStrokeWidth(0.0))
    );
    assert_eq!(
        builder.start_path(point(0.0, 0.0), &style.with_edge_blend(-1.0)),
        Err(PathError::InvalidEdgeBlend(-1.0))
    );
    assert!(PathBuilder::dot(point(0.0, 0.0), Color::RED, -1.0, 1.0).is_err());

    let dot = PathBuilder::dot(point(1.0, 1.0), Color::RED, 3.0, 1.0).unwrap();
    assert_eq!(dot.action, PointAction::DrawDot);
    assert_eq!(dot.stroke_radius, 3.0);
}

#[test]
fn too_few_points() {
    let mut builder = PathBuilder::new();
    builder
        .start_loop(point(0.0, 0.0), &StrokeStyle::new(Color::BLACK, 2.0))
        .unwrap();

    assert_eq!(builder.end(), Err(PathError::TooFewPoints(1)));
    assert!(!builder.is_open());
}

#[test]
#[should_panic]
fn add_point_without_start() {
    let mut builder = PathBuilder::new();
    let _ = builder.add_point(point(0.0, 0.0), &PointStyle::INHERIT);
}

#[test]
#[should_panic]
fn end_without_start() {
    let mut builder = PathBuilder::new();
    let _ = builder.end();
}

#[test]
#[should_panic]
fn start_twice() {
    let mut builder = PathBuilder::new();
    let style = StrokeStyle::new(Color::BLACK, 2.0);
    builder.start_path(point(0.0, 0.0), &style).unwrap();
    let _ = builder.start_loop(point(0.0, 0.0), &style);
}
