use crate::math::Point;
use crate::Color;

/// What a [`PathPoint`] was created by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PointAction {
    /// First point of an open path.
    StartPath,
    /// First point of a closed loop.
    StartLoop,
    /// Any subsequent point of a path or loop.
    AddPoint,
    /// An isolated dot.
    DrawDot,
}

impl PointAction {
    #[inline]
    pub fn is_start(self) -> bool {
        matches!(self, PointAction::StartPath | PointAction::StartLoop)
    }
}

/// The geometry used to connect two consecutive segments at a path point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum JoinKind {
    /// Mitered corner.
    Sharp,
    /// Rounded corner drawn as a true circular arc.
    Arc,
    /// Rounded corner with an arc radius smaller than the stroke radius.
    ///
    /// Not supported: the builder rejects it.
    Fill,
}

impl JoinKind {
    pub fn classify(sharp: bool, arc_radius: f32, stroke_radius: f32) -> Self {
        if sharp {
            JoinKind::Sharp
        } else if arc_radius >= stroke_radius {
            JoinKind::Arc
        } else {
            JoinKind::Fill
        }
    }
}

/// One vertex of a path, loop or dot request.
///
/// Path points are plain values, created by the path builder and never modified afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathPoint {
    pub action: PointAction,
    pub position: Point,
    pub color: Color,
    /// Half of the stroke width.
    pub stroke_radius: f32,
    /// Radius of the outer edge of a rounded corner.
    pub arc_radius: f32,
    /// Mitered (true) or rounded (false) corner.
    pub sharp: bool,
    /// Width of the antialiasing falloff, in screen pixels.
    pub edge_blend: f32,
}

impl PathPoint {
    /// Creates a `DrawDot` point.
    pub fn dot(position: Point, color: Color, radius: f32, edge_blend: f32) -> Self {
        PathPoint {
            action: PointAction::DrawDot,
            position,
            color,
            stroke_radius: radius,
            arc_radius: radius,
            sharp: false,
            edge_blend,
        }
    }

    #[inline]
    pub fn join_kind(&self) -> JoinKind {
        JoinKind::classify(self.sharp, self.arc_radius, self.stroke_radius)
    }

    #[inline]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_radius * 2.0
    }
}

/// Parameters of `start_path` and `start_loop`.
///
/// Points added afterwards inherit every value they do not override.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeStyle {
    /// Default value: `Color::BLACK`.
    pub color: Color,

    /// Full stroke width (twice the stroke radius).
    ///
    /// Default value: `StrokeStyle::DEFAULT_WIDTH`.
    pub width: f32,

    /// Radius of the outer edge of rounded corners.
    ///
    /// `None` means the corner is rounded with the stroke radius, which is the classic
    /// round join.
    ///
    /// Default value: `None`.
    pub arc_radius: Option<f32>,

    /// Whether corners are mitered instead of rounded.
    ///
    /// Default value: `false`.
    pub sharp: bool,

    /// Width of the antialiasing falloff in screen pixels.
    ///
    /// Default value: `StrokeStyle::DEFAULT_EDGE_BLEND`.
    pub edge_blend: f32,
}

impl StrokeStyle {
    pub const DEFAULT_WIDTH: f32 = 1.0;
    pub const DEFAULT_EDGE_BLEND: f32 = 1.0;

    pub const DEFAULT: Self = StrokeStyle {
        color: Color::BLACK,
        width: Self::DEFAULT_WIDTH,
        arc_radius: None,
        sharp: false,
        edge_blend: Self::DEFAULT_EDGE_BLEND,
    };

    #[inline]
    pub const fn new(color: Color, width: f32) -> Self {
        Self::DEFAULT.with_color(color).with_width(width)
    }

    #[inline]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub const fn with_arc_radius(mut self, radius: f32) -> Self {
        self.arc_radius = Some(radius);
        self
    }

    #[inline]
    pub const fn with_sharp_joins(mut self, sharp: bool) -> Self {
        self.sharp = sharp;
        self
    }

    #[inline]
    pub const fn with_edge_blend(mut self, edge_blend: f32) -> Self {
        self.edge_blend = edge_blend;
        self
    }

    pub(crate) fn to_point(&self, action: PointAction, position: Point) -> PathPoint {
        let stroke_radius = self.width * 0.5;
        PathPoint {
            action,
            position,
            color: self.color,
            stroke_radius,
            arc_radius: self.arc_radius.unwrap_or(stroke_radius),
            sharp: self.sharp,
            edge_blend: self.edge_blend,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-point overrides for `add_point`.
///
/// Unset values are inherited from the style passed to the most recent `start_path` or
/// `start_loop` call.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PointStyle {
    pub color: Option<Color>,
    pub width: Option<f32>,
    pub arc_radius: Option<f32>,
    pub sharp: Option<bool>,
    pub edge_blend: Option<f32>,
}

impl PointStyle {
    /// Inherit everything.
    pub const INHERIT: Self = PointStyle {
        color: None,
        width: None,
        arc_radius: None,
        sharp: None,
        edge_blend: None,
    };

    #[inline]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[inline]
    pub const fn with_arc_radius(mut self, radius: f32) -> Self {
        self.arc_radius = Some(radius);
        self
    }

    #[inline]
    pub const fn with_sharp_join(mut self, sharp: bool) -> Self {
        self.sharp = Some(sharp);
        self
    }

    #[inline]
    pub const fn with_edge_blend(mut self, edge_blend: f32) -> Self {
        self.edge_blend = Some(edge_blend);
        self
    }

    /// Applies the overrides on top of the inherited style.
    pub fn resolve(&self, inherited: &StrokeStyle) -> StrokeStyle {
        StrokeStyle {
            color: self.color.unwrap_or(inherited.color),
            width: self.width.unwrap_or(inherited.width),
            arc_radius: self.arc_radius.or(inherited.arc_radius),
            sharp: self.sharp.unwrap_or(inherited.sharp),
            edge_blend: self.edge_blend.unwrap_or(inherited.edge_blend),
        }
    }
}

#[test]
fn join_classification() {
    assert_eq!(JoinKind::classify(true, 0.0, 2.0), JoinKind::Sharp);
    assert_eq!(JoinKind::classify(false, 2.0, 2.0), JoinKind::Arc);
    assert_eq!(JoinKind::classify(false, 5.0, 2.0), JoinKind::Arc);
    assert_eq!(JoinKind::classify(false, 1.0, 2.0), JoinKind::Fill);
}

#[test]
fn point_style_inheritance() {
    let start = StrokeStyle::new(Color::RED, 4.0)
        .with_arc_radius(3.0)
        .with_edge_blend(2.0);

    let same = PointStyle::INHERIT.resolve(&start);
    assert_eq!(same, start);

    let overridden = PointStyle::INHERIT
        .with_color(Color::GREEN)
        .with_sharp_join(true)
        .resolve(&start);
    assert_eq!(overridden.color, Color::GREEN);
    assert!(overridden.sharp);
    assert_eq!(overridden.width, 4.0);
    assert_eq!(overridden.arc_radius, Some(3.0));
    assert_eq!(overridden.edge_blend, 2.0);
}

#[test]
fn default_arc_radius_is_stroke_radius() {
    use crate::math::point;

    let p = StrokeStyle::new(Color::BLACK, 6.0).to_point(PointAction::AddPoint, point(1.0, 2.0));
    assert_eq!(p.stroke_radius, 3.0);
    assert_eq!(p.arc_radius, 3.0);
    assert_eq!(p.join_kind(), JoinKind::Arc);
    assert_eq!(p.stroke_width(), 6.0);
}
