use crate::math::Point;
use crate::path::Color;

/// The shape a fragment program draws for a vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PrimitiveKind {
    None,
    /// A disc, used for dots and caps.
    Dot,
    /// A segment with a radius at each end.
    Line,
    /// A ring section, used for rounded corners.
    Arc,
}

impl PrimitiveKind {
    /// Numeric tag written into vertex buffers.
    #[inline]
    pub fn gpu_code(self) -> u32 {
        match self {
            PrimitiveKind::None => 0,
            PrimitiveKind::Dot => 1,
            PrimitiveKind::Line => 2,
            PrimitiveKind::Arc => 3,
        }
    }
}

impl Default for PrimitiveKind {
    fn default() -> Self {
        PrimitiveKind::None
    }
}

/// A center and a radius.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub fn new(center: Point, radius: f32) -> Self {
        Circle { center, radius }
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.center.x, self.center.y, self.radius]
    }
}

/// A vertex produced by the stroke tessellator.
///
/// Besides its position, every vertex carries the description of the primitive it belongs to
/// so that the fragment program can compute the exact distance to the stroke's boundary:
///
/// | kind     | `first`                       | `second`                                 |
/// |----------|-------------------------------|------------------------------------------|
/// | `Dot`    | center, stroke radius         | center, stroke radius                    |
/// | `Line`   | start point, start radius     | end point, end radius                    |
/// | `Arc`    | arc center, arc radius        | arc center, arc radius - stroke width    |
///
/// Positions are offset from the true boundary by `edge_blend` so that there is room for
/// the antialiasing falloff.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeVertex {
    pub position: Point,
    pub first: Circle,
    pub second: Circle,
    pub color: Color,
    pub kind: PrimitiveKind,
    /// Width of the antialiasing falloff in local units (screen pixels divided by the zoom).
    pub edge_blend: f32,
}

impl StrokeVertex {
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Four vertices forming two triangles.
///
/// The vertex order is start-left, end-left, start-right, end-right, relative to the
/// primitive's axis.
pub type Quad = [StrokeVertex; 4];

/// Index pattern of a quad.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 0, 3, 2];

/// Index pattern of the five-vertex arc fan.
///
/// Vertices 0 and 1 are the inner and outer end of the line before the corner, 2 and 3 the
/// inner and outer start of the line after it, 4 is the intersection of the outer edges.
pub const ARC_FAN_INDICES: [u32; 9] = [0, 1, 4, 4, 2, 0, 4, 3, 2];

#[test]
fn gpu_codes() {
    assert_eq!(PrimitiveKind::None.gpu_code(), 0);
    assert_eq!(PrimitiveKind::Dot.gpu_code(), 1);
    assert_eq!(PrimitiveKind::Line.gpu_code(), 2);
    assert_eq!(PrimitiveKind::Arc.gpu_code(), 3);
    assert_eq!(PrimitiveKind::default(), PrimitiveKind::None);
}
