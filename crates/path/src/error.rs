use crate::math::Point;

/// Invalid input rejected by the [`PathBuilder`](builder/struct.PathBuilder.html).
///
/// These are reported at the call that introduces the problem so that a bad path never
/// reaches the tessellator.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("position {0:?} is not finite")]
    NonFinitePosition(Point),

    #[error("invalid stroke width {0} (must be finite and positive)")]
    InvalidStrokeWidth(f32),

    #[error("invalid edge blend {0} (must be finite and non-negative)")]
    InvalidEdgeBlend(f32),

    #[error("rounded joins require a constant stroke width (expected {expected}, got {actual})")]
    VariableWidthRoundJoin { expected: f32, actual: f32 },

    #[error(
        "arc radius {arc_radius} is smaller than the stroke radius {stroke_radius}, \
         filled joins are not supported"
    )]
    UnsupportedJoin { arc_radius: f32, stroke_radius: f32 },

    #[error("a path needs at least two points, got {0}")]
    TooFewPoints(usize),
}
