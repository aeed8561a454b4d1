/// The stroke tessellator's result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    InvalidVertex,
    TooManyVertices,
}

impl std::fmt::Display for GeometryBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryBuilderError::InvalidVertex => {
                write!(f, "Invalid vertex")
            }
            GeometryBuilderError::TooManyVertices => {
                write!(f, "Too many vertices")
            }
        }
    }
}

impl std::error::Error for GeometryBuilderError {}

/// Describes an unexpected error happening during tessellation.
///
/// These can only be produced by stroke lists that were not generated by the path builder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InternalError {
    /// A joint is not surrounded by two lines.
    MissingNeighbourLine,
    /// A stroke that is not a joint was resolved as one.
    NotAJoint,
    /// A resolved stroke has a vertex count that no primitive shape uses.
    UnexpectedVertexCount(usize),
}

impl std::fmt::Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalError::MissingNeighbourLine => {
                write!(f, "Joint is missing a neighbouring line")
            }
            InternalError::NotAJoint => {
                write!(f, "Stroke is not a joint")
            }
            InternalError::UnexpectedVertexCount(n) => {
                write!(f, "Unexpected number of vertices in a primitive ({n})")
            }
        }
    }
}

impl std::error::Error for InternalError {}

/// The stroke tessellator's error enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    UnsupportedParameter(UnsupportedParameter),
    GeometryBuilder(GeometryBuilderError),
    Internal(InternalError),
}

impl std::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessellationError::UnsupportedParameter(e) => {
                write!(f, "Unsupported parameter: {e}")
            }
            TessellationError::GeometryBuilder(e) => {
                write!(f, "Geometry builder error: {e}")
            }
            TessellationError::Internal(e) => {
                write!(f, "Internal error: {e}")
            }
        }
    }
}

impl std::error::Error for TessellationError {}

impl From<GeometryBuilderError> for TessellationError {
    fn from(value: GeometryBuilderError) -> Self {
        Self::GeometryBuilder(value)
    }
}

impl From<InternalError> for TessellationError {
    fn from(value: InternalError) -> Self {
        Self::Internal(value)
    }
}

impl From<UnsupportedParameter> for TessellationError {
    fn from(value: UnsupportedParameter) -> Self {
        Self::UnsupportedParameter(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UnsupportedParameter {
    /// Rounded corner with an arc radius smaller than the stroke radius.
    FillJoin,
    ZoomIsNotPositive,
    PositionIsNaN,
    WidthIsNotPositive,
    EdgeBlendIsNegative,
}

impl std::fmt::Display for UnsupportedParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsupportedParameter::FillJoin => {
                write!(f, "Filled joins (arc radius smaller than the stroke radius) are not supported")
            }
            UnsupportedParameter::ZoomIsNotPositive => {
                write!(f, "Zoom factor must be finite and positive")
            }
            UnsupportedParameter::PositionIsNaN => {
                write!(f, "Position is not a number")
            }
            UnsupportedParameter::WidthIsNotPositive => {
                write!(f, "Width must be finite and positive")
            }
            UnsupportedParameter::EdgeBlendIsNegative => {
                write!(f, "Edge blend must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for UnsupportedParameter {}
