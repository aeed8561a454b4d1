//! Writes resolved primitives into a geometry builder.

use crate::geometry_builder::StrokeGeometryBuilder;
use crate::{
    InternalError, StrokeVertex, TessellationError, TessellationResult, VertexId,
    ARC_FAN_INDICES, QUAD_INDICES,
};

/// Adds the vertices and triangles of one primitive.
///
/// Quads produce two triangles and arc fans three. Empty vertex sets (sharp joints) produce
/// nothing.
pub(crate) fn add_primitive(
    vertices: &[StrokeVertex],
    output: &mut dyn StrokeGeometryBuilder,
) -> Result<(), TessellationError> {
    let pattern: &[u32] = match vertices.len() {
        0 => return Ok(()),
        4 => &QUAD_INDICES,
        5 => &ARC_FAN_INDICES,
        n => return Err(InternalError::UnexpectedVertexCount(n).into()),
    };

    let mut ids = [VertexId::INVALID; 5];
    for (id, vertex) in ids.iter_mut().zip(vertices) {
        *id = output.add_stroke_vertex(*vertex)?;
    }

    for tri in pattern.chunks(3) {
        output.add_triangle(
            ids[tri[0] as usize],
            ids[tri[1] as usize],
            ids[tri[2] as usize],
        );
    }

    Ok(())
}

/// Writes a list of primitives as one geometry, aborting it on error.
pub(crate) fn assemble<'l, I>(primitives: I, output: &mut dyn StrokeGeometryBuilder) -> TessellationResult
where
    I: IntoIterator<Item = &'l [StrokeVertex]>,
{
    output.begin_geometry();

    for vertices in primitives {
        if let Err(e) = add_primitive(vertices, output) {
            output.abort_geometry();
            return Err(e);
        }
    }

    output.end_geometry();

    Ok(())
}
