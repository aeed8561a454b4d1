use crate::commands::{RenderCmd, StrokeCmd, TessellateCmd};
use ribbon::math::size;
use ribbon::path::{PathError, PointStyle};
use ribbon::renderer::{GpuVertex, HeadlessBackend, OrthoCamera, RenderError, StrokeRenderer};
use ribbon::tessellation::{
    BuffersBuilder, PrimitiveKind, StrokeBatch, StrokeVertex, TessellationError, VertexBuffers,
};
use std::io;

#[derive(Debug)]
pub enum TessError {
    Io(io::Error),
    Path(PathError),
    Tessellation(TessellationError),
    Render(RenderError),
}

impl std::convert::From<io::Error> for TessError {
    fn from(err: io::Error) -> Self {
        TessError::Io(err)
    }
}

impl std::convert::From<PathError> for TessError {
    fn from(err: PathError) -> Self {
        TessError::Path(err)
    }
}

impl std::convert::From<TessellationError> for TessError {
    fn from(err: TessellationError) -> Self {
        TessError::Tessellation(err)
    }
}

impl std::convert::From<RenderError> for TessError {
    fn from(err: RenderError) -> Self {
        TessError::Render(err)
    }
}

impl std::fmt::Display for TessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessError::Io(e) => write!(f, "{}", e),
            TessError::Path(e) => write!(f, "Invalid path: {}", e),
            TessError::Tessellation(e) => write!(f, "{}", e),
            TessError::Render(e) => write!(f, "{}", e),
        }
    }
}

fn build_batch(cmd: &StrokeCmd) -> Result<StrokeBatch, TessError> {
    let mut batch = StrokeBatch::new();

    if let Some((first, rest)) = cmd.points.split_first() {
        if cmd.closed {
            batch.start_loop(*first, &cmd.style)?;
        } else {
            batch.start_path(*first, &cmd.style)?;
        }
        for p in rest {
            batch.add_point(*p, &PointStyle::INHERIT)?;
        }
        batch.end()?;
    }

    for dot in &cmd.dots {
        batch.add_dot_with_edge_blend(
            *dot,
            cmd.style.color,
            cmd.style.width * 0.5,
            cmd.style.edge_blend,
        )?;
    }

    log::debug!(
        "Built a batch of {} strokes from {} points and {} dots",
        batch.strokes().len(),
        cmd.points.len(),
        cmd.dots.len(),
    );

    Ok(batch)
}

fn kind_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::None => "none",
        PrimitiveKind::Dot => "dot",
        PrimitiveKind::Line => "line",
        PrimitiveKind::Arc => "arc",
    }
}

pub fn tessellate(mut cmd: TessellateCmd) -> Result<(), TessError> {
    let mut batch = build_batch(&cmd.stroke)?;

    let mut buffers: VertexBuffers<StrokeVertex, u32> =
        VertexBuffers::with_capacity(batch.vertex_count(), batch.index_count());
    batch.tessellate(
        cmd.stroke.zoom,
        &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v),
    )?;

    if cmd.count {
        writeln!(
            &mut *cmd.output,
            "vertices: {}, triangles: {}",
            buffers.vertices.len(),
            buffers.indices.len() / 3
        )?;
        return Ok(());
    }

    writeln!(&mut *cmd.output, "vertices:")?;
    for (i, v) in buffers.vertices.iter().enumerate() {
        writeln!(
            &mut *cmd.output,
            "  {}: ({}, {}) {} [({}, {}) r={}] [({}, {}) r={}] blend={}",
            i,
            v.position.x,
            v.position.y,
            kind_name(v.kind),
            v.first.center.x,
            v.first.center.y,
            v.first.radius,
            v.second.center.x,
            v.second.center.y,
            v.second.radius,
            v.edge_blend,
        )?;
    }

    write!(&mut *cmd.output, "indices: [")?;
    let mut is_first = true;
    for index in &buffers.indices {
        if !is_first {
            write!(&mut *cmd.output, ", ")?;
        }
        write!(&mut *cmd.output, "{}", index)?;
        is_first = false;
    }
    writeln!(&mut *cmd.output, "]")?;

    Ok(())
}

pub fn render(mut cmd: RenderCmd) -> Result<(), TessError> {
    let mut batch = build_batch(&cmd.stroke)?;

    let camera = OrthoCamera::new(size(cmd.width, cmd.height))
        .with_center(cmd.center)
        .with_zoom(cmd.stroke.zoom);

    let mut renderer = StrokeRenderer::new(HeadlessBackend::new());
    renderer.load()?;
    renderer.render(&mut batch, &camera)?;

    for draw in renderer.backend().draws() {
        writeln!(
            &mut *cmd.output,
            "draw {}: {} vertices, {} indices, zoom {}",
            draw.technique.name(),
            draw.vertex_count,
            draw.index_count,
            draw.zoom,
        )?;
    }

    if batch.is_empty() {
        writeln!(&mut *cmd.output, "nothing to draw")?;
    } else {
        writeln!(
            &mut *cmd.output,
            "technique: {}, {} bytes of vertices",
            renderer.technique().name(),
            renderer.geometry().vertices.len() * GpuVertex::STRIDE as usize,
        )?;
    }

    renderer.unload();

    Ok(())
}
