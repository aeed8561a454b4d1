use crate::geometry_builder::StrokeGeometryBuilder;
use crate::join::resolve_joint;
use crate::math::Point;
use crate::mesh::assemble;
use crate::path::builder::{PathBuilder, SubPath};
use crate::path::{Color, PathError, PointStyle, StrokeStyle};
use crate::stroke::{strokes_for_sub_path, Stroke, StrokeVertices};
use crate::{InternalError, Quad, TessellationResult, UnsupportedParameter};

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BATCH_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies a [`StrokeBatch`](struct.StrokeBatch.html) for as long as the program runs.
///
/// Cloning a batch gives the clone a new id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(u64);

impl BatchId {
    fn next() -> Self {
        BatchId(NEXT_BATCH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Parameters of a [`StrokeBatch`](struct.StrokeBatch.html).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct BatchOptions {
    /// Edge blend of dots added with `add_dot`, in screen pixels.
    ///
    /// Default value: `BatchOptions::DEFAULT_EDGE_BLEND`.
    pub default_edge_blend: f32,

    /// Number of strokes to allocate space for up front.
    ///
    /// Default value: `BatchOptions::DEFAULT_STROKE_CAPACITY`.
    pub stroke_capacity: usize,
}

impl BatchOptions {
    pub const DEFAULT_EDGE_BLEND: f32 = StrokeStyle::DEFAULT_EDGE_BLEND;
    pub const DEFAULT_STROKE_CAPACITY: usize = 64;

    pub const DEFAULT: Self = BatchOptions {
        default_edge_blend: Self::DEFAULT_EDGE_BLEND,
        stroke_capacity: Self::DEFAULT_STROKE_CAPACITY,
    };

    #[inline]
    pub const fn with_default_edge_blend(mut self, edge_blend: f32) -> Self {
        self.default_edge_blend = edge_blend;
        self
    }

    #[inline]
    pub const fn with_stroke_capacity(mut self, capacity: usize) -> Self {
        self.stroke_capacity = capacity;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Debug)]
struct SubPathStrokes {
    range: Range<usize>,
    closed: bool,
}

/// A set of paths, loops and dots drawn together.
///
/// Paths are described with the same call sequence as the
/// [`PathBuilder`](../path/builder/struct.PathBuilder.html). Each `end()` or `add_dot()` call
/// appends the corresponding strokes to the batch.
///
/// The vertices are computed lazily in `tessellate`, and only if strokes were added (or the
/// zoom changed) since the previous call. The number of vertices and indices is tracked as
/// strokes are added so that output buffers can be allocated in one go.
///
/// # Examples
///
/// ```
/// use ribbon_tessellation::{StrokeBatch, StrokeVertex, VertexBuffers, BuffersBuilder};
/// use ribbon_tessellation::math::point;
/// use ribbon_tessellation::path::{Color, PointStyle, StrokeStyle};
///
/// let mut batch = StrokeBatch::new();
///
/// let style = StrokeStyle::new(Color::RED, 4.0).with_sharp_joins(true);
/// batch.start_path(point(0.0, 0.0), &style)?;
/// batch.add_point(point(10.0, 0.0), &PointStyle::INHERIT)?;
/// batch.add_point(point(10.0, 10.0), &PointStyle::INHERIT)?;
/// batch.end()?;
///
/// // Two caps and two lines.
/// assert_eq!(batch.vertex_count(), 16);
/// assert_eq!(batch.index_count(), 24);
///
/// let mut buffers: VertexBuffers<StrokeVertex, u16> = VertexBuffers::new();
/// batch.tessellate(1.0, &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v))?;
///
/// assert_eq!(buffers.vertices.len(), 16);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StrokeBatch {
    id: BatchId,
    builder: PathBuilder,
    strokes: Vec<Stroke>,
    sub_paths: Vec<SubPathStrokes>,
    resolved: Vec<StrokeVertices>,
    num_vertices: usize,
    num_indices: usize,
    options: BatchOptions,
    dirty: bool,
    resolved_zoom: Option<f32>,
    rebuild_count: u32,
}

impl Clone for StrokeBatch {
    fn clone(&self) -> Self {
        StrokeBatch {
            id: BatchId::next(),
            builder: self.builder.clone(),
            strokes: self.strokes.clone(),
            sub_paths: self.sub_paths.clone(),
            resolved: self.resolved.clone(),
            num_vertices: self.num_vertices,
            num_indices: self.num_indices,
            options: self.options,
            dirty: self.dirty,
            resolved_zoom: self.resolved_zoom,
            rebuild_count: self.rebuild_count,
        }
    }
}

impl StrokeBatch {
    pub fn new() -> Self {
        Self::with_options(BatchOptions::DEFAULT)
    }

    pub fn with_options(options: BatchOptions) -> Self {
        StrokeBatch {
            id: BatchId::next(),
            builder: PathBuilder::new(),
            strokes: Vec::with_capacity(options.stroke_capacity),
            sub_paths: Vec::new(),
            resolved: Vec::new(),
            num_vertices: 0,
            num_indices: 0,
            options,
            dirty: true,
            resolved_zoom: None,
            rebuild_count: 0,
        }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    pub fn id(&self) -> BatchId {
        self.id
    }

    /// Starts an open path.
    ///
    /// # Panics
    ///
    /// If a path or loop is already open.
    pub fn start_path(&mut self, at: Point, style: &StrokeStyle) -> Result<(), PathError> {
        self.builder.start_path(at, style)
    }

    /// Starts a closed loop.
    ///
    /// # Panics
    ///
    /// If a path or loop is already open.
    pub fn start_loop(&mut self, at: Point, style: &StrokeStyle) -> Result<(), PathError> {
        self.builder.start_loop(at, style)
    }

    /// Adds a point to the current path or loop.
    ///
    /// # Panics
    ///
    /// If no path or loop is open.
    pub fn add_point(&mut self, at: Point, style: &PointStyle) -> Result<(), PathError> {
        self.builder.add_point(at, style)
    }

    /// Ends the current path or loop and appends its strokes to the batch.
    ///
    /// # Panics
    ///
    /// If no path or loop is open.
    pub fn end(&mut self) -> Result<(), PathError> {
        let sub_path = self.builder.end()?;
        self.add_sub_path(&sub_path);

        Ok(())
    }

    /// Appends the strokes of an already built path or loop.
    pub fn add_sub_path(&mut self, sub_path: &SubPath) {
        let start = self.strokes.len();
        strokes_for_sub_path(sub_path, &mut self.strokes);
        let end = self.strokes.len();

        self.count(start..end);
        self.sub_paths.push(SubPathStrokes {
            range: start..end,
            closed: sub_path.closed,
        });

        log::trace!(
            "Added {} with {} points ({} strokes)",
            if sub_path.closed { "loop" } else { "path" },
            sub_path.points.len(),
            end - start,
        );
    }

    /// Adds a dot with the default edge blend.
    pub fn add_dot(&mut self, at: Point, color: Color, radius: f32) -> Result<(), PathError> {
        self.add_dot_with_edge_blend(at, color, radius, self.options.default_edge_blend)
    }

    pub fn add_dot_with_edge_blend(
        &mut self,
        at: Point,
        color: Color,
        radius: f32,
        edge_blend: f32,
    ) -> Result<(), PathError> {
        let at = PathBuilder::dot(at, color, radius, edge_blend)?;

        let idx = self.strokes.len();
        self.strokes.push(Stroke::Dot { at });
        self.count(idx..(idx + 1));

        log::trace!("Added dot at {:?}", at.position);

        Ok(())
    }

    fn count(&mut self, range: Range<usize>) {
        for stroke in &self.strokes[range] {
            self.num_vertices += stroke.num_vertices();
            self.num_indices += stroke.num_indices();
        }
        self.dirty = true;
    }

    /// Removes all strokes and discards the current path if any.
    pub fn clear(&mut self) {
        self.builder = PathBuilder::new();
        self.strokes.clear();
        self.sub_paths.clear();
        self.resolved.clear();
        self.num_vertices = 0;
        self.num_indices = 0;
        self.dirty = true;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of vertices `tessellate` produces.
    pub fn vertex_count(&self) -> usize {
        self.num_vertices
    }

    /// Number of indices `tessellate` produces.
    pub fn index_count(&self) -> usize {
        self.num_indices
    }

    /// Whether the next `tessellate` call at this zoom factor recomputes the vertices.
    pub fn needs_rebuild(&self, zoom: f32) -> bool {
        self.dirty || self.resolved_zoom != Some(zoom)
    }

    /// How many times the vertices were computed.
    pub fn rebuild_count(&self) -> u32 {
        self.rebuild_count
    }

    /// Writes the geometry of every stroke in the batch.
    ///
    /// Edge blends are divided by `zoom` so that the antialiasing falloff has a constant
    /// width on screen.
    pub fn tessellate(
        &mut self,
        zoom: f32,
        output: &mut dyn StrokeGeometryBuilder,
    ) -> TessellationResult {
        check_zoom(zoom)?;

        if self.needs_rebuild(zoom) {
            log::debug!(
                "Resolving {} strokes ({} vertices, {} indices) at zoom {}",
                self.strokes.len(),
                self.num_vertices,
                self.num_indices,
                zoom,
            );

            self.resolve(zoom)?;
            self.dirty = false;
            self.resolved_zoom = Some(zoom);
            self.rebuild_count += 1;
        }

        assemble(self.resolved.iter().map(|v| &v[..]), output)
    }

    /// Computes the vertices of all strokes in two passes: lines, caps and dots first, then
    /// the joints, which adjust the lines around them.
    fn resolve(&mut self, zoom: f32) -> TessellationResult {
        self.resolved.clear();
        self.resolved
            .extend(self.strokes.iter().map(|stroke| stroke.vertices(zoom)));

        for sub_path in &self.sub_paths {
            let range = sub_path.range.clone();
            for idx in range.clone() {
                if !self.strokes[idx].is_joint() {
                    continue;
                }

                let prev = if idx > range.start {
                    idx - 1
                } else {
                    return Err(InternalError::MissingNeighbourLine.into());
                };
                let next = if idx + 1 < range.end {
                    idx + 1
                } else if sub_path.closed {
                    range.start
                } else {
                    return Err(InternalError::MissingNeighbourLine.into());
                };

                let before = line_quad(&self.strokes, &self.resolved, prev);
                let after = line_quad(&self.strokes, &self.resolved, next);
                let joint = resolve_joint(&self.strokes[idx], before.as_ref(), after.as_ref(), zoom)?;

                self.resolved[prev] = joint.before.iter().cloned().collect();
                self.resolved[next] = joint.after.iter().cloned().collect();
                self.resolved[idx] = joint.vertices;
            }
        }

        Ok(())
    }
}

impl Default for StrokeBatch {
    fn default() -> Self {
        Self::new()
    }
}

fn line_quad(strokes: &[Stroke], resolved: &[StrokeVertices], idx: usize) -> Option<Quad> {
    if !strokes[idx].is_line() {
        return None;
    }

    match resolved[idx].as_slice() {
        &[a, b, c, d] => Some([a, b, c, d]),
        _ => None,
    }
}

pub(crate) fn check_zoom(zoom: f32) -> TessellationResult {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(())
    } else {
        Err(UnsupportedParameter::ZoomIsNotPositive.into())
    }
}
