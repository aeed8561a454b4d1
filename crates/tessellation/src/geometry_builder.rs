//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! The stroke batch and the one-shot line and dot functions do not write vertex and index
//! buffers directly. They push [`StrokeVertex`](../struct.StrokeVertex.html) values and
//! triangles into a [`StrokeGeometryBuilder`](trait.StrokeGeometryBuilder.html), which
//! decides what the output looks like.
//!
//! Pushing vertices and indices into a pair of vectors is by far the most common use case, so
//! this module also provides:
//!
//! * [`VertexBuffers`](struct.VertexBuffers.html), a pair of vectors of vertices and indices,
//! * [`BuffersBuilder`](struct.BuffersBuilder.html), which writes into a `VertexBuffers` and
//!   delegates the conversion of each `StrokeVertex` into the output vertex type to a
//!   [`StrokeVertexConstructor`](trait.StrokeVertexConstructor.html),
//! * [`NoOutput`](struct.NoOutput.html), which discards everything.
//!
//! ## Examples
//!
//! ### Generating custom vertices
//!
//! ```
//! use ribbon_tessellation::{BuffersBuilder, StrokeBatch, StrokeVertex, VertexBuffers};
//! use ribbon_tessellation::math::point;
//! use ribbon_tessellation::path::Color;
//!
//! #[derive(Copy, Clone, Debug)]
//! pub struct MyVertex {
//!     position: [f32; 2],
//!     color: [f32; 4],
//! }
//!
//! let mut batch = StrokeBatch::new();
//! batch.add_dot(point(5.0, 5.0), Color::RED, 2.0)?;
//!
//! let mut output: VertexBuffers<MyVertex, u16> = VertexBuffers::new();
//! batch.tessellate(
//!     1.0,
//!     &mut BuffersBuilder::new(&mut output, |v: StrokeVertex| MyVertex {
//!         position: v.position.to_array(),
//!         color: v.color.to_array(),
//!     }),
//! )?;
//!
//! assert_eq!(output.vertices.len(), 4);
//! assert_eq!(output.indices.len(), 6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Generating a completely custom output
//!
//! ```
//! use ribbon_tessellation::{
//!     GeometryBuilderError, StrokeGeometryBuilder, StrokeVertex, VertexId, tessellate_dot,
//! };
//! use ribbon_tessellation::math::point;
//! use ribbon_tessellation::path::Color;
//!
//! // Prints the geometry instead of storing it.
//! pub struct ToStdOut {
//!     vertices: u32,
//! }
//!
//! impl StrokeGeometryBuilder for ToStdOut {
//!     fn begin_geometry(&mut self) {
//!         self.vertices = 0;
//!         println!(" -- begin geometry");
//!     }
//!
//!     fn add_stroke_vertex(&mut self, vertex: StrokeVertex) -> Result<VertexId, GeometryBuilderError> {
//!         println!("vertex {:?} ({:?})", vertex.position, vertex.kind);
//!         self.vertices += 1;
//!         Ok(VertexId(self.vertices - 1))
//!     }
//!
//!     fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
//!         println!("triangle ({}, {}, {})", a.offset(), b.offset(), c.offset());
//!     }
//! }
//!
//! tessellate_dot(point(0.0, 0.0), Color::BLACK, 4.0, 1.0, 1.0, &mut ToStdOut { vertices: 0 })?;
//! # Ok::<(), ribbon_tessellation::TessellationError>(())
//! ```

pub use crate::error::GeometryBuilderError;
use crate::math::Point;
use crate::{Index, StrokeVertex, VertexId};

use std::ops::Add;

/// The interface between the tessellator and the actual vertex construction.
///
/// See the [`geometry_builder`](index.html) module documentation.
pub trait StrokeGeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Inserts a vertex and returns its id, which is only valid until `end_geometry`.
    fn add_stroke_vertex(&mut self, vertex: StrokeVertex)
        -> Result<VertexId, GeometryBuilderError>;

    /// Inserts a triangle made of vertices that were added after the last call to
    /// begin_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry.
    ///
    /// The implementation is expected to discard the geometry that was generated since the
    /// last time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    pub fn new() -> Self {
        VertexBuffers::with_capacity(512, 1024)
    }

    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Makes sure the buffers can hold exactly this much data without reallocating.
    pub fn reserve_exact(&mut self, num_vertices: usize, num_indices: usize) {
        self.vertices.reserve_exact(num_vertices);
        self.indices.reserve_exact(num_indices);
    }
}

/// A temporary view on a `VertexBuffers` object which facilitates the population of vertex
/// and index data.
///
/// `BuffersBuilder` records the vertex offset from when it is created so that the indices of
/// new geometry are correct even if some geometry was added to the buffers beforehand.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_constructor: ctor,
        }
    }

    pub fn buffers<'a, 'b: 'a>(&'b self) -> &'a VertexBuffers<OutputVertex, OutputIndex> {
        self.buffers
    }
}

/// A trait specifying how to create vertex values.
pub trait StrokeVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl StrokeVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> Point {
        vertex.position
    }
}

impl<F, OutputVertex> StrokeVertexConstructor<OutputVertex> for F
where
    F: Fn(StrokeVertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: StrokeVertex) -> OutputVertex {
        self(vertex)
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> StrokeGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: StrokeVertexConstructor<OutputVertex>,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
    }

    fn add_stroke_vertex(&mut self, v: StrokeVertex) -> Result<VertexId, GeometryBuilderError> {
        let len = self.buffers.vertices.len();
        if len >= OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(v));

        Ok(VertexId(len as Index))
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push(a.into());
        self.buffers.indices.push(b.into());
        self.buffers.indices.push(c.into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing.
pub struct NoOutput {
    next_vertex: u32,
    num_triangles: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput {
            next_vertex: 0,
            num_triangles: 0,
        }
    }

    /// Number of vertices added since the last `begin_geometry`.
    pub fn num_vertices(&self) -> u32 {
        self.next_vertex
    }

    /// Number of triangles added since the last `begin_geometry`.
    pub fn num_triangles(&self) -> u32 {
        self.num_triangles
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeGeometryBuilder for NoOutput {
    fn begin_geometry(&mut self) {
        self.next_vertex = 0;
        self.num_triangles = 0;
    }

    fn add_stroke_vertex(&mut self, _: StrokeVertex) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a.0 < self.next_vertex);
        debug_assert!(b.0 < self.next_vertex);
        debug_assert!(c.0 < self.next_vertex);
        self.num_triangles += 1;
    }
}

/// Provides the maximum number of vertices an index type can address.
///
/// The tessellator can't internally represent more than u32::MAX indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for i32 {
    const MAX: usize = i32::MAX as usize;
}
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}

#[cfg(test)]
fn test_vertex(x: f32, y: f32) -> StrokeVertex {
    use crate::path::Color;
    use crate::{Circle, PrimitiveKind};

    let position = crate::math::point(x, y);
    StrokeVertex {
        position,
        first: Circle::new(position, 1.0),
        second: Circle::new(position, 1.0),
        color: Color::BLACK,
        kind: PrimitiveKind::Dot,
        edge_blend: 0.0,
    }
}

#[test]
fn buffers_builder_offsets_and_abort() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    buffers.vertices.push(crate::math::point(-1.0, -1.0));

    let mut builder = BuffersBuilder::new(&mut buffers, Positions);
    builder.begin_geometry();
    let a = builder.add_stroke_vertex(test_vertex(0.0, 0.0)).unwrap();
    let b = builder.add_stroke_vertex(test_vertex(1.0, 0.0)).unwrap();
    let c = builder.add_stroke_vertex(test_vertex(0.0, 1.0)).unwrap();
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices, vec![1, 2, 3]);

    let mut builder = BuffersBuilder::new(&mut buffers, Positions);
    builder.begin_geometry();
    builder.add_stroke_vertex(test_vertex(5.0, 5.0)).unwrap();
    builder.abort_geometry();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 3);
}

#[test]
fn no_output_counts() {
    let mut output = NoOutput::new();
    output.begin_geometry();
    let a = output.add_stroke_vertex(test_vertex(0.0, 0.0)).unwrap();
    let b = output.add_stroke_vertex(test_vertex(1.0, 0.0)).unwrap();
    let c = output.add_stroke_vertex(test_vertex(0.0, 1.0)).unwrap();
    output.add_triangle(a, b, c);
    output.end_geometry();

    assert_eq!(output.num_vertices(), 3);
    assert_eq!(output.num_triangles(), 1);
}
