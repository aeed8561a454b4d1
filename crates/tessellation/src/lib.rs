#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Tessellation of stroked paths, loops and dots into antialiasing-friendly triangles.
//!
//! This crate is reexported in [ribbon](../ribbon/index.html).
//!
//! ## Overview
//!
//! The most interesting types and functions of this crate are:
//!
//! * [`StrokeBatch`](struct.StrokeBatch.html) - Accumulates paths, loops and dots and
//!   tessellates them all at once into a single mesh.
//! * [`resolve_joint`](fn.resolve_joint.html) - Computes the geometry of a corner from the
//!   two lines around it.
//! * [`tessellate_line`](fn.tessellate_line.html) and
//!   [`tessellate_dot`](fn.tessellate_dot.html) - One-shot helpers for a single capped
//!   segment or dot.
//! * [`StrokeGeometryBuilder`](geometry_builder/trait.StrokeGeometryBuilder.html) - (See the
//!   documentation of the [geometry_builder module](geometry_builder/index.html)) the output
//!   interface of all of the above.
//!
//! ## The tessellation pipeline
//!
//! Each path or loop is turned into a list of [`Stroke`](enum.Stroke.html)s when it is
//! ended: lines between consecutive points, a joint at each corner and, for open paths, a cap
//! at each end. Dots are single strokes.
//!
//! The vertices are then computed in two passes. Lines, caps and dots only depend on their
//! own points and are computed first. Joints are resolved next: a sharp joint moves the
//! corner vertices of the two adjoining lines to the miter points, an arc joint retracts them
//! to the tangent points of the arc and adds a five-vertex fan covering the corner.
//!
//! Finally every stroke writes its vertices to the geometry builder, with two triangles per
//! quad and three per arc fan.
//!
//! ## Antialiasing
//!
//! The geometry is larger than the stroke it represents by the stroke's edge blend. Each
//! vertex carries the exact shape of its primitive (see [`StrokeVertex`](struct.StrokeVertex.html))
//! and the fragment program computes the coverage from the distance to that shape. Edge blends
//! are expressed in screen pixels and divided by the zoom factor during tessellation.

pub use ribbon_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod basic_shapes;
mod batch;
mod error;
pub mod geometry_builder;
mod join;
mod mesh;
mod stroke;
mod vertex;

#[cfg(test)]
mod stroke_tests;

pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::basic_shapes::{tessellate_dot, tessellate_line};

#[doc(inline)]
pub use crate::batch::{BatchId, BatchOptions, StrokeBatch};

#[doc(inline)]
pub use crate::join::{resolve_joint, ResolvedJoint};

#[doc(inline)]
pub use crate::stroke::{strokes_for_sub_path, CapEnd, Stroke, StrokeVertices};

#[doc(inline)]
pub use crate::vertex::{
    Circle, PrimitiveKind, Quad, StrokeVertex, ARC_FAN_INDICES, QUAD_INDICES,
};

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, GeometryBuilderError, NoOutput, StrokeGeometryBuilder,
    StrokeVertexConstructor, VertexBuffers,
};

#[doc(inline)]
pub use crate::error::*;

use std::ops::{Add, Sub};

pub type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `StrokeGeometryBuilder::begin_geometry` and
/// `StrokeGeometryBuilder::end_geometry`, and only meaningful to the builder that returned
/// them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    pub fn offset(self) -> Index {
        self.0
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    pub fn from_usize(v: usize) -> Self {
        VertexId(v as Index)
    }
}

impl Add<u32> for VertexId {
    type Output = Self;
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl Sub<u32> for VertexId {
    type Output = Self;
    fn sub(self, rhs: u32) -> Self {
        VertexId(self.0 - rhs)
    }
}

impl From<u16> for VertexId {
    fn from(v: u16) -> Self {
        VertexId(v as Index)
    }
}
impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}
impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}
impl From<VertexId> for i32 {
    fn from(v: VertexId) -> Self {
        v.0 as i32
    }
}
impl From<VertexId> for usize {
    fn from(v: VertexId) -> Self {
        v.0 as usize
    }
}
