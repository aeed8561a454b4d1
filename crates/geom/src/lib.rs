#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D line geometry on top of euclid.
//!
//! This crate is reexported in [ribbon](../ribbon/index.html).
//!
//! # Overview.
//!
//! The stroke tessellator only ever deals with straight segments: every corner of a
//! path is resolved by intersecting the edges of the quads generated for the two
//! adjoining segments. This crate implements the small amount of maths needed for that:
//!
//! - infinite lines (a point and a direction) and their parametric intersection,
//! - line segments, their sampling and their intersection,
//! - a few vector helpers (normals, tangents with a fallback for degenerate input).
//!
//! All types work with `f32` coordinates in an untyped euclid space.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod line;
pub mod utils;

#[doc(inline)]
pub use crate::line::{Line, LineSegment};

/// Alias for `euclid::default::Point2D<f32>`.
pub type Point = euclid::default::Point2D<f32>;

/// Alias for `euclid::default::Vector2D<f32>`.
pub type Vector = euclid::default::Vector2D<f32>;

/// Alias for `euclid::default::Box2D<f32>`.
pub type Box2D = euclid::default::Box2D<f32>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Threshold under which a cross product is considered to describe parallel directions.
pub const PARALLEL_EPSILON: f32 = 1e-6;
