#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Data structures to describe stroked paths, loops and dots.
//!
//! This crate is reexported in [ribbon](../ribbon/index.html).
//!
//! A path is described as a sequence of [`PathPoint`]s. Each point carries everything
//! the tessellator needs to know about the stroke at that location: its color, its
//! stroke radius, the style of the corner (join) formed at the point and the width of
//! the antialiasing falloff reserved around the geometry.
//!
//! Points are accumulated with a [`PathBuilder`](builder/struct.PathBuilder.html) which
//! validates the input as it is added and returns a [`SubPath`] when the path or loop
//! is ended.
//!
//! # Examples
//!
//! ```
//! use ribbon_path::{Color, PointStyle, StrokeStyle};
//! use ribbon_path::builder::PathBuilder;
//! use ribbon_path::math::point;
//!
//! let mut builder = PathBuilder::new();
//! builder.start_path(point(0.0, 0.0), &StrokeStyle::new(Color::RED, 4.0).with_sharp_joins(true))?;
//! builder.add_point(point(10.0, 0.0), &PointStyle::INHERIT)?;
//! builder.add_point(point(10.0, 10.0), &PointStyle::INHERIT.with_color(Color::BLUE))?;
//!
//! let sub_path = builder.end()?;
//! assert_eq!(sub_path.points.len(), 3);
//! assert!(!sub_path.closed);
//! # Ok::<(), ribbon_path::PathError>(())
//! ```

pub use ribbon_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod error;
mod point;

#[doc(inline)]
pub use crate::builder::{PathBuilder, SubPath};
#[doc(inline)]
pub use crate::error::PathError;
#[doc(inline)]
pub use crate::point::{JoinKind, PathPoint, PointAction, PointStyle, StrokeStyle};

pub mod math {
    //! f32 versions of the geometry types used everywhere. The other ribbon crates
    //! reexport them.

    pub use crate::geom::euclid;
    pub use crate::geom::{point, vector, Box2D, Point, Vector};

    /// Alias for ```euclid::default::Size2D<f32>```.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for ```euclid::default::Transform3D<f32>```, used for view-projection
    /// matrices.
    pub type Transform3D = euclid::default::Transform3D<f32>;

    /// Shorthand for `Size::new(w, h)`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }
}

/// A non-premultiplied RGBA color with `f32` components in the `[0, 1]` range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Color::rgba(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Color { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[test]
fn color_conversions() {
    assert_eq!(Color::from_rgba8(255, 0, 255, 255), Color::rgb(1.0, 0.0, 1.0));
    assert_eq!(Color::RED.to_array(), [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(Color::WHITE.with_alpha(0.5).a, 0.5);
    assert_eq!(Color::default(), Color::BLACK);
}
