#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Draws tessellated strokes.
//!
//! This crate is reexported in [ribbon](../ribbon/index.html).
//!
//! The [`StrokeRenderer`](struct.StrokeRenderer.html) turns a
//! [`StrokeBatch`](../ribbon_tessellation/struct.StrokeBatch.html) into GPU-ready vertex and
//! index buffers and hands them to a [`RenderBackend`](backend/trait.RenderBackend.html),
//! together with the view-projection transform and the zoom factor of a
//! [`Camera`](trait.Camera.html).
//!
//! The geometry is only tessellated and uploaded again when another batch is rendered, when the
//! batch changed or the zoom factor changed, or after the device was reset.
//!
//! ```
//! use ribbon_renderer::{HeadlessBackend, OrthoCamera, StrokeRenderer};
//! use ribbon_renderer::math::{point, size};
//! use ribbon_renderer::path::{Color, PointStyle, StrokeStyle};
//! use ribbon_renderer::tessellation::StrokeBatch;
//!
//! let mut batch = StrokeBatch::new();
//! let style = StrokeStyle::new(Color::BLACK, 2.0);
//! batch.start_path(point(0.0, 0.0), &style)?;
//! batch.add_point(point(10.0, 0.0), &PointStyle::INHERIT)?;
//! batch.end()?;
//!
//! let mut renderer = StrokeRenderer::new(HeadlessBackend::new());
//! renderer.load()?;
//! renderer.render(&mut batch, &OrthoCamera::new(size(800.0, 600.0)))?;
//!
//! assert_eq!(renderer.backend().draws().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use ribbon_tessellation as tessellation;
pub use wgpu;

pub use crate::tessellation::geom;
pub use crate::tessellation::math;
pub use crate::tessellation::path;

pub mod backend;
mod camera;
mod gpu_data;
mod renderer;

#[doc(inline)]
pub use crate::backend::{DrawCall, DrawRecord, HeadlessBackend, RenderBackend};
#[doc(inline)]
pub use crate::camera::{Camera, OrthoCamera};
#[doc(inline)]
pub use crate::gpu_data::{GpuGlobals, GpuVertex, Technique};
#[doc(inline)]
pub use crate::renderer::StrokeRenderer;

use crate::tessellation::TessellationError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("The renderer is not loaded")]
    NotLoaded,
    #[error("The device was lost")]
    DeviceLost,
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Tessellation error: {0}")]
    Tessellation(#[from] TessellationError),
}
