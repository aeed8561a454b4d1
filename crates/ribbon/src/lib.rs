#![deny(bare_trait_objects)]

//! Antialiased 2D strokes rendered on the GPU using tessellation.
//!
//! # Crates
//!
//! This meta-crate (`ribbon`) reexports the following sub-crates for convenience:
//!
//! * **ribbon_tessellation** - Turns paths, loops and dots into triangles.
//! * **ribbon_path** - Path building, stroke styles and colors.
//! * **ribbon_geom** - Lines, line segments and a few vector helpers.
//! * **ribbon_renderer** - Cameras, GPU vertex layouts and render backends.
//!
//! Each `ribbon_<name>` crate is reexported as a `<name>` module in `ribbon`. For example:
//!
//! ```ignore
//! use ribbon_tessellation::StrokeBatch;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use ribbon::tessellation::StrokeBatch;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Tessellating a rounded square
//!
//! ```
//! use ribbon::math::point;
//! use ribbon::path::{Color, PointStyle, StrokeStyle};
//! use ribbon::tessellation::{BuffersBuilder, StrokeBatch, StrokeVertex, VertexBuffers};
//!
//! let mut batch = StrokeBatch::new();
//! let style = StrokeStyle::new(Color::BLACK, 2.0).with_arc_radius(3.0);
//!
//! batch.start_loop(point(0.0, 0.0), &style)?;
//! batch.add_point(point(10.0, 0.0), &PointStyle::INHERIT)?;
//! batch.add_point(point(10.0, 10.0), &PointStyle::INHERIT)?;
//! batch.add_point(point(0.0, 10.0), &PointStyle::INHERIT)?;
//! batch.end()?;
//!
//! let mut geometry: VertexBuffers<StrokeVertex, u16> = VertexBuffers::new();
//! batch.tessellate(1.0, &mut BuffersBuilder::new(&mut geometry, |v: StrokeVertex| v))?;
//!
//! // Four lines and four arcs.
//! assert_eq!(geometry.vertices.len(), 36);
//! assert_eq!(geometry.indices.len(), 60);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Rendering the tessellated geometry
//!
//! The `renderer` module converts the vertices into a GPU-friendly layout and hands them to a
//! [`RenderBackend`](renderer/backend/trait.RenderBackend.html). Each vertex carries the
//! circles describing its primitive, and the fragment program derives the coverage from the
//! distance to them.
//!
//! ```
//! use ribbon::math::{point, size};
//! use ribbon::path::Color;
//! use ribbon::renderer::{HeadlessBackend, OrthoCamera, StrokeRenderer};
//! use ribbon::tessellation::StrokeBatch;
//!
//! let mut batch = StrokeBatch::new();
//! batch.add_dot(point(5.0, 5.0), Color::BLUE, 3.0)?;
//!
//! let camera = OrthoCamera::new(size(640.0, 480.0)).with_zoom(2.0);
//! let mut renderer = StrokeRenderer::new(HeadlessBackend::new());
//! renderer.load()?;
//! renderer.render(&mut batch, &camera)?;
//!
//! assert_eq!(renderer.backend().draws()[0].index_count, 6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub extern crate ribbon_renderer;
pub extern crate ribbon_tessellation;

pub use ribbon_renderer as renderer;
pub use ribbon_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
