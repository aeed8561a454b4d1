use crate::backend::{DrawCall, RenderBackend};
use crate::camera::Camera;
use crate::geom::LineSegment;
use crate::gpu_data::{GpuGlobals, GpuVertex, Technique};
use crate::math::Point;
use crate::path::Color;
use crate::tessellation::{
    tessellate_dot, tessellate_line, BatchId, BuffersBuilder, StrokeBatch, StrokeVertex,
    VertexBuffers,
};
use crate::RenderError;

/// Which batch geometry the renderer holds, and from which rebuild of that batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CachedGeometry {
    batch: BatchId,
    rebuild: u32,
}

/// Draws stroke batches and single lines or dots through a `RenderBackend`.
///
/// The renderer keeps the geometry of the last batch it rendered. It is only assembled and
/// uploaded again when another batch is rendered, when the batch changed or was tessellated at
/// another zoom factor, or after a device reset.
pub struct StrokeRenderer<B> {
    backend: B,
    buffers: VertexBuffers<GpuVertex, u32>,
    scratch: VertexBuffers<GpuVertex, u32>,
    technique: Technique,
    cached: Option<CachedGeometry>,
    needs_upload: bool,
}

impl<B: RenderBackend> StrokeRenderer<B> {
    pub fn new(backend: B) -> Self {
        StrokeRenderer {
            backend,
            buffers: VertexBuffers::new(),
            scratch: VertexBuffers::new(),
            technique: Technique::Dots,
            cached: None,
            needs_upload: true,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The technique picked for the last rendered batch.
    pub fn technique(&self) -> Technique {
        self.technique
    }

    /// The geometry of the last rendered batch.
    pub fn geometry(&self) -> &VertexBuffers<GpuVertex, u32> {
        &self.buffers
    }

    pub fn load(&mut self) -> Result<(), RenderError> {
        self.backend.load()?;
        self.needs_upload = true;

        Ok(())
    }

    pub fn unload(&mut self) {
        self.backend.unload();
        self.needs_upload = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.is_loaded()
    }

    /// Recreates the device resources. The next `render` uploads the geometry again.
    pub fn device_reset(&mut self) -> Result<(), RenderError> {
        self.backend.device_reset()?;
        self.needs_upload = true;

        Ok(())
    }

    /// Tessellates the batch if needed and draws it.
    pub fn render(&mut self, batch: &mut StrokeBatch, camera: &dyn Camera) -> Result<(), RenderError> {
        if !self.backend.is_loaded() {
            return Err(RenderError::NotLoaded);
        }

        let zoom = camera.zoom();
        let cache_is_valid = !batch.needs_rebuild(zoom)
            && self.cached
                == Some(CachedGeometry {
                    batch: batch.id(),
                    rebuild: batch.rebuild_count(),
                });

        if !cache_is_valid {
            self.cached = None;
            self.buffers.clear();
            self.buffers
                .reserve_exact(batch.vertex_count(), batch.index_count());

            batch.tessellate(
                zoom,
                &mut BuffersBuilder::new(&mut self.buffers, |v: StrokeVertex| GpuVertex::from(v)),
            )?;

            self.cached = Some(CachedGeometry {
                batch: batch.id(),
                rebuild: batch.rebuild_count(),
            });
            self.technique = Technique::for_strokes(batch.strokes());
            self.needs_upload = true;

            log::debug!(
                "Assembled {} vertices and {} indices with the {} technique",
                self.buffers.vertices.len(),
                self.buffers.indices.len(),
                self.technique.name(),
            );
        }

        if self.buffers.indices.is_empty() {
            return Ok(());
        }

        let call = DrawCall {
            technique: self.technique,
            globals: GpuGlobals::new(&camera.view_projection(), zoom),
            vertices: &self.buffers.vertices,
            indices: &self.buffers.indices,
            upload: self.needs_upload,
        };
        self.backend.draw_indexed(&call)?;
        self.needs_upload = false;

        Ok(())
    }

    /// Draws a single line segment with round ends.
    pub fn draw_line(
        &mut self,
        camera: &dyn Camera,
        segment: &LineSegment,
        colors: [Color; 2],
        widths: [f32; 2],
        edge_blend: f32,
    ) -> Result<(), RenderError> {
        if !self.backend.is_loaded() {
            return Err(RenderError::NotLoaded);
        }

        self.scratch.clear();
        tessellate_line(
            segment,
            colors,
            widths,
            edge_blend,
            camera.zoom(),
            &mut BuffersBuilder::new(&mut self.scratch, |v: StrokeVertex| GpuVertex::from(v)),
        )?;

        self.draw_scratch(camera, Technique::Lines)
    }

    /// Draws a single dot.
    pub fn draw_dot(
        &mut self,
        camera: &dyn Camera,
        center: Point,
        color: Color,
        diameter: f32,
        edge_blend: f32,
    ) -> Result<(), RenderError> {
        if !self.backend.is_loaded() {
            return Err(RenderError::NotLoaded);
        }

        self.scratch.clear();
        tessellate_dot(
            center,
            color,
            diameter,
            edge_blend,
            camera.zoom(),
            &mut BuffersBuilder::new(&mut self.scratch, |v: StrokeVertex| GpuVertex::from(v)),
        )?;

        self.draw_scratch(camera, Technique::Dots)
    }

    fn draw_scratch(&mut self, camera: &dyn Camera, technique: Technique) -> Result<(), RenderError> {
        let call = DrawCall {
            technique,
            globals: GpuGlobals::new(&camera.view_projection(), camera.zoom()),
            vertices: &self.scratch.vertices,
            indices: &self.scratch.indices,
            upload: true,
        };
        self.backend.draw_indexed(&call)?;
        // The scratch geometry replaced the batch's in the backend.
        self.needs_upload = true;

        Ok(())
    }
}

#[cfg(test)]
use crate::backend::{DrawRecord, HeadlessBackend};
#[cfg(test)]
use crate::camera::OrthoCamera;
#[cfg(test)]
use crate::math::{point, size};
#[cfg(test)]
use crate::path::{PointStyle, StrokeStyle};

#[cfg(test)]
fn rounded_square() -> StrokeBatch {
    let style = StrokeStyle::new(Color::BLACK, 2.0)
        .with_arc_radius(3.0)
        .with_edge_blend(0.0);

    let mut batch = StrokeBatch::new();
    batch.start_loop(point(0.0, 0.0), &style).unwrap();
    batch.add_point(point(10.0, 0.0), &PointStyle::INHERIT).unwrap();
    batch.add_point(point(10.0, 10.0), &PointStyle::INHERIT).unwrap();
    batch.add_point(point(0.0, 10.0), &PointStyle::INHERIT).unwrap();
    batch.end().unwrap();

    batch
}

#[cfg(test)]
fn loaded_renderer() -> StrokeRenderer<HeadlessBackend> {
    let mut renderer = StrokeRenderer::new(HeadlessBackend::new());
    renderer.load().unwrap();

    renderer
}

#[test]
fn render_uploads_once() {
    let mut renderer = loaded_renderer();
    let mut batch = rounded_square();
    let camera = OrthoCamera::new(size(100.0, 100.0));

    renderer.render(&mut batch, &camera).unwrap();
    renderer.render(&mut batch, &camera).unwrap();

    assert_eq!(batch.rebuild_count(), 1);
    assert_eq!(renderer.technique(), Technique::Strokes);

    let draws = renderer.backend().draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(
        draws[0],
        DrawRecord {
            technique: Technique::Strokes,
            vertex_count: 36,
            index_count: 60,
            uploaded: true,
            zoom: 1.0,
        }
    );
    assert!(!draws[1].uploaded);
    assert_eq!(renderer.backend().num_uploads(), 1);
    assert_eq!(renderer.backend().vertices().len(), 36);
}

#[test]
fn zoom_change_rebuilds() {
    let mut renderer = loaded_renderer();
    let mut batch = rounded_square();

    renderer
        .render(&mut batch, &OrthoCamera::new(size(100.0, 100.0)))
        .unwrap();
    renderer
        .render(&mut batch, &OrthoCamera::new(size(100.0, 100.0)).with_zoom(2.0))
        .unwrap();

    assert_eq!(batch.rebuild_count(), 2);
    assert_eq!(renderer.backend().num_uploads(), 2);
    assert_eq!(renderer.backend().draws()[1].zoom, 2.0);
}

#[test]
fn switching_batches_reassembles() {
    let mut renderer = loaded_renderer();
    let camera = OrthoCamera::new(size(100.0, 100.0));
    let mut square = rounded_square();
    let mut dot = StrokeBatch::new();
    dot.add_dot(point(1.0, 1.0), Color::RED, 2.0).unwrap();

    renderer.render(&mut square, &camera).unwrap();
    renderer.render(&mut dot, &camera).unwrap();
    renderer.render(&mut square, &camera).unwrap();

    let draws = renderer.backend().draws();
    assert_eq!(draws.len(), 3);
    assert_eq!(draws[1].technique, Technique::Dots);
    assert_eq!(draws[1].vertex_count, 4);
    assert_eq!(
        draws[2],
        DrawRecord {
            technique: Technique::Strokes,
            vertex_count: 36,
            index_count: 60,
            uploaded: true,
            zoom: 1.0,
        }
    );

    // Neither batch was resolved again, only their geometry was assembled again.
    assert_eq!(square.rebuild_count(), 1);
    assert_eq!(dot.rebuild_count(), 1);
    assert_eq!(renderer.technique(), Technique::Strokes);
    assert_eq!(renderer.backend().vertices().len(), 36);
}

#[test]
fn cloned_batch_is_not_mistaken_for_its_source() {
    use crate::tessellation::NoOutput;

    let mut renderer = loaded_renderer();
    let camera = OrthoCamera::new(size(100.0, 100.0));
    let mut square = rounded_square();

    let mut copy = square.clone();
    copy.add_dot(point(50.0, 50.0), Color::RED, 2.0).unwrap();
    copy.tessellate(1.0, &mut NoOutput::new()).unwrap();

    renderer.render(&mut square, &camera).unwrap();

    // Same zoom and rebuild count, different geometry.
    assert!(!copy.needs_rebuild(1.0));
    assert_eq!(copy.rebuild_count(), square.rebuild_count());

    renderer.render(&mut copy, &camera).unwrap();

    let draws = renderer.backend().draws();
    assert_eq!(draws.len(), 2);
    assert!(draws[1].uploaded);
    assert_eq!(draws[1].vertex_count, 40);
    assert_eq!(renderer.backend().vertices().len(), 40);
}

#[test]
fn device_reset_uploads_again() {
    let mut renderer = loaded_renderer();
    let mut batch = rounded_square();
    let camera = OrthoCamera::new(size(100.0, 100.0));

    renderer.render(&mut batch, &camera).unwrap();

    renderer.backend_mut().lose_device();
    assert_eq!(renderer.render(&mut batch, &camera), Err(RenderError::DeviceLost));

    renderer.device_reset().unwrap();
    renderer.render(&mut batch, &camera).unwrap();

    // The geometry is reused, only the upload is repeated.
    assert_eq!(batch.rebuild_count(), 1);
    assert_eq!(renderer.backend().num_uploads(), 2);
    assert_eq!(renderer.backend().vertices().len(), 36);
}

#[test]
fn render_requires_load() {
    let mut renderer = StrokeRenderer::new(HeadlessBackend::new());
    let mut batch = rounded_square();
    let camera = OrthoCamera::new(size(100.0, 100.0));

    assert_eq!(renderer.render(&mut batch, &camera), Err(RenderError::NotLoaded));
    assert_eq!(batch.rebuild_count(), 0);

    renderer.load().unwrap();
    renderer.render(&mut batch, &camera).unwrap();
    renderer.unload();
    assert_eq!(renderer.render(&mut batch, &camera), Err(RenderError::NotLoaded));
}

#[test]
fn empty_batch_draws_nothing() {
    let mut renderer = loaded_renderer();
    let mut batch = StrokeBatch::new();

    renderer
        .render(&mut batch, &OrthoCamera::new(size(10.0, 10.0)))
        .unwrap();

    assert!(renderer.backend().draws().is_empty());
}

#[test]
fn single_line_and_dot() {
    let mut renderer = loaded_renderer();
    let camera = OrthoCamera::new(size(100.0, 100.0));
    let mut batch = rounded_square();

    renderer.render(&mut batch, &camera).unwrap();
    renderer
        .draw_line(
            &camera,
            &LineSegment {
                from: point(0.0, 0.0),
                to: point(5.0, 0.0),
            },
            [Color::RED, Color::BLUE],
            [1.0, 1.0],
            1.0,
        )
        .unwrap();
    renderer
        .draw_dot(&camera, point(1.0, 1.0), Color::GREEN, 4.0, 1.0)
        .unwrap();

    let draws = renderer.backend().draws();
    assert_eq!(draws.len(), 3);
    assert_eq!(draws[1].technique, Technique::Lines);
    assert_eq!(draws[1].vertex_count, 4);
    assert_eq!(draws[1].index_count, 6);
    assert_eq!(draws[2].technique, Technique::Dots);
    assert!(draws[2].uploaded);

    let v = &renderer.backend().vertices()[0];
    assert_eq!(v.prim, 1.0);
    assert_eq!(v.point0, [1.0, 1.0, 2.0]);

    // The batch has to be uploaded again after the single shapes replaced it.
    renderer.render(&mut batch, &camera).unwrap();
    assert!(renderer.backend().draws()[3].uploaded);
    assert_eq!(batch.rebuild_count(), 1);
}

#[test]
fn invalid_line_is_an_error() {
    use crate::tessellation::{TessellationError, UnsupportedParameter};

    let mut renderer = loaded_renderer();
    let camera = OrthoCamera::new(size(100.0, 100.0));

    let result = renderer.draw_line(
        &camera,
        &LineSegment {
            from: point(0.0, 0.0),
            to: point(5.0, 0.0),
        },
        [Color::RED, Color::BLUE],
        [0.0, 1.0],
        1.0,
    );

    assert_eq!(
        result,
        Err(RenderError::Tessellation(TessellationError::UnsupportedParameter(
            UnsupportedParameter::WidthIsNotPositive
        )))
    );
    assert!(renderer.backend().draws().is_empty());
}
