//! The interface between the stroke renderer and a graphics API.

use crate::gpu_data::{GpuGlobals, GpuVertex, Technique};
use crate::RenderError;

/// Everything a backend needs to issue one indexed draw.
#[derive(Copy, Clone, Debug)]
pub struct DrawCall<'l> {
    pub technique: Technique,
    pub globals: GpuGlobals,
    pub vertices: &'l [GpuVertex],
    pub indices: &'l [u32],
    /// When false the geometry is the same as in the previous draw with `upload` set and the
    /// backend may reuse the buffers it already holds.
    pub upload: bool,
}

pub trait RenderBackend {
    /// Creates the pipelines and other device resources.
    fn load(&mut self) -> Result<(), RenderError>;

    /// Releases the device resources.
    fn unload(&mut self);

    fn is_loaded(&self) -> bool;

    /// Recreates the device resources after the device was lost.
    ///
    /// Buffers held by the backend are invalid afterwards.
    fn device_reset(&mut self) -> Result<(), RenderError>;

    fn draw_indexed(&mut self, call: &DrawCall) -> Result<(), RenderError>;
}

/// What a `HeadlessBackend` saw in one draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawRecord {
    pub technique: Technique,
    pub vertex_count: usize,
    pub index_count: usize,
    pub uploaded: bool,
    pub zoom: f32,
}

/// A backend that does not talk to a GPU.
///
/// It keeps a copy of the uploaded geometry and a log of the draw calls, which makes it
/// useful for tests and for the command line tool.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBackend {
    loaded: bool,
    device_lost: bool,
    vertices: Vec<GpuVertex>,
    indices: Vec<u32>,
    draws: Vec<DrawRecord>,
    num_uploads: u32,
    num_device_resets: u32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next operations fail with `RenderError::DeviceLost` until `device_reset`
    /// is called.
    pub fn lose_device(&mut self) {
        log::info!("headless backend: device lost");
        self.device_lost = true;
    }

    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn num_uploads(&self) -> u32 {
        self.num_uploads
    }

    pub fn num_device_resets(&self) -> u32 {
        self.num_device_resets
    }

    /// The geometry of the last upload.
    pub fn vertices(&self) -> &[GpuVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

impl RenderBackend for HeadlessBackend {
    fn load(&mut self) -> Result<(), RenderError> {
        if self.device_lost {
            return Err(RenderError::DeviceLost);
        }

        if !self.loaded {
            log::info!("headless backend: loaded");
            self.loaded = true;
        }

        Ok(())
    }

    fn unload(&mut self) {
        if self.loaded {
            log::info!("headless backend: unloaded");
        }
        self.loaded = false;
        self.vertices.clear();
        self.indices.clear();
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn device_reset(&mut self) -> Result<(), RenderError> {
        log::info!("headless backend: device reset");
        self.device_lost = false;
        self.vertices.clear();
        self.indices.clear();
        self.num_device_resets += 1;
        self.loaded = true;

        Ok(())
    }

    fn draw_indexed(&mut self, call: &DrawCall) -> Result<(), RenderError> {
        if self.device_lost {
            return Err(RenderError::DeviceLost);
        }
        if !self.loaded {
            return Err(RenderError::NotLoaded);
        }

        if call.upload {
            self.vertices.clear();
            self.vertices.extend_from_slice(call.vertices);
            self.indices.clear();
            self.indices.extend_from_slice(call.indices);
            self.num_uploads += 1;
        } else if self.indices.is_empty() && !call.indices.is_empty() {
            return Err(RenderError::Backend(
                "draw without upload but no geometry was uploaded".to_string(),
            ));
        }

        log::trace!(
            "headless backend: draw {} with {} indices (upload: {})",
            call.technique.name(),
            call.indices.len(),
            call.upload,
        );

        self.draws.push(DrawRecord {
            technique: call.technique,
            vertex_count: call.vertices.len(),
            index_count: call.indices.len(),
            uploaded: call.upload,
            zoom: call.globals.zoom,
        });

        Ok(())
    }
}

#[cfg(test)]
fn empty_call(upload: bool) -> DrawCall<'static> {
    use crate::math::Transform3D;

    DrawCall {
        technique: Technique::Dots,
        globals: GpuGlobals::new(&Transform3D::identity(), 1.0),
        vertices: &[],
        indices: &[0, 1, 2],
        upload,
    }
}

#[test]
fn headless_lifecycle() {
    let mut backend = HeadlessBackend::new();
    assert!(!backend.is_loaded());
    assert_eq!(backend.draw_indexed(&empty_call(true)), Err(RenderError::NotLoaded));

    backend.load().unwrap();
    assert!(backend.is_loaded());

    // Nothing to reuse yet.
    assert!(backend.draw_indexed(&empty_call(false)).is_err());

    backend.draw_indexed(&empty_call(true)).unwrap();
    backend.draw_indexed(&empty_call(false)).unwrap();
    assert_eq!(backend.num_uploads(), 1);
    assert_eq!(backend.draws().len(), 2);

    backend.lose_device();
    assert_eq!(backend.draw_indexed(&empty_call(false)), Err(RenderError::DeviceLost));

    backend.device_reset().unwrap();
    assert_eq!(backend.num_device_resets(), 1);
    assert!(backend.indices().is_empty());
    assert!(backend.draw_indexed(&empty_call(false)).is_err());

    backend.unload();
    assert!(!backend.is_loaded());
}
