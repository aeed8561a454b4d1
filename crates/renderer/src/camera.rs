use crate::math::{Point, Size, Transform3D};

/// Provides the transform and the zoom factor used to draw a mesh.
pub trait Camera {
    /// Transforms world coordinates into normalized device coordinates.
    fn view_projection(&self) -> Transform3D;

    /// Number of screen pixels per world unit.
    ///
    /// Edge blends are divided by this value so that the antialiasing falloff keeps the same
    /// width on screen.
    fn zoom(&self) -> f32;
}

/// A 2D orthographic camera looking at `center`, with the y axis pointing up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrthoCamera {
    pub center: Point,
    pub zoom: f32,
    /// Size of the render target in pixels.
    pub viewport: Size,
}

impl OrthoCamera {
    pub fn new(viewport: Size) -> Self {
        OrthoCamera {
            center: Point::origin(),
            zoom: 1.0,
            viewport,
        }
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }
}

impl Camera for OrthoCamera {
    fn view_projection(&self) -> Transform3D {
        let half_w = self.viewport.width * 0.5;
        let half_h = self.viewport.height * 0.5;

        Transform3D::translation(-self.center.x, -self.center.y, 0.0)
            .then_scale(self.zoom, self.zoom, 1.0)
            .then(&Transform3D::ortho(-half_w, half_w, -half_h, half_h, -1.0, 1.0))
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }
}

#[test]
fn ortho_camera_projection() {
    use crate::math::{point, size};

    let camera = OrthoCamera::new(size(800.0, 600.0))
        .with_center(point(100.0, 50.0))
        .with_zoom(2.0);
    let transform = camera.view_projection();

    let check = |p, expected: Point| {
        let ndc: Point = transform.transform_point2d(p).unwrap();
        assert!((ndc - expected).length() < 1e-5, "{:?} != {:?}", ndc, expected);
    };

    check(point(100.0, 50.0), point(0.0, 0.0));
    // Half of the viewport is 400 pixels, or 200 world units at zoom 2.
    check(point(300.0, 50.0), point(1.0, 0.0));
    check(point(100.0, -100.0), point(0.0, -1.0));
    assert_eq!(camera.zoom(), 2.0);
}
