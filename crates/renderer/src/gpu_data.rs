use crate::math::Transform3D;
use crate::tessellation::{Stroke, StrokeVertex};

use bytemuck::{Pod, Zeroable};

/// Data of one vertex in the vertex buffer.
///
/// `point0` and `point1` hold the two circles describing the primitive (see
/// [`StrokeVertex`](../ribbon_tessellation/struct.StrokeVertex.html)) as `(x, y, radius)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 2],
    pub point0: [f32; 3],
    pub point1: [f32; 3],
    pub color: [f32; 4],
    /// Primitive tag: 0 none, 1 dot, 2 line, 3 arc.
    pub prim: f32,
    pub edge_blend: f32,
}

impl GpuVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32x4,
        4 => Float32,
        5 => Float32,
    ];

    /// Distance in bytes between two consecutive vertices.
    pub const STRIDE: wgpu::BufferAddress = std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress;

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<StrokeVertex> for GpuVertex {
    fn from(v: StrokeVertex) -> Self {
        GpuVertex {
            position: v.position.to_array(),
            point0: v.first.to_array(),
            point1: v.second.to_array(),
            color: v.color.to_array(),
            prim: v.kind.gpu_code() as f32,
            edge_blend: v.edge_blend,
        }
    }
}

/// Globals stored in a uniform buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuGlobals {
    pub view_projection: [f32; 16],
    pub zoom: f32,
    pub _pad: [f32; 3],
}

impl GpuGlobals {
    pub fn new(view_projection: &Transform3D, zoom: f32) -> Self {
        GpuGlobals {
            view_projection: view_projection.to_array(),
            zoom,
            _pad: [0.0; 3],
        }
    }
}

/// The shader program used to draw a mesh.
///
/// Cheaper programs are picked when the mesh does not contain every kind of primitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Technique {
    /// Discs only.
    Dots,
    /// Discs and lines.
    Lines,
    /// Everything, including arcs.
    Strokes,
}

impl Technique {
    pub fn name(self) -> &'static str {
        match self {
            Technique::Dots => "dots",
            Technique::Lines => "lines",
            Technique::Strokes => "strokes",
        }
    }

    pub fn for_strokes(strokes: &[Stroke]) -> Self {
        let mut has_lines = false;
        for stroke in strokes {
            match stroke {
                Stroke::Arc { .. } => return Technique::Strokes,
                Stroke::Line { .. } => has_lines = true,
                _ => {}
            }
        }

        if has_lines {
            Technique::Lines
        } else {
            Technique::Dots
        }
    }
}

#[test]
fn vertex_layout() {
    assert_eq!(std::mem::size_of::<GpuVertex>(), 56);
    assert_eq!(GpuVertex::STRIDE, 56);
    assert_eq!(std::mem::size_of::<GpuGlobals>(), 80);

    let layout = GpuVertex::layout();
    assert_eq!(layout.array_stride, 56);
    assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

    let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
    assert_eq!(offsets, vec![0, 8, 20, 32, 48, 52]);

    let mut offset = 0;
    for (i, attrib) in layout.attributes.iter().enumerate() {
        assert_eq!(attrib.offset, offset);
        assert_eq!(attrib.shader_location, i as u32);
        offset += attrib.format.size();
    }
    assert_eq!(offset, GpuVertex::STRIDE);
    assert_eq!(layout.attributes[3].format, wgpu::VertexFormat::Float32x4);
}

#[test]
fn vertex_conversion() {
    use crate::math::point;
    use crate::path::Color;
    use crate::tessellation::{Circle, PrimitiveKind};

    let v = GpuVertex::from(StrokeVertex {
        position: point(1.0, 2.0),
        first: Circle::new(point(3.0, 4.0), 5.0),
        second: Circle::new(point(6.0, 7.0), 8.0),
        color: Color::rgba(0.1, 0.2, 0.3, 0.4),
        kind: PrimitiveKind::Arc,
        edge_blend: 0.5,
    });

    assert_eq!(v.position, [1.0, 2.0]);
    assert_eq!(v.point0, [3.0, 4.0, 5.0]);
    assert_eq!(v.point1, [6.0, 7.0, 8.0]);
    assert_eq!(v.color, [0.1, 0.2, 0.3, 0.4]);
    assert_eq!(v.prim, 3.0);
    assert_eq!(v.edge_blend, 0.5);

    let bytes: &[u8] = bytemuck::cast_slice(std::slice::from_ref(&v));
    assert_eq!(bytes.len(), 56);
}

#[test]
fn technique_selection() {
    use crate::math::point;
    use crate::path::{Color, PathPoint};

    let p = PathPoint::dot(point(0.0, 0.0), Color::BLACK, 1.0, 1.0);
    let q = PathPoint::dot(point(1.0, 0.0), Color::BLACK, 1.0, 1.0);

    assert_eq!(Technique::for_strokes(&[]), Technique::Dots);
    assert_eq!(Technique::for_strokes(&[Stroke::Dot { at: p }]), Technique::Dots);
    assert_eq!(
        Technique::for_strokes(&[Stroke::Dot { at: p }, Stroke::Line { from: p, to: q }]),
        Technique::Lines
    );
    assert_eq!(
        Technique::for_strokes(&[
            Stroke::Line { from: p, to: q },
            Stroke::Arc { at: q },
            Stroke::Line { from: q, to: p },
        ]),
        Technique::Strokes
    );
    assert_eq!(Technique::Strokes.name(), "strokes");
}
