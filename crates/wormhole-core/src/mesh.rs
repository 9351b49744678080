//! Vertex/index buffers shared by the tube and funnel meshers.

use glam::{Mat4, Vec2, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Triangulated surface made of rings of `ring_size` vertices each.
///
/// Built once, immutable afterwards; the render collaborator uploads it.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub ring_size: usize,
    /// Centre of every ring, in ring order.
    pub ring_centers: Vec<Vec3>,
}

impl Surface {
    pub fn ring_count(&self) -> usize {
        self.ring_centers.len()
    }

    pub fn ring(&self, i: usize) -> &[MeshVertex] {
        let start = i * self.ring_size;
        &self.vertices[start..start + self.ring_size]
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bake a transform into positions, normals and ring centres.
    pub fn transform(&mut self, m: Mat4) {
        for v in &mut self.vertices {
            v.position = m.transform_point3(Vec3::from(v.position)).to_array();
            v.normal = m
                .transform_vector3(Vec3::from(v.normal))
                .normalize_or_zero()
                .to_array();
        }
        for c in &mut self.ring_centers {
            *c = m.transform_point3(*c);
        }
    }
}

/// Connect consecutive rings with two triangles per quad. The radial seam
/// always wraps; `wrap_rings` also joins the last ring back to the first.
pub(crate) fn stitch_rings(ring_count: usize, ring_size: usize, wrap_rings: bool) -> Vec<u32> {
    let spans = if wrap_rings {
        ring_count
    } else {
        ring_count.saturating_sub(1)
    };
    let mut indices = Vec::with_capacity(spans * ring_size * 6);
    for i in 0..spans {
        let next_ring = (i + 1) % ring_count;
        for j in 0..ring_size {
            let next_j = (j + 1) % ring_size;
            let a = (i * ring_size + j) as u32;
            let b = (next_ring * ring_size + j) as u32;
            let c = (next_ring * ring_size + next_j) as u32;
            let d = (i * ring_size + next_j) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}
