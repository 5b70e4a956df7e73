use glam::{Vec2, Vec3};

use crate::wave::Wave;

/// A vertex in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub tangent: Vec3,
}

/// Index-triangulated geometry produced by the synthesizers
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Interleaved vertex data plus an explicit per-attribute component-count
/// layout, ready for upload to an indexed-triangle renderer.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub layout: Vec<u32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of floats per vertex.
    pub fn stride(&self) -> u32 {
        self.layout.iter().sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.stride() as usize
    }
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into the flat buffer the renderer uploads:
    /// 3 position, 3 normal, 2 uv, 3 tangent floats per vertex.
    pub fn to_buffers(&self) -> MeshBuffers {
        let layout = vec![3, 3, 2, 3];
        let mut vertices = Vec::with_capacity(11 * self.vertices.len());

        for v in &self.vertices {
            vertices.push(v.position.x);
            vertices.push(v.position.y);
            vertices.push(v.position.z);
            vertices.push(v.normal.x);
            vertices.push(v.normal.y);
            vertices.push(v.normal.z);
            vertices.push(v.uv.x);
            vertices.push(v.uv.y);
            vertices.push(v.tangent.x);
            vertices.push(v.tangent.y);
            vertices.push(v.tangent.z);
        }

        MeshBuffers {
            vertices,
            layout,
            indices: self.indices.clone(),
        }
    }

    /// Displace the surface by a Gerstner sum over the ensemble, sampled at
    /// `now`. Vertical displacement follows each train's animated amplitude;
    /// horizontal displacement is scaled by the ensemble-normalized chop.
    ///
    /// This is the CPU counterpart of the vertex-shader animation, used when
    /// exporting a snapshot of the surface at a fixed time.
    pub fn apply_waves(&mut self, waves: &[Wave], total_chop: f32, now: f64) {
        let count = waves.len() as f32;

        for vertex in &mut self.vertices {
            let base = vertex.position;
            let pos = Vec2::new(base.x, base.z);
            let mut displaced = base;

            for wave in waves {
                let amplitude = wave.amplitude(now);
                if amplitude == 0.0 {
                    // expired train, contributes nothing this frame
                    continue;
                }

                let phase = wave.freq() * wave.direction().dot(pos) + wave.phase(now);
                let chop = total_chop / (wave.freq() * amplitude * count);

                displaced.y += amplitude * phase.sin();
                displaced.x += chop * amplitude * wave.direction().x * phase.cos();
                displaced.z += chop * amplitude * wave.direction().y * phase.cos();
            }

            vertex.position = displaced;
        }
    }

    /// Recalculate vertex normals from face geometry, accumulating each face
    /// normal into its three corners and renormalizing.
    pub fn recalculate_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i1, i2, i3) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

            let v1 = self.vertices[i1].position;
            let v2 = self.vertices[i2].position;
            let v3 = self.vertices[i3].position;

            let normal = (v2 - v1).cross(v3 - v1).normalize();

            accumulated[i1] += normal;
            accumulated[i2] += normal;
            accumulated[i3] += normal;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            vertex.normal = normal.normalize();
        }
    }
}
