use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use std::path::Path;

use crate::mesh::{Geometry, Vertex};

/// A decoded image: row-major bytes, `channels` per pixel.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Decode an image file to RGB8.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("could not decode image {}", path.display()))?
            .into_rgb8();

        let (width, height) = image.dimensions();
        Ok(Self {
            width: width as usize,
            height: height as usize,
            channels: 3,
            pixels: image.into_raw(),
        })
    }
}

/// Build the beach terrain from a height map and a tangent-space normal map.
///
/// One vertex per pixel, two triangles per grid cell. Heights come from the
/// height map's first channel remapped to `[-3, 3]`; normals come from the
/// normal map remapped to `[-1, 1]` per channel and swapped into the y-up
/// world basis. Tangents are accumulated in a second pass over the
/// triangles.
pub fn terrain(ht: &ImageData, norms: &ImageData, xsize: f32, zsize: f32) -> Geometry {
    if ht.width != norms.width || ht.height != norms.height {
        log::error!(
            "height map is {}x{} but normal map is {}x{}",
            ht.width,
            ht.height,
            norms.width,
            norms.height
        );
        return Geometry::default();
    }

    let (width, height) = (ht.width, ht.height);
    let xstep = xsize / width as f32;
    let zstep = zsize / height as f32;

    let mut vertices = Vec::with_capacity(width * height);
    let mut indices = Vec::with_capacity(6 * (width - 1) * (height - 1));

    for i in 0..height {
        for j in 0..width {
            let raw = ht.pixels[ht.channels * (i * width + j)];
            let elevation = 6.0 * (raw as f32 / 255.0 - 0.5);

            let base = norms.channels * (i * width + j);
            let nx = 2.0 * (norms.pixels[base] as f32 / 255.0) - 1.0;
            let ny = 2.0 * (norms.pixels[base + 1] as f32 / 255.0) - 1.0;
            let nz = 2.0 * (norms.pixels[base + 2] as f32 / 255.0) - 1.0;

            vertices.push(Vertex {
                position: Vec3::new(
                    xsize * j as f32 / (width - 1) as f32 + 25.0,
                    elevation,
                    -zsize * i as f32 / (height - 1) as f32,
                ),
                // swap the map's tangent-space axes into the y-up world basis
                normal: Vec3::new(ny / xstep, nz, -nx / zstep).normalize(),
                uv: Vec2::new(
                    15.0 * j as f32 / (width - 1) as f32,
                    15.0 * i as f32 / (height - 1) as f32,
                ),
                tangent: Vec3::ZERO,
            });

            if i < height - 1 && j < width - 1 {
                indices.push((i * width + j) as u32);
                indices.push(((i + 1) * width + j) as u32);
                indices.push(((i + 1) * width + j + 1) as u32);

                indices.push((i * width + j) as u32);
                indices.push(((i + 1) * width + j + 1) as u32);
                indices.push((i * width + j + 1) as u32);
            }
        }
    }

    let mut geometry = Geometry { vertices, indices };
    accumulate_tangents(&mut geometry);
    geometry
}

/// Load both maps from disk and synthesize the terrain. A decode failure is
/// reported once and yields an empty mesh; there are no retries.
pub fn terrain_from_files<P: AsRef<Path>>(
    ht_path: P,
    norm_path: P,
    xsize: f32,
    zsize: f32,
) -> Geometry {
    let ht = match ImageData::open(&ht_path) {
        Ok(image) => image,
        Err(err) => {
            log::error!("could not load height map: {err:#}");
            return Geometry::default();
        }
    };
    let norms = match ImageData::open(&norm_path) {
        Ok(image) => image,
        Err(err) => {
            log::error!("could not load normal map: {err:#}");
            return Geometry::default();
        }
    };

    terrain(&ht, &norms, xsize, zsize)
}

/// Derive per-vertex tangents from the UV gradient of each triangle.
///
/// The triangle tangent lands on the triangle's first corner only and is
/// left unnormalized; the terrain shader renormalizes after interpolation.
/// Degenerate UV triangles (zero-area in texture space) make the gradient
/// inversion singular and are not guarded.
pub fn accumulate_tangents(geometry: &mut Geometry) {
    for n in 0..geometry.indices.len() / 3 {
        let i0 = geometry.indices[3 * n] as usize;
        let i1 = geometry.indices[3 * n + 1] as usize;
        let i2 = geometry.indices[3 * n + 2] as usize;

        let e1 = geometry.vertices[i1].position - geometry.vertices[i0].position;
        let e2 = geometry.vertices[i2].position - geometry.vertices[i0].position;
        let d1 = geometry.vertices[i1].uv - geometry.vertices[i0].uv;
        let d2 = geometry.vertices[i2].uv - geometry.vertices[i0].uv;

        let f = 1.0 / (d1.x * d2.y - d2.x * d1.y);
        let tangent = f * (d2.y * e1 - d1.y * e2);

        geometry.vertices[i0].tangent += tangent;
    }
}

/// Flat fallback seabed: a grid sloped linearly from `max_depth` at x = 0 up
/// to 0 at x = 50, with a constant up normal and no tangents.
pub fn plane(xsize: f32, zsize: f32, step: f32) -> Geometry {
    plane_with_depth(xsize, zsize, step, 30.0)
}

pub fn plane_with_depth(xsize: f32, zsize: f32, step: f32, max_depth: f32) -> Geometry {
    let steps_x = (xsize / step).floor() as usize;
    let steps_z = (zsize / step).floor() as usize;

    let mut vertices = Vec::with_capacity(steps_x * steps_z);
    let mut indices =
        Vec::with_capacity(6 * steps_x.saturating_sub(1) * steps_z.saturating_sub(1));

    for i in 0..steps_x {
        for j in 0..steps_z {
            let x = i as f32 * step;

            vertices.push(Vertex {
                position: Vec3::new(x, max_depth * (50.0 - x) / 50.0, -(j as f32 * step)),
                normal: Vec3::Y,
                uv: Vec2::new(
                    j as f32 / (steps_z - 1) as f32,
                    i as f32 / (steps_x - 1) as f32,
                ),
                tangent: Vec3::ZERO,
            });

            if i < steps_x - 1 && j < steps_z - 1 {
                indices.push((i * steps_z + j) as u32);
                indices.push(((i + 1) * steps_z + j) as u32);
                indices.push(((i + 1) * steps_z + j + 1) as u32);

                indices.push((i * steps_z + j) as u32);
                indices.push(((i + 1) * steps_z + j + 1) as u32);
                indices.push((i * steps_z + j + 1) as u32);
            }
        }
    }

    Geometry { vertices, indices }
}

/// Single tilted quad, the cheapest stand-in for the beach.
pub fn quad(xsize: f32, zsize: f32, ysize: f32) -> Geometry {
    let normal = Vec3::new(ysize / 40.0, 0.0, 1.0).normalize();

    let corners = [
        (Vec3::new(xsize - 25.0, -ysize / 2.0, 0.0), Vec2::new(0.0, 0.0)),
        (Vec3::new(xsize + 25.0, ysize / 2.0, 0.0), Vec2::new(15.0, 0.0)),
        (Vec3::new(xsize - 25.0, -ysize / 2.0, -zsize), Vec2::new(0.0, 15.0)),
        (Vec3::new(xsize + 25.0, ysize / 2.0, -zsize), Vec2::new(15.0, 15.0)),
    ];

    let vertices = corners
        .into_iter()
        .map(|(position, uv)| Vertex {
            position,
            normal,
            uv,
            tangent: Vec3::ZERO,
        })
        .collect();

    Geometry {
        vertices,
        indices: vec![0, 1, 3, 0, 3, 2],
    }
}
