use anyhow::{anyhow, Result};
use mesh_tools::compat::{point3_new, vector2_new, vector3_new};
use std::path::Path;

use crate::mesh::Geometry;

/// Material appearance assigned to an exported mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMaterial {
    /// Translucent blue, metallic and smooth.
    Water,
    /// Opaque tan, rough and non-metallic.
    Sand,
}

/// Export a set of named meshes into a single GLB scene, one node per mesh.
pub fn export_scene_glb<P: AsRef<Path>>(
    path: P,
    meshes: &[(&str, &Geometry, SceneMaterial)],
) -> Result<()> {
    let mut builder = mesh_tools::GltfBuilder::new();
    let mut nodes = Vec::with_capacity(meshes.len());

    for (name, geometry, material) in meshes {
        let material_index = match material {
            SceneMaterial::Water => {
                let index = builder.create_metallic_material(
                    Some("WaterMaterial".to_string()),
                    [0.0, 0.4, 0.8, 0.8],
                    0.9,
                    0.1,
                );
                // water is visible from below and blends over the seabed
                if let Some(materials) = &mut builder.gltf.materials {
                    if let Some(material) = materials.get_mut(index) {
                        material.double_sided = Some(true);
                        material.alpha_mode = Some("BLEND".to_string());
                    }
                }
                index
            }
            SceneMaterial::Sand => builder.create_metallic_material(
                Some("SandMaterial".to_string()),
                [0.76, 0.70, 0.50, 1.0],
                0.0,
                0.9,
            ),
        };

        let mut positions = Vec::with_capacity(geometry.vertices.len());
        let mut normals = Vec::with_capacity(geometry.vertices.len());
        let mut texcoords = Vec::with_capacity(geometry.vertices.len());

        for vertex in &geometry.vertices {
            positions.push(point3_new(
                vertex.position.x,
                vertex.position.y,
                vertex.position.z,
            ));
            normals.push(vector3_new(
                vertex.normal.x,
                vertex.normal.y,
                vertex.normal.z,
            ));
            texcoords.push(vector2_new(vertex.uv.x, vertex.uv.y));
        }

        let mut triangles = Vec::with_capacity(geometry.triangle_count());
        for tri in geometry.indices.chunks_exact(3) {
            triangles.push(mesh_tools::Triangle::new(tri[0], tri[1], tri[2]));
        }

        let mesh_index = builder.create_simple_mesh(
            Some(name.to_string()),
            &positions,
            &triangles,
            Some(normals),
            Some(texcoords),
            Some(material_index),
        );

        nodes.push(builder.add_node(
            Some(format!("{name}Node")),
            Some(mesh_index),
            None,
            None,
            None,
        ));
    }

    let scene_index = builder.add_scene(Some("OceanScene".to_string()), Some(nodes));
    builder.gltf.scene = Some(scene_index);

    let path = path.as_ref();
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("output path {} is not valid UTF-8", path.display()))?;

    builder
        .export_glb(path_str)
        .map_err(|err| anyhow!("failed to export GLB to {}: {err}", path.display()))?;

    Ok(())
}
