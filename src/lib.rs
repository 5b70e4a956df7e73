// Export main modules
pub mod camera;
pub mod clock;
pub mod ensemble;
pub mod export;
pub mod mesh;
pub mod terrain;
pub mod uniform;
pub mod wave;

// Re-export the core types for public use
pub use camera::Camera;
pub use clock::{Clock, SystemClock};
pub use mesh::{Geometry, MeshBuffers, Vertex};
pub use uniform::{Uniform, UniformBank, UniformSink};
pub use wave::Wave;

pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::ensemble::{init_waves, update_waves};
    pub use crate::export::{export_scene_glb, SceneMaterial};
    pub use crate::mesh::{Geometry, MeshBuffers, Vertex};
    pub use crate::terrain::ImageData;
    pub use crate::uniform::{Uniform, UniformBank, UniformSink};
    pub use crate::wave::{geometry_waves, texture_waves, Wave};
}
