pub mod color;
pub mod rings;
pub mod scene;

pub use rings::{generate_rings, RingCenter};
pub use scene::{RenderScene, SceneCircle, SceneFace, ScenePoint, Style};
