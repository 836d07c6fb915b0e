//! High-level scene loading: picks the format from the file extension.

use std::path::Path;

use super::{parse_scene, SceneResult};
use crate::Scene;

/// Load a scene from disk.
///
/// `.json` files are deserialized as a [`Scene`]; everything else goes
/// through the text parser.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let scene: Scene = if is_json {
        serde_json::from_str(&content)?
    } else {
        parse_scene(&content)?
    };

    log::info!(
        "Loaded {} primitives and {} lights from {}",
        scene.primitive_count(),
        scene.lights.len(),
        path.display()
    );

    Ok(scene)
}
