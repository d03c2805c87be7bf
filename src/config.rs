use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Render parameters, read from a JSON file. Every field has a default, so
/// partial configs work.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub model: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Rotation about the y axis, in degrees.
    pub angle: f64,
    pub output: PathBuf,
    /// When set, the depth buffer is written here as a grayscale image.
    pub depth_output: Option<PathBuf>,
    /// Draw face edges with the line rasterizer instead of filling.
    pub wireframe: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            model: "african_head.obj".into(),
            width: 800,
            height: 800,
            angle: 30.0,
            output: "render.png".into(),
            depth_output: None,
            wireframe: false,
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;

        Ok(config)
    }
}

#[test]
fn full_config_parses() {
    let config: RenderConfig = serde_json::from_str(
        r#"{
            "model": "head.obj",
            "width": 2000,
            "height": 2000,
            "angle": 45.0,
            "output": "out.tga",
            "depth_output": "depth.tga",
            "wireframe": true
        }"#,
    )
    .unwrap();

    assert_eq!(PathBuf::from("head.obj"), config.model);
    assert_eq!((2000, 2000), (config.width, config.height));
    assert_eq!(45.0, config.angle);
    assert_eq!(Some(PathBuf::from("depth.tga")), config.depth_output);
    assert!(config.wireframe);
}

#[test]
fn partial_config_uses_defaults() {
    let config: RenderConfig = serde_json::from_str(r#"{"width": 400}"#).unwrap();

    assert_eq!(400, config.width);
    assert_eq!(800, config.height);
    assert_eq!(30.0, config.angle);
    assert_eq!(None, config.depth_output);
    assert!(!config.wireframe);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<RenderConfig>(r#"{"wdith": 400}"#).is_err());
}
