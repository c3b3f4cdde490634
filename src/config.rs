//! Startup configuration for the museum
//!
//! Defaults reproduce the stock museum layout. Builder methods follow the
//! same `with_*` style as [`PipelineConfig`], and a couple of environment
//! variables can override the shader and presentation mode without a rebuild.
//!
//! [`PipelineConfig`]: crate::gfx::rendering::PipelineConfig

use std::path::PathBuf;

use cgmath::{Deg, Vector3};

use crate::error::MuseumError;

/// Environment variable pointing at a WGSL file that replaces the built-in shader
pub const SHADER_ENV: &str = "VITRINE_SHADER";
/// Environment variable toggling vsync (`1`/`true` to enable)
pub const VSYNC_ENV: &str = "VITRINE_VSYNC";

/// Where the lighting shader comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderSourceConfig {
    Embedded,
    File(PathBuf),
}

impl ShaderSourceConfig {
    /// Resolves the WGSL text, reading from disk for file sources
    pub fn load(&self, embedded: &'static str) -> Result<String, MuseumError> {
        match self {
            Self::Embedded => Ok(embedded.to_string()),
            Self::File(path) => {
                std::fs::read_to_string(path).map_err(|source| MuseumError::ShaderSource {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub position: Vector3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct RobotConfig {
    pub home: Vector3<f32>,
    pub heading: Deg<f32>,
    pub move_speed: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct LightingConfig {
    pub main_position: Vector3<f32>,
    pub main_color: Vector3<f32>,
    pub spotlight_on: bool,
}

/// Complete startup configuration
#[derive(Debug, Clone)]
pub struct MuseumConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub robot: RobotConfig,
    pub lighting: LightingConfig,
    pub shader: ShaderSourceConfig,
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                width: 1280,
                height: 720,
                title: "Virtual Museum".to_string(),
                vsync: false,
            },
            camera: CameraConfig {
                position: Vector3::new(0.0, 2.0, 10.0),
                yaw: Deg(-90.0),
                pitch: Deg(0.0),
                movement_speed: 2.5,
                mouse_sensitivity: 0.1,
                zoom: 45.0,
            },
            robot: RobotConfig {
                home: Vector3::new(0.0, 0.25, 6.0),
                heading: Deg(180.0),
                move_speed: 2.0,
            },
            lighting: LightingConfig {
                main_position: Vector3::new(0.0, 10.0, 0.0),
                main_color: Vector3::new(1.0, 1.0, 1.0),
                spotlight_on: false,
            },
            shader: ShaderSourceConfig::Embedded,
        }
    }
}

impl MuseumConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key/value lookup
    ///
    /// Unparseable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(SHADER_ENV).filter(|p| !p.trim().is_empty()) {
            log::info!("Using shader override from {}", path);
            self = self.with_shader_file(path);
        }

        if let Some(value) = lookup(VSYNC_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => self = self.with_vsync(true),
                "0" | "false" | "off" => self = self.with_vsync(false),
                other => log::warn!("Ignoring {}={:?}", VSYNC_ENV, other),
            }
        }

        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.window.vsync = vsync;
        self
    }

    pub fn with_shader_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.shader = ShaderSourceConfig::File(path.into());
        self
    }

    /// Width over height of the initial window
    pub fn aspect(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_stock_museum() {
        let config = MuseumConfig::default();
        assert_eq!(config.robot.home, Vector3::new(0.0, 0.25, 6.0));
        assert_eq!(config.robot.move_speed, 2.0);
        assert_eq!(config.camera.zoom, 45.0);
        assert!(!config.lighting.spotlight_on);
        assert_eq!(config.shader, ShaderSourceConfig::Embedded);
    }

    #[test]
    fn test_env_overrides() {
        let config = MuseumConfig::default()
            .with_overrides(lookup(&[(SHADER_ENV, "custom.wgsl"), (VSYNC_ENV, "1")]));
        assert_eq!(
            config.shader,
            ShaderSourceConfig::File(PathBuf::from("custom.wgsl"))
        );
        assert!(config.window.vsync);
    }

    #[test]
    fn test_bad_vsync_value_is_ignored() {
        let config = MuseumConfig::default()
            .with_vsync(true)
            .with_overrides(lookup(&[(VSYNC_ENV, "sometimes")]));
        assert!(config.window.vsync);
    }

    #[test]
    fn test_missing_shader_file_is_source_error() {
        let source = ShaderSourceConfig::File(PathBuf::from("/definitely/not/here.wgsl"));
        assert!(matches!(
            source.load(""),
            Err(MuseumError::ShaderSource { .. })
        ));
    }

    #[test]
    fn test_aspect_survives_zero_height() {
        let mut config = MuseumConfig::default();
        config.window.width = 800;
        config.window.height = 0;
        assert_eq!(config.aspect(), 800.0);
    }
}
