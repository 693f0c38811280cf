//! Configuration loader - YAML manifest + .env overrides

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use anyhow::Result;

use crate::plot::color::{Rgb, OBVERSE_PALETTE, REVERSE_PALETTE};
use crate::plot::glyph;
use crate::plot::viewport;

/// Main configuration loaded from viewer.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User-defined palettes, name -> ordered colors
    #[serde(default)]
    pub palettes: HashMap<String, Vec<Rgb>>,
    #[serde(default = "default_obverse_palette")]
    pub obverse_palette: String,
    #[serde(default = "default_reverse_palette")]
    pub reverse_palette: String,
    #[serde(default = "default_glyph_radius")]
    pub glyph_radius: f64,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default)]
    pub default_columns: DefaultColumns,
}

/// Optional startup column choices, applied when the loaded CSV has
/// columns with these names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultColumns {
    pub x: Option<String>,
    pub y: Option<String>,
    pub obverse: Option<String>,
    pub reverse: Option<String>,
}

fn default_obverse_palette() -> String {
    "set1".to_string()
}

fn default_reverse_palette() -> String {
    "set2".to_string()
}

fn default_glyph_radius() -> f64 {
    glyph::DEFAULT_RADIUS
}

fn default_zoom_step() -> f64 {
    viewport::DEFAULT_ZOOM_STEP
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palettes: HashMap::new(),
            obverse_palette: default_obverse_palette(),
            reverse_palette: default_reverse_palette(),
            glyph_radius: default_glyph_radius(),
            zoom_step: default_zoom_step(),
            default_columns: DefaultColumns::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve a palette by name. Unknown or empty names fall back to
    /// the built-in Set1/Set2 palettes.
    pub fn palette(&self, name: &str) -> Vec<Rgb> {
        if let Some(palette) = self.palettes.get(name) {
            if !palette.is_empty() {
                return palette.clone();
            }
        }
        match name {
            "set2" => REVERSE_PALETTE.to_vec(),
            _ => OBVERSE_PALETTE.to_vec(),
        }
    }

    /// The palette coloring obverse (left) halves
    pub fn obverse_colors(&self) -> Vec<Rgb> {
        self.palette(&self.obverse_palette)
    }

    /// The palette coloring reverse (right) halves
    pub fn reverse_colors(&self) -> Vec<Rgb> {
        self.palette(&self.reverse_palette)
    }
}

/// Environment overrides loaded from .env
#[derive(Debug, Clone)]
pub struct Env {
    /// Starting directory for the CSV open dialog
    pub data_dir: String,
    pub log_dir: String,
}

impl Env {
    /// Load overrides from .env / the process environment
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Env {
            data_dir: std::env::var("COIN_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            log_dir: std::env::var("COIN_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}
