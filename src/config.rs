use crate::error::{PicGetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub scan: ScanConfig,
    pub naming: NamingConfig,
    pub output: OutputConfig,
}

/// Header names of the three required lookup table columns.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub style_column: String,
    pub color_column: String,
    pub code_column: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub image_extensions: Vec<String>,
    pub archive_extensions: Vec<String>,
}

/// Rules turning input entry names into style codes and colour folders.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Characters the item name is split on; the first non-empty token is the
    /// style code. Empty means any whitespace.
    pub style_code_separators: String,
    /// Drop the archive extension before splitting (`A100.zip` -> `A100`).
    /// Set to `false` for the legacy behaviour, where the extension stays in
    /// the style code (`A100.zip` -> `A100.zip`).
    pub strip_archive_extension: bool,
    /// Folder under the input root holding the colour folders of an archive.
    /// `{style}` is replaced by the style code.
    pub archive_color_root: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub style_dir_name: String,
    pub color_dir_name: String,
    pub color_file_suffix: String,
    pub jpeg_quality: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style_column: "款号".to_string(),
            color_column: "颜色".to_string(),
            code_column: "色号".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            image_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "bmp".to_string(),
                "gif".to_string(),
            ],
            archive_extensions: vec!["zip".to_string()],
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            style_code_separators: String::new(),
            strip_archive_extension: true,
            archive_color_root: "{style}".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            style_dir_name: "款号图".to_string(),
            color_dir_name: "款色图".to_string(),
            color_file_suffix: "IMAGEURL".to_string(),
            jpeg_quality: 90,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PicGetError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PicGetError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PicGetError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["picget.toml", ".picget.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref style_dir) = cli_args.style_dir {
            self.output.style_dir_name = style_dir.clone();
        }

        if let Some(ref color_dir) = cli_args.color_dir {
            self.output.color_dir_name = color_dir.clone();
        }

        if let Some(quality) = cli_args.jpeg_quality {
            self.output.jpeg_quality = quality;
        }

        if let Some(ref extensions) = cli_args.image_extensions {
            self.scan.image_extensions = extensions
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PicGetError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PicGetError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let columns = [
            &self.table.style_column,
            &self.table.color_column,
            &self.table.code_column,
        ];
        if columns.iter().any(|c| c.trim().is_empty()) {
            return Err(PicGetError::Config {
                message: "Lookup table column names must not be empty".to_string(),
            });
        }
        if columns[0].trim() == columns[1].trim()
            || columns[0].trim() == columns[2].trim()
            || columns[1].trim() == columns[2].trim()
        {
            return Err(PicGetError::Config {
                message: "Lookup table column names must be distinct".to_string(),
            });
        }

        if self.scan.image_extensions.is_empty() {
            return Err(PicGetError::Config {
                message: "At least one image extension must be specified".to_string(),
            });
        }

        if self.scan.archive_extensions.is_empty() {
            return Err(PicGetError::Config {
                message: "At least one archive extension must be specified".to_string(),
            });
        }

        for name in [&self.output.style_dir_name, &self.output.color_dir_name] {
            if name.trim().is_empty() {
                return Err(PicGetError::Config {
                    message: "Output directory names must not be empty".to_string(),
                });
            }
            if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
                return Err(PicGetError::Config {
                    message: format!("Output directory name must be a plain name: {}", name),
                });
            }
        }

        if self.output.style_dir_name == self.output.color_dir_name {
            return Err(PicGetError::Config {
                message: "Style and colour output directories must differ".to_string(),
            });
        }

        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(PicGetError::Config {
                message: format!(
                    "JPEG quality must be between 1 and 100, got {}",
                    self.output.jpeg_quality
                ),
            });
        }

        if self.naming.archive_color_root.trim().is_empty() {
            return Err(PicGetError::Config {
                message: "Archive colour root must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub style_dir: Option<String>,
    pub color_dir: Option<String>,
    pub jpeg_quality: Option<u8>,
    pub image_extensions: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_dir(mut self, style_dir: Option<String>) -> Self {
        self.style_dir = style_dir;
        self
    }

    pub fn with_color_dir(mut self, color_dir: Option<String>) -> Self {
        self.color_dir = color_dir;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: Option<u8>) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn with_image_extensions(mut self, extensions: Option<String>) -> Self {
        self.image_extensions = extensions;
        self
    }
}

/// Input locations for one run, resolved from arguments or prompts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub input_dir: PathBuf,
    pub table_path: PathBuf,
}

impl RunPaths {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, table_path: Q) -> Self {
        Self {
            input_dir: input_dir.into(),
            table_path: table_path.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(PicGetError::InvalidPath {
                path: format!("{} is not a directory", self.input_dir.display()),
            });
        }

        if !self.table_path.is_file() {
            return Err(PicGetError::InvalidPath {
                path: format!("{} is not a file", self.table_path.display()),
            });
        }

        Ok(())
    }
}
