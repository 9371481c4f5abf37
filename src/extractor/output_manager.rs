use crate::config::OutputConfig;
use crate::error::{PicGetError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Owns the two output directories and writes JPEGs into them.
pub struct OutputManager {
    style_dir: PathBuf,
    color_dir: PathBuf,
    color_file_suffix: String,
    jpeg_quality: u8,
    dry_run: bool,
    planned: RefCell<HashSet<PathBuf>>,
}

impl OutputManager {
    pub fn new(input_root: &Path, config: &OutputConfig) -> Self {
        Self {
            style_dir: input_root.join(&config.style_dir_name),
            color_dir: input_root.join(&config.color_dir_name),
            color_file_suffix: config.color_file_suffix.clone(),
            jpeg_quality: config.jpeg_quality.clamp(1, 100),
            dry_run: false,
            planned: RefCell::new(HashSet::new()),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Creates both output directories. Nothing is created in dry-run mode.
    pub fn initialize(&self) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }

        fs::create_dir_all(&self.style_dir)?;
        fs::create_dir_all(&self.color_dir)?;
        Ok(())
    }

    pub fn style_dir(&self) -> &Path {
        &self.style_dir
    }

    pub fn color_dir(&self) -> &Path {
        &self.color_dir
    }

    pub fn output_dirs(&self) -> Vec<PathBuf> {
        vec![self.style_dir.clone(), self.color_dir.clone()]
    }

    /// `<style dir>/{style}.jpg`
    pub fn style_image_path(&self, style_code: &str) -> PathBuf {
        self.style_dir
            .join(format!("{}.jpg", sanitize_filename(style_code)))
    }

    /// `<color dir>/{style}_{code}_{suffix}.jpg`
    pub fn color_image_path(&self, style_code: &str, color_code: &str) -> PathBuf {
        let name = format!("{}_{}_{}", style_code, color_code, self.color_file_suffix);
        self.color_dir
            .join(format!("{}.jpg", sanitize_filename(&name)))
    }

    /// True when `path` is on disk, or was already "written" in dry-run mode.
    pub fn target_exists(&self, path: &Path) -> bool {
        path.exists() || self.planned.borrow().contains(path)
    }

    /// Re-encodes `image` as JPEG at `dest`; returns the bytes written.
    ///
    /// Never overwrites: an existing `dest` is an error. The image is encoded
    /// in memory first so a failed encode leaves no file behind. In dry-run
    /// mode the encoded size is returned and nothing is written.
    pub fn save_jpeg(&self, image: &DynamicImage, dest: &Path) -> Result<u64> {
        let encoded = encode_jpeg(image, self.jpeg_quality)?;

        if self.dry_run {
            self.planned.borrow_mut().insert(dest.to_path_buf());
            return Ok(encoded.len() as u64);
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dest)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    PicGetError::InvalidPath {
                        path: format!("{} already exists", dest.display()),
                    }
                } else {
                    PicGetError::Io(e)
                }
            })?;
        write_or_remove(&mut file, dest, &encoded)?;

        Ok(encoded.len() as u64)
    }
}

/// Writes `data` to a freshly created `dest`. A partial file is removed on
/// failure so the next run can retry it.
fn write_or_remove<W: Write>(writer: &mut W, dest: &Path, data: &[u8]) -> Result<()> {
    let written = writer.write_all(data).and_then(|_| writer.flush());
    if let Err(e) = written {
        let _ = fs::remove_file(dest);
        return Err(PicGetError::Io(e));
    }
    Ok(())
}

/// Baseline RGB JPEG; alpha is dropped.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        encoder.encode_image(&rgb)?;
    }
    Ok(buffer)
}

// Cross-platform filename sanitization
pub fn sanitize_filename(name: &str) -> String {
    let mut sanitized = String::new();

    for ch in name.chars() {
        match ch {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => sanitized.push('_'),
            '/' | '\\' => sanitized.push('_'),
            c if c.is_control() => sanitized.push('_'),
            c => sanitized.push(c),
        }
    }

    let sanitized = sanitized.trim_end_matches(&['.', ' '][..]).to_string();

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}
