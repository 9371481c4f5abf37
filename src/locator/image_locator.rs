use crate::config::ScanConfig;
use crate::error::Result;
use crate::locator::ImageFilter;
use crate::ui::Reporter;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use walkdir::WalkDir;
use zip::ZipArchive;

/// A decoded image and where it came from (archive entry name or file path).
#[derive(Debug, Clone)]
pub struct LocatedImage {
    pub image: DynamicImage,
    pub source: String,
}

/// Finds the representative image of an archive or a directory.
pub struct ImageLocator {
    filter: ImageFilter,
}

impl ImageLocator {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: ImageFilter::new(config),
        }
    }

    pub fn with_filter(filter: ImageFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &ImageFilter {
        &self.filter
    }

    /// First image entry of the archive, in listing order, that decodes.
    ///
    /// Errors only when the archive itself cannot be opened; unreadable or
    /// undecodable entries are skipped.
    pub fn from_archive(
        &self,
        archive_path: &Path,
        reporter: &dyn Reporter,
    ) -> Result<Option<LocatedImage>> {
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(file)?;

        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(err) => {
                    reporter.debug(&format!(
                        "Skipping unreadable entry #{} in {}: {}",
                        index,
                        archive_path.display(),
                        err
                    ));
                    continue;
                }
            };

            if entry.is_dir() || !self.filter.is_image_name(entry.name()) {
                continue;
            }

            let name = entry.name().to_string();
            let mut data = Vec::new();
            if let Err(err) = entry.read_to_end(&mut data) {
                reporter.debug(&format!("Could not read {} from archive: {}", name, err));
                continue;
            }

            match decode_image(&data) {
                Ok(image) => {
                    return Ok(Some(LocatedImage {
                        image,
                        source: name,
                    }))
                }
                Err(err) => {
                    reporter.debug(&format!("Could not decode {}: {}", name, err));
                }
            }
        }

        Ok(None)
    }

    /// First image file under `dir` that decodes, walking depth-first with
    /// entries sorted by name.
    pub fn from_directory(&self, dir: &Path, reporter: &dyn Reporter) -> Option<LocatedImage> {
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    reporter.debug(&format!("Scan error: {}", err));
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.is_image_file(entry.path()) {
                continue;
            }

            let decoded = fs::read(entry.path())
                .map_err(crate::error::PicGetError::from)
                .and_then(|data| decode_image(&data));

            match decoded {
                Ok(image) => {
                    return Some(LocatedImage {
                        image,
                        source: entry.path().display().to_string(),
                    })
                }
                Err(err) => {
                    reporter.debug(&format!(
                        "Could not decode {}: {}",
                        entry.path().display(),
                        err
                    ));
                }
            }
        }

        None
    }
}

impl Default for ImageLocator {
    fn default() -> Self {
        Self::with_filter(ImageFilter::default())
    }
}

/// Decodes an image, detecting the format from its content rather than its name.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(data)?)
}
