use crate::config::ScanConfig;
use std::path::Path;

/// Decides which files count as images and which top-level files are archives.
/// Matching is on the extension only and ignores case.
#[derive(Debug, Clone)]
pub struct ImageFilter {
    image_extensions: Vec<String>,
    archive_extensions: Vec<String>,
}

impl ImageFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            image_extensions: normalize(&config.image_extensions),
            archive_extensions: normalize(&config.archive_extensions),
        }
    }

    pub fn is_image_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| self.image_extensions.contains(&ext.to_lowercase()))
    }

    /// Same as [`is_image_file`](Self::is_image_file) for archive entry names,
    /// which always use `/` separators.
    pub fn is_image_name(&self, name: &str) -> bool {
        if name.ends_with('/') {
            return false;
        }
        let file_name = name.rsplit('/').next().unwrap_or(name);
        self.is_image_file(Path::new(file_name))
    }

    pub fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| self.archive_extensions.contains(&ext.to_lowercase()))
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        let config = ScanConfig::default();
        Self::new(&config)
    }
}

fn normalize(extensions: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_detection() {
        let filter = ImageFilter::default();

        assert!(filter.is_image_file(Path::new("front.jpg")));
        assert!(filter.is_image_file(Path::new("front.jpeg")));
        assert!(filter.is_image_file(Path::new("detail.png")));
        assert!(filter.is_image_file(Path::new("scan.bmp")));
        assert!(filter.is_image_file(Path::new("anim.gif")));

        assert!(!filter.is_image_file(Path::new("notes.txt")));
        assert!(!filter.is_image_file(Path::new("photo.webp")));
        assert!(!filter.is_image_file(Path::new("jpg")));
    }

    #[test]
    fn test_case_insensitive_extensions() {
        let filter = ImageFilter::default();

        assert!(filter.is_image_file(Path::new("IMG_001.JPG")));
        assert!(filter.is_image_file(Path::new("img.Png")));
        assert!(filter.is_archive(Path::new("A100 RED.ZIP")));
    }

    #[test]
    fn test_archive_entry_names() {
        let filter = ImageFilter::default();

        assert!(filter.is_image_name("A100/RED/01.png"));
        assert!(filter.is_image_name("cover.JPG"));
        assert!(!filter.is_image_name("A100/RED.png/"));
        assert!(!filter.is_image_name("A100/readme.txt"));
    }

    #[test]
    fn test_archive_detection() {
        let filter = ImageFilter::default();

        assert!(filter.is_archive(Path::new("A100 RED.zip")));
        assert!(!filter.is_archive(Path::new("A100 RED.rar")));
        assert!(!filter.is_archive(Path::new("A100")));
    }

    #[test]
    fn test_configured_extensions_are_normalized() {
        let config = ScanConfig {
            image_extensions: vec![".WEBP".to_string(), "webp".to_string(), " ".to_string()],
            archive_extensions: vec!["ZIP".to_string()],
        };
        let filter = ImageFilter::new(&config);

        assert!(filter.is_image_file(Path::new("a.webp")));
        assert!(filter.is_image_file(Path::new("a.WebP")));
        assert!(!filter.is_image_file(Path::new("a.")));
        assert!(filter.is_archive(Path::new("A100.zip")));
        assert!(!filter.is_image_file(Path::new("a.jpg")));
    }
}
