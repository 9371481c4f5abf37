use crate::config::NamingConfig;
use crate::error::{PicGetError, Result};
use crate::locator::ImageFilter;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleItemKind {
    Archive,
    Directory,
}

/// A top-level archive or directory of the input root.
#[derive(Debug, Clone)]
pub struct StyleItem {
    pub path: PathBuf,
    pub name: String,
    pub kind: StyleItemKind,
    pub style_code: String,
}

impl StyleItem {
    pub fn is_archive(&self) -> bool {
        self.kind == StyleItemKind::Archive
    }
}

/// A colour folder; `description` is its trimmed name.
#[derive(Debug, Clone)]
pub struct ColorItem {
    pub path: PathBuf,
    pub description: String,
}

/// Result of listing the input root.
#[derive(Debug, Default)]
pub struct InputListing {
    pub items: Vec<StyleItem>,
    /// Entries that are neither archives nor directories.
    pub ignored: Vec<PathBuf>,
}

pub struct StyleScanner {
    filter: ImageFilter,
    naming: NamingConfig,
    excluded: Vec<PathBuf>,
}

impl StyleScanner {
    pub fn new(filter: ImageFilter, naming: &NamingConfig) -> Self {
        Self {
            filter,
            naming: naming.clone(),
            excluded: Vec::new(),
        }
    }

    /// Paths never reported as style items (the output directories).
    pub fn with_excluded<I: IntoIterator<Item = PathBuf>>(mut self, paths: I) -> Self {
        self.excluded.extend(paths);
        self
    }

    /// Lists the top level of `root`: archives first, then directories, each
    /// group sorted by name.
    pub fn scan_input<P: AsRef<Path>>(&self, root: P) -> Result<InputListing> {
        let root_path = root.as_ref();

        if !root_path.is_dir() {
            return Err(PicGetError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(root_path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        let mut listing = InputListing::default();
        for path in entries {
            if self.excluded.iter().any(|excluded| excluded == &path) {
                continue;
            }

            let kind = if path.is_dir() {
                StyleItemKind::Directory
            } else if path.is_file() && self.filter.is_archive(&path) {
                StyleItemKind::Archive
            } else {
                listing.ignored.push(path);
                continue;
            };

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let style_code = self.style_code(&name, kind);

            listing.items.push(StyleItem {
                path,
                name,
                kind,
                style_code,
            });
        }

        // Archives come first so a style's image is taken from its archive
        // before the extracted folder sitting next to it.
        listing.items.sort_by_key(|item| !item.is_archive());

        Ok(listing)
    }

    /// First token of the item name; empty when the name has none.
    pub fn style_code(&self, name: &str, kind: StyleItemKind) -> String {
        let base = if kind == StyleItemKind::Archive && self.naming.strip_archive_extension {
            Path::new(name)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| name.to_string())
        } else {
            name.to_string()
        };

        let separators = &self.naming.style_code_separators;
        let token = if separators.is_empty() {
            base.split_whitespace().next()
        } else {
            base.split(|c: char| separators.contains(c))
                .map(str::trim)
                .find(|t| !t.is_empty())
        };

        token.unwrap_or("").to_string()
    }

    /// Directory holding the colour folders of `item`.
    pub fn color_root(&self, item: &StyleItem, input_root: &Path) -> PathBuf {
        match item.kind {
            StyleItemKind::Directory => item.path.clone(),
            StyleItemKind::Archive => input_root.join(
                self.naming
                    .archive_color_root
                    .replace("{style}", &item.style_code),
            ),
        }
    }
}

/// Direct subdirectories of `dir`, sorted by name.
pub fn list_color_items(dir: &Path) -> Result<Vec<ColorItem>> {
    let mut items: Vec<ColorItem> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| ColorItem {
            description: entry.file_name().to_string_lossy().trim().to_string(),
            path: entry.path(),
        })
        .collect();

    items.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> StyleScanner {
        StyleScanner::new(ImageFilter::default(), &NamingConfig::default())
    }

    #[test]
    fn test_style_code_is_first_token() {
        let scanner = scanner();

        assert_eq!(scanner.style_code("A100 RED", StyleItemKind::Directory), "A100");
        assert_eq!(scanner.style_code("A100\t春季 款", StyleItemKind::Directory), "A100");
        assert_eq!(scanner.style_code("A100 RED.zip", StyleItemKind::Archive), "A100");
        assert_eq!(scanner.style_code("A100.zip", StyleItemKind::Archive), "A100");
        assert_eq!(scanner.style_code("   ", StyleItemKind::Directory), "");
    }

    #[test]
    fn test_style_code_keeps_extension_when_configured() {
        let naming = NamingConfig {
            strip_archive_extension: false,
            ..NamingConfig::default()
        };
        let scanner = StyleScanner::new(ImageFilter::default(), &naming);

        assert_eq!(scanner.style_code("A100.zip", StyleItemKind::Archive), "A100.zip");
    }

    #[test]
    fn test_style_code_custom_separators() {
        let naming = NamingConfig {
            style_code_separators: "-_".to_string(),
            ..NamingConfig::default()
        };
        let scanner = StyleScanner::new(ImageFilter::default(), &naming);

        assert_eq!(scanner.style_code("A100-RED", StyleItemKind::Directory), "A100");
        assert_eq!(scanner.style_code("_B200_x.zip", StyleItemKind::Archive), "B200");
    }

    #[test]
    fn test_scan_input_classifies_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("B200 BLUE")).unwrap();
        fs::write(root.join("A100 RED.zip"), b"zip").unwrap();
        fs::write(root.join("notes.txt"), b"text").unwrap();
        fs::create_dir(root.join("款号图")).unwrap();

        let listing = scanner()
            .with_excluded(vec![root.join("款号图")])
            .scan_input(root)
            .unwrap();

        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[0].name, "A100 RED.zip");
        assert!(listing.items[0].is_archive());
        assert_eq!(listing.items[0].style_code, "A100");
        assert_eq!(listing.items[1].kind, StyleItemKind::Directory);
        assert_eq!(listing.items[1].style_code, "B200");
        assert_eq!(listing.ignored, vec![root.join("notes.txt")]);
    }

    #[test]
    fn test_archives_are_listed_before_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("A100 RED.zip"), b"zip").unwrap();
        fs::create_dir(root.join("A100")).unwrap();
        fs::create_dir(root.join("A000")).unwrap();
        fs::write(root.join("B200.zip"), b"zip").unwrap();

        let listing = scanner().scan_input(root).unwrap();

        let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A100 RED.zip", "B200.zip", "A000", "A100"]);
    }

    #[test]
    fn test_scan_input_rejects_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            scanner().scan_input(&file),
            Err(PicGetError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_color_root() {
        let root = Path::new("/input");
        let scanner = scanner();

        let archive = StyleItem {
            path: root.join("A100 RED.zip"),
            name: "A100 RED.zip".to_string(),
            kind: StyleItemKind::Archive,
            style_code: "A100".to_string(),
        };
        assert_eq!(scanner.color_root(&archive, root), root.join("A100"));

        let directory = StyleItem {
            path: root.join("B200 BLUE"),
            name: "B200 BLUE".to_string(),
            kind: StyleItemKind::Directory,
            style_code: "B200".to_string(),
        };
        assert_eq!(scanner.color_root(&directory, root), root.join("B200 BLUE"));
    }

    #[test]
    fn test_list_color_items() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("RED ")).unwrap();
        fs::create_dir(root.join("BLUE")).unwrap();
        fs::write(root.join("cover.jpg"), b"x").unwrap();

        let items = list_color_items(root).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "BLUE");
        assert_eq!(items[1].description, "RED");
    }
}
