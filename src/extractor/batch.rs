use crate::config::Config;
use crate::error::{Result, UserFriendlyError};
use crate::extractor::{OutputManager, RunReport};
use crate::locator::{ImageLocator, LocatedImage};
use crate::scanner::{list_color_items, ColorItem, StyleItem, StyleItemKind, StyleScanner};
use crate::table::ColorMap;
use crate::ui::Reporter;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Style codes already handled for the style-image directory in this run.
#[derive(Debug, Default)]
pub struct ProcessedStyles {
    styles: HashSet<String>,
}

impl ProcessedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, style_code: &str) -> bool {
        self.styles.contains(style_code)
    }

    /// Returns false if the style was already marked.
    pub fn mark(&mut self, style_code: &str) -> bool {
        self.styles.insert(style_code.to_string())
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Walks the input root once, writing one image per style and one per
/// matched style/colour pair.
///
/// Per-item problems are reported and recorded in the [`RunReport`]; only
/// failures to set up the output directories or to list the input root are
/// returned as errors.
pub struct BatchExtractor<'a> {
    config: &'a Config,
    color_map: &'a ColorMap,
    reporter: &'a dyn Reporter,
    locator: ImageLocator,
    dry_run: bool,
}

impl<'a> BatchExtractor<'a> {
    pub fn new(config: &'a Config, color_map: &'a ColorMap, reporter: &'a dyn Reporter) -> Self {
        Self {
            config,
            color_map,
            reporter,
            locator: ImageLocator::new(&config.scan),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(
        &self,
        input_root: &Path,
        progress_callback: Option<&dyn Fn(&RunReport)>,
    ) -> Result<RunReport> {
        let output = OutputManager::new(input_root, &self.config.output).with_dry_run(self.dry_run);
        output.initialize()?;

        let scanner = StyleScanner::new(self.locator.filter().clone(), &self.config.naming)
            .with_excluded(output.output_dirs());
        let listing = scanner.scan_input(input_root)?;

        let mut report = RunReport::new(input_root.display().to_string(), self.dry_run);
        report.color_map_entries = self.color_map.len();
        report.items_total = listing.items.len();

        for ignored in &listing.ignored {
            self.reporter.debug(&format!(
                "Ignoring {}: not a directory or archive",
                ignored.display()
            ));
        }

        let mut processed = ProcessedStyles::new();
        let mut color_roots = HashSet::new();

        for item in &listing.items {
            report.start_item(item.name.clone());
            self.process_item(
                item,
                input_root,
                &scanner,
                &output,
                &mut processed,
                &mut color_roots,
                &mut report,
            );
            report.finish_item();

            if let Some(callback) = progress_callback {
                callback(&report);
            }
        }

        report.finish();
        if let Some(callback) = progress_callback {
            callback(&report);
        }

        Ok(report)
    }

    fn process_item(
        &self,
        item: &StyleItem,
        input_root: &Path,
        scanner: &StyleScanner,
        output: &OutputManager,
        processed: &mut ProcessedStyles,
        color_roots: &mut HashSet<PathBuf>,
        report: &mut RunReport,
    ) {
        if item.style_code.is_empty() {
            let message = format!("Could not derive a style code from '{}'", item.name);
            self.reporter.warning(&message);
            report.add_error(message);
            return;
        }

        self.process_style_image(item, output, processed, report);
        self.process_colors(item, input_root, scanner, output, color_roots, report);
    }

    fn process_style_image(
        &self,
        item: &StyleItem,
        output: &OutputManager,
        processed: &mut ProcessedStyles,
        report: &mut RunReport,
    ) {
        let style_code = item.style_code.as_str();

        if processed.contains(style_code) {
            self.reporter.info(&format!(
                "Style image for {} already handled, skipping {}",
                style_code, item.name
            ));
            return;
        }

        let dest = output.style_image_path(style_code);
        if output.target_exists(&dest) {
            self.reporter.info(&format!(
                "Style image already exists, skipping: {}",
                file_name(&dest)
            ));
            report.style_images_existing += 1;
            processed.mark(style_code);
            return;
        }

        let located = match item.kind {
            StyleItemKind::Archive => match self.locator.from_archive(&item.path, self.reporter) {
                Ok(located) => located,
                Err(err) => {
                    let message = format!(
                        "Failed to read archive {}: {}",
                        item.name,
                        err.user_message()
                    );
                    self.reporter.error(&message);
                    report.add_error(message);
                    return;
                }
            },
            StyleItemKind::Directory => self.locator.from_directory(&item.path, self.reporter),
        };

        let Some(located) = located else {
            let kind = if item.is_archive() { "archive" } else { "folder" };
            self.reporter
                .warning(&format!("No image found in {}: {}", kind, item.name));
            report.style_images_missing += 1;
            return;
        };

        if self.save(&located, output, &dest, report) {
            processed.mark(style_code);
            report.style_images_saved += 1;
        }
    }

    fn process_colors(
        &self,
        item: &StyleItem,
        input_root: &Path,
        scanner: &StyleScanner,
        output: &OutputManager,
        color_roots: &mut HashSet<PathBuf>,
        report: &mut RunReport,
    ) {
        let color_root = scanner.color_root(item, input_root);

        // An archive's extracted folder is also a top-level item of its own
        if color_roots.contains(&color_root) {
            self.reporter.debug(&format!(
                "Colour folders in {} already handled",
                color_root.display()
            ));
            return;
        }

        if item.is_archive() && !color_root.is_dir() {
            self.reporter.warning(&format!(
                "No extracted folder for {}: {} not found",
                item.name,
                color_root.display()
            ));
            return;
        }

        color_roots.insert(color_root.clone());
        let colors = match list_color_items(&color_root) {
            Ok(colors) => colors,
            Err(err) => {
                let message = format!(
                    "Failed to list colour folders in {}: {}",
                    color_root.display(),
                    err.user_message()
                );
                self.reporter.error(&message);
                report.add_error(message);
                return;
            }
        };

        for color in &colors {
            self.process_color(&item.style_code, color, output, report);
        }
    }

    fn process_color(
        &self,
        style_code: &str,
        color: &ColorItem,
        output: &OutputManager,
        report: &mut RunReport,
    ) {
        let Some(color_code) = self.color_map.lookup(style_code, &color.description) else {
            self.reporter.warning(&format!(
                "Unmatched style/colour: {} / {}",
                style_code, color.description
            ));
            report.add_unmatched(style_code, &color.description);
            return;
        };

        let dest = output.color_image_path(style_code, color_code);
        if output.target_exists(&dest) {
            self.reporter.info(&format!(
                "Colour image already exists, skipping: {}",
                file_name(&dest)
            ));
            report.color_images_existing += 1;
            return;
        }

        match self.locator.from_directory(&color.path, self.reporter) {
            Some(located) => {
                if self.save(&located, output, &dest, report) {
                    report.color_images_saved += 1;
                }
            }
            None => {
                self.reporter.warning(&format!(
                    "No image in colour folder: {}",
                    color.path.display()
                ));
                report.color_images_missing += 1;
            }
        }
    }

    fn save(
        &self,
        located: &LocatedImage,
        output: &OutputManager,
        dest: &Path,
        report: &mut RunReport,
    ) -> bool {
        match output.save_jpeg(&located.image, dest) {
            Ok(bytes) => {
                let verb = if self.dry_run { "Would save" } else { "Saved" };
                self.reporter.success(&format!(
                    "{} {} ({} bytes, from {})",
                    verb,
                    file_name(dest),
                    bytes,
                    located.source
                ));
                true
            }
            Err(err) => {
                let message = format!(
                    "Failed to save {}: {}",
                    file_name(dest),
                    err.user_message()
                );
                self.reporter.error(&message);
                report.add_error(message);
                false
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
