pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod scanner;
pub mod table;
pub mod ui;

#[cfg(test)]
mod test_support;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, NamingConfig, OutputConfig, RunPaths, ScanConfig, TableConfig};
pub use error::{PicGetError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{BatchExtractor, OutputManager, RunReport};
pub use locator::{ImageFilter, ImageLocator};
pub use scanner::StyleScanner;
pub use table::{ColorMap, TableLoader};
pub use ui::{MemoryReporter, OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager, Reporter};

use std::path::Path;

/// Main library interface for picget
pub struct PicGet {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    dry_run: bool,
}

impl PicGet {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Bars would interleave with JSON lines on stdout
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Create a PicGet instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
            .with_dry_run(cli_args.dry_run))
    }

    /// Reads the lookup table into a colour map. Any failure here is fatal.
    pub fn load_color_map<P: AsRef<Path>>(&self, table_path: P) -> Result<ColorMap> {
        let table_path = table_path.as_ref();
        self.output_formatter
            .start_operation(&format!("Loading lookup table {}", table_path.display()));

        let rows = TableLoader::new(&self.config.table).load(table_path)?;
        let color_map = ColorMap::from_rows(&rows);

        if color_map.skipped_rows() > 0 {
            self.output_formatter.debug(&format!(
                "Skipped {} table rows with empty values",
                color_map.skipped_rows()
            ));
        }

        if color_map.is_empty() {
            self.output_formatter
                .warning("The lookup table has no usable rows; no colour images will be saved");
        } else {
            self.output_formatter.info(&format!(
                "Loaded {} colour codes for {} styles",
                color_map.len(),
                color_map.style_count()
            ));
        }

        Ok(color_map)
    }

    /// Loads the table, then processes every item under the input directory
    /// with a progress bar on the terminal.
    pub fn run(&self, paths: &RunPaths) -> Result<RunReport> {
        paths.validate()?;
        let color_map = self.load_color_map(&paths.table_path)?;

        if self.dry_run {
            self.output_formatter
                .info("DRY RUN MODE - no directories or images will be written");
        }
        self.output_formatter.start_operation(&format!(
            "Collecting images from {}",
            paths.input_dir.display()
        ));

        let progress_bar = self.progress_manager.create_item_progress(0);
        let progress_callback = {
            let pb = progress_bar.clone();
            move |report: &RunReport| {
                ui::progress::update_item_progress(&pb, report);
            }
        };

        let reporter = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let result = self.run_with_reporter(
            &paths.input_dir,
            &color_map,
            &reporter,
            Some(&progress_callback),
        );

        match &result {
            Ok(report) => ui::progress::finish_progress_with_summary(
                &progress_bar,
                &format!("Saved {} images", report.images_saved()),
                report.elapsed(),
            ),
            Err(_) => progress_bar.abandon(),
        }

        result
    }

    /// Runs the batch against an already loaded colour map, sending every
    /// message to `reporter`.
    pub fn run_with_reporter(
        &self,
        input_dir: &Path,
        color_map: &ColorMap,
        reporter: &dyn Reporter,
        progress_callback: Option<&dyn Fn(&RunReport)>,
    ) -> Result<RunReport> {
        BatchExtractor::new(&self.config, color_map, reporter)
            .with_dry_run(self.dry_run)
            .run(input_dir, progress_callback)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PicGetError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
