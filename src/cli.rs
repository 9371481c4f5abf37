use crate::config::{CliOverrides, Config, RunPaths};
use crate::error::{PicGetError, Result};
use clap::{Parser, ValueEnum};
use console::Term;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "picget")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect style and style/colour images from product folders and ZIP archives")]
#[command(
    long_about = "picget walks an input directory of style archives and folders, picks one \
                  representative image per style and one per matched style/colour pair, \
                  and saves them as JPEG files named after codes from a lookup table."
)]
#[command(before_help = "📷 picget - Product Image Collector")]
#[command(after_help = "EXAMPLES:\n  \
    picget ./season --table codes.xlsx\n  \
    picget ./season -t codes.csv --quality 85 --dry-run\n  \
    picget ./season -t codes.xlsx --style-dir styles --color-dir colours\n  \
    picget --generate-config --config picget.toml\n\n\
    When INPUT_DIR or --table is omitted it is asked for on the terminal.")]
pub struct Cli {
    /// Directory holding the style archives and folders
    pub input_dir: Option<PathBuf>,

    /// Lookup table mapping style and colour to a colour code (.xlsx, .xls, .ods, .csv)
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Name of the style image directory created under INPUT_DIR
    #[arg(long)]
    pub style_dir: Option<String>,

    /// Name of the style/colour image directory created under INPUT_DIR
    #[arg(long)]
    pub color_dir: Option<String>,

    /// JPEG quality of the saved images (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Image extensions to consider (comma-separated)
    #[arg(long, help = "Image file extensions to look for (e.g., jpg,png,webp)")]
    pub extensions: Option<String>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors and the final JSON summary)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be saved without writing anything)
    #[arg(long, help = "Locate and report images without creating any files")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_style_dir(self.style_dir.clone())
            .with_color_dir(self.color_dir.clone())
            .with_jpeg_quality(self.quality)
            .with_image_extensions(self.extensions.clone())
    }

    /// Input directory and table from the arguments, asking on the terminal
    /// for whichever is missing. An empty answer cancels the run.
    pub fn resolve_run_paths(&self) -> Result<RunPaths> {
        let input_dir = match &self.input_dir {
            Some(dir) => dir.clone(),
            None => prompt_path("Input directory", "input directory")?,
        };

        let table_path = match &self.table {
            Some(table) => table.clone(),
            None => prompt_path("Lookup table file", "lookup table")?,
        };

        let paths = RunPaths::new(input_dir, table_path);
        paths.validate()?;
        Ok(paths)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

fn prompt_path(prompt: &str, what: &str) -> Result<PathBuf> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(PicGetError::Cancelled {
            what: what.to_string(),
        });
    }

    term.write_str(&format!("{}: ", prompt))?;
    let answer = term.read_line()?;

    parse_prompt_answer(&answer).ok_or_else(|| PicGetError::Cancelled {
        what: what.to_string(),
    })
}

/// Trims whitespace and the quotes terminals add to dragged-in paths.
pub fn parse_prompt_answer(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
