use clap::Parser;
use picget::{Cli, OutputFormatter, OutputMode, PicGet, PicGetError, RunReport, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let picget = match PicGet::from_cli(&cli) {
        Ok(picget) => picget,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let paths = match cli.resolve_run_paths() {
        Ok(paths) => paths,
        Err(e) => {
            picget.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    match picget.run(&paths) {
        Ok(report) => {
            picget.output_formatter().print_run_summary(&report);
            exit_code_for_report(&report)
        }
        Err(e) => {
            picget.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "picget.toml".to_string());

    match PicGet::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  picget <input-dir> --table <file> --config {}", config_path);
            println!("\nEdit the file to change table headers, output names or JPEG quality.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn exit_code_for_report(report: &RunReport) -> i32 {
    if report.has_errors() {
        2 // Finished, but some items failed
    } else {
        0
    }
}

fn exit_code_for(error: &PicGetError) -> i32 {
    match error {
        PicGetError::Cancelled { .. } => 130,
        _ => 1,
    }
}

fn print_startup_error(error: &PicGetError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
