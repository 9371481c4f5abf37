use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters and messages collected over one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_dir: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub dry_run: bool,
    pub color_map_entries: usize,
    pub items_total: usize,
    pub items_processed: usize,
    pub style_images_saved: usize,
    pub style_images_existing: usize,
    pub style_images_missing: usize,
    pub color_images_saved: usize,
    pub color_images_existing: usize,
    pub color_images_missing: usize,
    pub unmatched: Vec<String>,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub current_item: Option<String>,
    #[serde(skip)]
    start_time: Instant,
}

impl RunReport {
    pub fn new<S: Into<String>>(input_dir: S, dry_run: bool) -> Self {
        Self {
            input_dir: input_dir.into(),
            started_at: Utc::now(),
            duration_ms: 0,
            dry_run,
            color_map_entries: 0,
            items_total: 0,
            items_processed: 0,
            style_images_saved: 0,
            style_images_existing: 0,
            style_images_missing: 0,
            color_images_saved: 0,
            color_images_existing: 0,
            color_images_missing: 0,
            unmatched: Vec::new(),
            errors: Vec::new(),
            current_item: None,
            start_time: Instant::now(),
        }
    }

    pub fn start_item<S: Into<String>>(&mut self, name: S) {
        self.current_item = Some(name.into());
    }

    pub fn finish_item(&mut self) {
        self.items_processed += 1;
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn add_unmatched(&mut self, style_code: &str, color_description: &str) {
        self.unmatched
            .push(format!("{} / {}", style_code, color_description));
    }

    pub fn images_saved(&self) -> usize {
        self.style_images_saved + self.color_images_saved
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Freezes the elapsed time into `duration_ms`.
    pub fn finish(&mut self) {
        self.duration_ms = self.elapsed().as_millis() as u64;
        self.current_item = None;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
