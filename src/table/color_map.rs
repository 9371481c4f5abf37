use crate::table::TableRow;
use std::collections::HashMap;

/// (style code, colour description) -> colour code.
///
/// Keys and values are stored trimmed; a later row with the same key replaces
/// an earlier one.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: HashMap<(String, String), String>,
    skipped_rows: usize,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows missing any of the three values are skipped and counted.
    pub fn from_rows(rows: &[TableRow]) -> Self {
        let mut map = Self::new();
        for row in rows {
            if !map.insert(&row.style_code, &row.color_description, &row.color_code) {
                map.skipped_rows += 1;
            }
        }
        map
    }

    /// Returns false when a value is blank after trimming.
    pub fn insert(&mut self, style_code: &str, color_description: &str, color_code: &str) -> bool {
        let style_code = style_code.trim();
        let color_description = color_description.trim();
        let color_code = color_code.trim();

        if style_code.is_empty() || color_description.is_empty() || color_code.is_empty() {
            return false;
        }

        self.entries.insert(
            (style_code.to_string(), color_description.to_string()),
            color_code.to_string(),
        );
        true
    }

    pub fn lookup(&self, style_code: &str, color_description: &str) -> Option<&str> {
        self.entries
            .get(&(
                style_code.trim().to_string(),
                color_description.trim().to_string(),
            ))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn style_count(&self) -> usize {
        let mut styles: Vec<&str> = self.entries.keys().map(|(s, _)| s.as_str()).collect();
        styles.sort_unstable();
        styles.dedup();
        styles.len()
    }
}
