use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicGetError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user: {what}")]
    Cancelled { what: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Failed to read lookup table {path}: {message}")]
    TableRead { path: String, message: String },

    #[error("Unsupported lookup table format: {path}")]
    UnsupportedTable { path: String },

    #[error("Lookup table {path} has no column named '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("Archive could not be read: {message}")]
    Archive {
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Image operation failed: {message}")]
    Image {
        message: String,
        #[source]
        source: image::ImageError,
    },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PicGetError {
    fn user_message(&self) -> String {
        match self {
            PicGetError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            PicGetError::Cancelled { what } => {
                format!("No {} selected, nothing to do", what)
            }
            PicGetError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            PicGetError::TableRead { path, message } => {
                format!("Could not read lookup table {}: {}", path, message)
            }
            PicGetError::UnsupportedTable { path } => {
                format!("Unsupported lookup table format: {}", path)
            }
            PicGetError::MissingColumn { path, column } => {
                format!("Lookup table {} is missing the '{}' column", path, column)
            }
            PicGetError::Archive { message, .. } => {
                format!("Archive could not be read: {}", message)
            }
            PicGetError::Image { message, .. } => {
                format!("Image could not be processed: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PicGetError::Config { .. } => Some(
                "Check your configuration file syntax, or run with --generate-config to start from a sample.".to_string()
            ),
            PicGetError::Cancelled { .. } => Some(
                "Pass the input directory as an argument and the table with --table to skip the prompts.".to_string()
            ),
            PicGetError::InvalidPath { .. } => Some(
                "Make sure the path exists and points to the right kind of entry (directory or file).".to_string()
            ),
            PicGetError::TableRead { .. } => Some(
                "Make sure the file is not open in another program and is a valid workbook or UTF-8 CSV.".to_string()
            ),
            PicGetError::UnsupportedTable { .. } => Some(
                "Use an .xlsx, .xls, .xlsm, .ods or .csv file.".to_string()
            ),
            PicGetError::MissingColumn { .. } => Some(
                "Rename the header in the first row, or set the column names in the [table] section of the configuration.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for PicGetError {
    fn from(error: zip::result::ZipError) -> Self {
        PicGetError::Archive {
            message: error.to_string(),
            source: error,
        }
    }
}

impl From<image::ImageError> for PicGetError {
    fn from(error: image::ImageError) -> Self {
        PicGetError::Image {
            message: error.to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for PicGetError {
    fn from(error: toml::de::Error) -> Self {
        PicGetError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PicGetError>;
