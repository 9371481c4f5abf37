pub mod color_map;
pub mod loader;

pub use color_map::ColorMap;
pub use loader::{TableFormat, TableLoader, TableRow};
