pub mod style_scanner;

pub use style_scanner::{
    list_color_items, ColorItem, InputListing, StyleItem, StyleItemKind, StyleScanner,
};
