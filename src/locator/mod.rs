pub mod image_filter;
pub mod image_locator;

pub use image_filter::ImageFilter;
pub use image_locator::{decode_image, ImageLocator, LocatedImage};
