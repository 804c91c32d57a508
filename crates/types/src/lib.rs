pub mod color;
pub mod currency;

pub use color::Color;
