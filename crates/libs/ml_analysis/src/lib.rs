#![deny(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod error;
mod image_analyzer;
mod image_fetcher;
mod prompt;
mod staging;

pub use error::*;
pub use image_analyzer::*;
pub use image_fetcher::*;
pub use prompt::analysis_prompt;
pub use staging::stage_image;
