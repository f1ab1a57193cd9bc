#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod image_analysis;
mod schema;
mod tags;

pub use image_analysis::*;
pub use schema::*;
pub use tags::*;
