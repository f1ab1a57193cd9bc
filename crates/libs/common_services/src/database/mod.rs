mod cache;
mod error;
mod stores;
mod utils;

pub use cache::*;
pub use error::*;
pub use stores::*;
pub use utils::*;
