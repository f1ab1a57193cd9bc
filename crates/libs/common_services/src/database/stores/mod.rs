mod memory_cache_store;
mod pg_cache_store;

pub use memory_cache_store::*;
pub use pg_cache_store::*;
