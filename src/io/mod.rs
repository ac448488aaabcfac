pub mod line_cache;

pub use line_cache::LineCache;
