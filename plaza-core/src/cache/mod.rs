pub mod live_cache;

pub use live_cache::LiveCache;
