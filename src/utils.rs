//! Small helpers shared across modules.

/// Worker-thread count handed to the external alignment engine.
///
/// `ORTHOSCAN_NUM_THREADS` overrides the detected logical CPU count.
pub fn n_threads() -> usize {
    std::env::var("ORTHOSCAN_NUM_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(num_cpus::get)
}

/// True when a pipeline input names a remote source rather than a local path.
pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
