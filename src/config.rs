use std::sync::OnceLock;

/// Row count at which bulk row operations fan out across rayon's pool.
pub(crate) const DEFAULT_PARALLEL_MIN_ROWS: usize = 256;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static PARALLEL_MIN_ROWS: OnceLock<usize> = OnceLock::new();

pub(crate) fn parallel_min_rows() -> usize {
    *PARALLEL_MIN_ROWS.get_or_init(|| {
        parse_env_usize("TINYGRAPH_PARALLEL_MIN_ROWS", DEFAULT_PARALLEL_MIN_ROWS).max(1)
    })
}
