use super::error::*;
use log::debug;

// Create the rayon thread pool used to trace pixels. Without an explicit
// thread count rayon picks one per logical CPU. Workers need no per-thread
// state: each pixel seeds its own generator, see `rng::pixel_rng`.
pub fn init_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|idx| format!("trace-{}", idx));
    if let Some(n) = threads {
        if n == 0 {
            return invalid("thread count must be at least 1");
        }
        builder = builder.num_threads(n);
    }
    let pool = builder.build()?;
    debug!("thread pool with {} workers", pool.current_num_threads());
    Ok(pool)
}
