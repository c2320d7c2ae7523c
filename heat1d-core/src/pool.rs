use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{ConfigError, HeatResult};

/// Threads the scheduler's fork-join work runs on.
pub enum WorkerPool {
    /// The process-wide rayon pool. Falls back to the calling thread on
    /// targets that cannot spawn threads.
    Global,
    Dedicated(ThreadPool),
}

impl WorkerPool {
    /// `None` selects the global pool; `Some(n)` starts `n` dedicated workers.
    pub fn new(threads: Option<usize>) -> HeatResult<Self> {
        match threads {
            None => Ok(WorkerPool::Global),
            Some(0) => Err(ConfigError::ZeroThreads.into()),
            Some(n) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("heat1d-worker-{i}"))
                    .build()?;
                Ok(WorkerPool::Dedicated(pool))
            }
        }
    }

    /// Runs `op` so that any `rayon::join` inside it lands on this pool.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            WorkerPool::Global => op(),
            WorkerPool::Dedicated(pool) => pool.install(op),
        }
    }

    pub fn current_num_threads(&self) -> usize {
        match self {
            WorkerPool::Global => rayon::current_num_threads(),
            WorkerPool::Dedicated(pool) => pool.current_num_threads(),
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerPool::Global => f.write_str("WorkerPool::Global"),
            WorkerPool::Dedicated(pool) => f
                .debug_struct("WorkerPool::Dedicated")
                .field("threads", &pool.current_num_threads())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedicated_pool_has_requested_size() {
        let pool = WorkerPool::new(Some(3)).unwrap();
        assert_eq!(pool.current_num_threads(), 3);
        let name = pool.install(|| std::thread::current().name().map(str::to_owned));
        assert_eq!(name.as_deref().map(|n| n.starts_with("heat1d-worker-")), Some(true));
    }

    #[test]
    fn zero_threads_is_a_config_error() {
        let err = WorkerPool::new(Some(0)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn global_pool_runs_inline() {
        let pool = WorkerPool::new(None).unwrap();
        assert!(matches!(pool, WorkerPool::Global));
        assert_eq!(pool.install(|| 2 + 2), 4);
    }
}
