pub mod compile_time {
    pub mod evaluation {
        /// Upper bound on worker threads used for cell evaluation
        /// RESOURCE: Cells are cheap, more threads only add scheduling cost
        pub const MAX_WORKER_THREADS: usize = 8;

        /// Fallback thread count when parallelism cannot be detected
        pub const DEFAULT_WORKER_THREADS: usize = 4;

        /// Below this many cells the batch is evaluated sequentially
        /// PERFORMANCE: Thread spawn cost dominates small matrices
        pub const PARALLEL_CELL_THRESHOLD: usize = 64;

        /// Chunk bounds for splitting cells across workers
        pub const MIN_CHUNK_SIZE: usize = 1;
        pub const MAX_CHUNK_SIZE: usize = 4096;
    }

    pub mod policies {
        /// Coverage policy: minimum share of available dependencies, in
        /// percent, for "Limited Availability"
        pub const COVERAGE_LIMITED_THRESHOLD_PERCENT: u32 = 70;

        /// Policy used when the caller does not select one
        pub const DEFAULT_POLICY_ID: &str = "escalation";
    }

    pub mod identifiers {
        /// Maximum identifier length accepted from providers
        /// SECURITY: Bounds memory for keys loaded from untrusted files
        pub const MAX_IDENTIFIER_LENGTH: usize = 128;
    }

    pub mod logging {
        /// Maximum number of context entries attached to one event
        pub const MAX_CONTEXT_ENTRIES: usize = 32;
    }
}
