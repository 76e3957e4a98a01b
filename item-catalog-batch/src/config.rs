use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// What `process_all` returns when some items failed.
#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Fail the whole call, reporting every failed id. Successes are still
    /// persisted but not returned.
    #[default]
    RejectBatch,
    /// Return only the processed items; failures are logged and dropped.
    DropFailures,
}

/// Runtime configuration for the `item-batch` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "item-batch",
    version,
    about = "Marks every catalog item as PROCESSED using a bounded worker pool"
)]
pub struct CliArgs {
    /// Postgres connection string.
    ///
    /// Environment variable: `DATABASE_URL`
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum connections in the database pool.
    ///
    /// Environment variable: `MAX_DB_CONNECTIONS`
    #[arg(long, env = "MAX_DB_CONNECTIONS", default_value_t = 5)]
    pub max_db_connections: u32,

    /// Number of worker tasks, i.e. the maximum number of items processed at
    /// the same time across all batches.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS", default_value_t = 10)]
    pub num_workers: usize,

    /// Capacity of the queue in front of the workers.
    ///
    /// Environment variable: `QUEUE_CAPACITY`
    #[arg(long, env = "QUEUE_CAPACITY", default_value_t = 1024)]
    pub queue_capacity: usize,

    /// Simulated transformation latency per item, in milliseconds.
    ///
    /// Environment variable: `PROCESS_DELAY_MS`
    #[arg(long, env = "PROCESS_DELAY_MS", default_value_t = 1_000)]
    pub process_delay_ms: u64,

    /// Deadline for one item's load, transform and persist, in milliseconds.
    ///
    /// Environment variable: `TASK_TIMEOUT_MS`
    #[arg(long, env = "TASK_TIMEOUT_MS", default_value_t = 30_000)]
    pub task_timeout_ms: u64,

    /// Behavior when some items fail.
    ///
    /// Environment variable: `FAILURE_POLICY`
    #[arg(long, env = "FAILURE_POLICY", value_enum, default_value_t = FailurePolicy::RejectBatch)]
    pub failure_policy: FailurePolicy,

    /// Seconds to wait for each worker to acknowledge shutdown.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT_SECS`
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 3)]
    pub shutdown_timeout_secs: u64,

    /// Insert this many demo items before processing.
    #[arg(long, default_value_t = 0)]
    pub seed: usize,

    /// Emit logs as JSON lines.
    ///
    /// Environment variable: `LOG_JSON`
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

/// Settings for the worker pool and the batch coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub num_workers: usize,
    pub queue_capacity: usize,
    pub process_delay: Duration,
    pub task_timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub shutdown_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_workers: 10,
            queue_capacity: 1024,
            process_delay: Duration::from_millis(1_000),
            task_timeout: Duration::from_millis(30_000),
            failure_policy: FailurePolicy::RejectBatch,
            shutdown_timeout: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_db_connections: u32,
    pub seed: usize,
    pub log_json: bool,
    pub batch: BatchConfig,
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.num_workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        if args.queue_capacity == 0 {
            bail!("QUEUE_CAPACITY must be greater than 0");
        }

        if args.max_db_connections == 0 {
            bail!("MAX_DB_CONNECTIONS must be greater than 0");
        }

        if args.task_timeout_ms <= args.process_delay_ms {
            bail!(
                "TASK_TIMEOUT_MS ({}) must exceed PROCESS_DELAY_MS ({})",
                args.task_timeout_ms,
                args.process_delay_ms
            );
        }

        Ok(Self {
            database_url: args.database_url,
            max_db_connections: args.max_db_connections,
            seed: args.seed,
            log_json: args.log_json,
            batch: BatchConfig {
                num_workers: args.num_workers,
                queue_capacity: args.queue_capacity,
                process_delay: Duration::from_millis(args.process_delay_ms),
                task_timeout: Duration::from_millis(args.task_timeout_ms),
                failure_policy: args.failure_policy,
                shutdown_timeout: Duration::from_secs(args.shutdown_timeout_secs),
            },
        })
    }
}
