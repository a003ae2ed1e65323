//! Orchestration and verification harness for migrating a CW20 token to a
//! token-factory asset across two IBC-connected Cosmos chains
//!
//! The [`orchestrator`] deploys the legacy token and bridge, opens the IBC
//! paths, mints the native asset and deploys the converters, persisting its
//! outputs to a [`record::MigrationStore`] after every phase. The
//! [`scenarios`] then exercise the migrated system end to end.

use std::fmt;
use std::time::{Duration, Instant};

pub mod chain;
pub mod channel;
pub mod config;
pub mod cosmos;
pub mod denom;
pub mod error;
pub mod orchestrator;
pub mod record;
pub mod relayer;
pub mod scenarios;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::{ChainClient, ChainContext, Coin};
pub use channel::{select_canonical_channel, Channel};
pub use config::HarnessConfig;
pub use cosmos::CosmosClient;
pub use denom::{cw20_denom, derive_ibc_denom, factory_denom};
pub use error::MigrationError;
pub use orchestrator::{next_step, Migrated, MigrationOrchestrator, MigrationStep, Progress};
pub use record::{MigrationRecord, MigrationStore};
pub use relayer::{HermesRelayer, Relayer};
pub use scenarios::{run_all_scenarios, run_scenario, scenario_names, ScenarioContext};

/// Outcome of a single verification scenario
#[derive(Debug, Clone)]
pub enum TestResult {
    Pass {
        name: String,
        duration: Duration,
    },
    Fail {
        name: String,
        error: String,
        duration: Duration,
    },
    Skip {
        name: String,
        reason: String,
    },
}

impl TestResult {
    pub fn pass(name: impl Into<String>, duration: Duration) -> Self {
        Self::Pass {
            name: name.into(),
            duration,
        }
    }

    pub fn fail(name: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self::Fail {
            name: name.into(),
            error: error.into(),
            duration,
        }
    }

    pub fn skip(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Skip {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Pass { name, .. } | Self::Fail { name, .. } | Self::Skip { name, .. } => name,
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass { name, duration } => {
                write!(f, "\x1b[32mPASS\x1b[0m: {} ({}ms)", name, duration.as_millis())
            }
            Self::Fail {
                name,
                error,
                duration,
            } => {
                write!(
                    f,
                    "\x1b[31mFAIL\x1b[0m: {} - {}\n    ({}ms)",
                    name,
                    error,
                    duration.as_millis()
                )
            }
            Self::Skip { name, reason } => {
                write!(f, "\x1b[33mSKIP\x1b[0m: {} - {}", name, reason)
            }
        }
    }
}

/// Collected scenario outcomes with a printable summary
#[derive(Debug, Clone)]
pub struct TestSuite {
    name: String,
    results: Vec<TestResult>,
    start_time: Instant,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn add_result(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = TestResult>) {
        self.results.extend(results);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_fail()).count()
    }

    pub fn skipped(&self) -> usize {
        self.total() - self.passed() - self.failed()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True when nothing failed; skipped scenarios do not count against the suite
    pub fn succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn print_summary(&self) {
        let failed = self.failed();

        println!();
        println!("Test Suite: {}", self.name);
        println!("----------------------------------------");
        println!("Total:   {}", self.total());
        println!("Passed:  \x1b[32m{}\x1b[0m", self.passed());
        println!("Failed:  \x1b[31m{}\x1b[0m", failed);
        println!("Skipped: \x1b[33m{}\x1b[0m", self.skipped());
        println!("Elapsed: {}ms", self.elapsed().as_millis());
        println!("----------------------------------------");

        if failed > 0 {
            println!("\nFailed scenarios:");
            for result in self.results.iter().filter(|r| r.is_fail()) {
                println!("  {}", result);
            }
        }
    }
}

impl fmt::Display for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TestSuite({} - {} passed, {} failed, {} skipped)",
            self.name,
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}
