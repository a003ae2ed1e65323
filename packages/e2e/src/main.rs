//! ORO migration CLI
//!
//! - `setup`  deploys the legacy contracts, opens both IBC paths, mints the
//!   native asset and deploys the converters
//! - `step`   re-runs a single phase from the saved record
//! - `verify` runs the post-migration scenarios
//! - `status` shows the saved record and chain health

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use oro_migration_e2e::{
    derive_ibc_denom, next_step, run_all_scenarios, run_scenario, scenario_names, ChainContext,
    CosmosClient, HarnessConfig, Migrated, MigrationOrchestrator, MigrationStep, MigrationStore,
    Progress, ScenarioContext, TestResult, TestSuite,
};

#[derive(Parser)]
#[command(name = "oro-migration-e2e")]
#[command(about = "Orchestrates and verifies the ORO token migration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the migration phases
    Setup {
        /// First phase to run; earlier outputs are read from the record
        #[arg(long, value_enum, conflicts_with = "resume")]
        from: Option<MigrationStep>,

        /// Continue after the last phase recorded as completed
        #[arg(long)]
        resume: bool,
    },

    /// Run a single phase
    Step {
        #[arg(value_enum)]
        step: MigrationStep,
    },

    /// Run verification scenarios against the migrated system
    Verify {
        /// Run only this scenario
        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// Show the migration record and chain health
    Status,

    /// Print the IBC denom of `base` received over `channel`
    Denom {
        #[arg(long)]
        channel: String,

        #[arg(long)]
        base: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = HarnessConfig::from_env()?;

    match cli.command {
        Commands::Setup { from, resume } => {
            let ctx = ChainContext::from_config(&config);
            let orchestrator = MigrationOrchestrator::from_config(ctx, &config);

            let from = if resume {
                match next_step(&orchestrator.store().load()?) {
                    Some(step) => step,
                    None => {
                        tracing::info!("Migration already complete, nothing to resume");
                        return Ok(());
                    }
                }
            } else {
                from.unwrap_or(MigrationStep::DeployLegacyContracts)
            };

            let migrated = orchestrator
                .run(from, |step, success| {
                    if success {
                        tracing::info!("  [OK] {}", step.name());
                    } else {
                        tracing::error!("  [FAIL] {}", step.name());
                    }
                })
                .await?;

            print_migrated(&migrated);
            tracing::info!("Record saved to {}", orchestrator.store().path().display());
        }

        Commands::Step { step } => {
            let ctx = ChainContext::from_config(&config);
            let orchestrator = MigrationOrchestrator::from_config(ctx, &config);

            match orchestrator.run_step(step).await? {
                Progress::Done(migrated) => print_migrated(&migrated),
                progress => {
                    if let Some(next) = progress.pending_step() {
                        tracing::info!("{} done, next: {}", step.name(), next.name());
                    }
                }
            }
        }

        Commands::Verify { scenario } => {
            let ctx = ChainContext::from_config(&config);
            let record = MigrationStore::new(config.state_path.clone()).load()?;

            let mut suite = TestSuite::new("ORO migration");
            match Migrated::try_from(&record) {
                Ok(migrated) => {
                    let scenarios = ScenarioContext::new(&ctx, &migrated, &config.artifacts);
                    match scenario {
                        Some(name) => suite.add_result(run_scenario(&scenarios, &name).await),
                        None => suite.extend(run_all_scenarios(&scenarios).await),
                    }
                }
                Err(e) => {
                    let reason = format!("migration incomplete: {}", e);
                    let names = match &scenario {
                        Some(name) => vec![name.as_str()],
                        None => scenario_names(),
                    };
                    for name in names {
                        suite.add_result(TestResult::skip(name, reason.clone()));
                    }
                }
            }

            for result in suite.results() {
                println!("{}", result);
            }
            suite.print_summary();

            if !suite.succeeded() {
                std::process::exit(1);
            }
        }

        Commands::Status => {
            println!();
            println!("Configuration:");
            println!("  Hub:      {} ({})", config.hub.chain_id, config.hub.lcd_url);
            println!("  Outpost:  {} ({})", config.outpost.chain_id, config.outpost.lcd_url);
            println!("  Record:   {}", config.state_path.display());
            println!();

            println!("Services:");
            for chain in [&config.hub, &config.outpost] {
                let client = CosmosClient::new(chain, &config.timing);
                if client.is_healthy().await.unwrap_or(false) {
                    println!("  \x1b[32m●\x1b[0m {}: healthy", chain.chain_id);
                } else {
                    println!("  \x1b[31m●\x1b[0m {}: not responding", chain.chain_id);
                }
            }
            println!();

            let record = MigrationStore::new(config.state_path.clone()).load()?;

            println!("Migration:");
            match record.last_completed {
                Some(step) => println!("  Last completed: {}", step.name()),
                None => println!("  Last completed: none"),
            }
            match next_step(&record) {
                Some(step) => println!("  Next step:      {}", step.name()),
                None => println!("  Next step:      none (complete)"),
            }
            if let Some(updated_at) = record.updated_at {
                println!("  Updated at:     {}", updated_at.to_rfc3339());
            }
            println!();

            if let Ok(migrated) = Migrated::try_from(&record) {
                print_migrated(&migrated);
            }
        }

        Commands::Denom { channel, base } => {
            println!("{}", derive_ibc_denom(&channel, &base));
        }
    }

    Ok(())
}

fn print_migrated(migrated: &Migrated) {
    println!("Contracts:");
    println!("  Legacy token:    {}", migrated.legacy.token);
    println!("  Legacy bridge:   {}", migrated.legacy.bridge);
    println!("  Hub converter:   {}", migrated.converters.a);
    println!("  Outpost converter: {}", migrated.converters.b);
    println!();
    println!("Channels:");
    println!(
        "  Legacy: {} <> {}",
        migrated.legacy_path.channel_a, migrated.legacy_path.channel_b
    );
    println!(
        "  Native: {} <> {}",
        migrated.native.channel_a, migrated.native.channel_b
    );
    println!();
    println!("Denoms:");
    println!("  Legacy on outpost: {}", migrated.legacy_path.denom_on_b);
    println!("  Native:            {}", migrated.native.denom);
    println!("  Native on hub:     {}", migrated.native.denom_on_a);
}
