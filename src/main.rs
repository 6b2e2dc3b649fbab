//! Command-line demo: seeds random volunteers and services, triggers one
//! optimization, and prints the published assignment.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use volunteer_assign::{
    assignment::{AssignmentResult, AssignmentSolver},
    ga::GaConfig,
    orchestrator::{AssignmentBroadcaster, AssignmentOrchestrator},
    random::rng_for,
    store::{seed_services, seed_volunteers, InMemoryServiceStore, InMemoryVolunteerStore},
};

/// Assigns randomly generated volunteers to services with a genetic search
#[derive(Parser)]
#[command(name = "volunteer-assign")]
#[command(about = "Assigns volunteers to services by preference and capacity")]
pub struct Args {
    /// Number of demo volunteers to generate
    #[arg(long, default_value = "30")]
    pub volunteers: usize,

    /// Number of demo services to generate
    #[arg(long, default_value = "10")]
    pub services: usize,

    /// Seed for both the demo data and the search (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of generations to evolve
    #[arg(long, default_value = "200")]
    pub generations: usize,

    /// Population size
    #[arg(long, default_value = "100")]
    pub population: usize,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("volunteer_assign={}", args.log_level)));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let (result, service_store) = run_demo(&args).await?;

    println!("{}", result.message);
    for assignment in &result.assignments {
        let service_name = service_store
            .find(&assignment.service_id)
            .map(|s| s.name)
            .unwrap_or_else(|| assignment.service_id.clone());
        let rank = match assignment.preference_rank {
            0 => "unranked".to_string(),
            r => format!("choice #{r}"),
        };
        println!(
            "  {:<14} -> {:<12} {:<10} cost {}",
            assignment.volunteer_id, service_name, rank, assignment.cost
        );
    }
    println!("Total cost: {}", result.total_cost);

    Ok(())
}

/// Seeds demo stores, triggers one optimization, and waits for the
/// published result.
async fn run_demo(
    args: &Args,
) -> Result<(AssignmentResult, Arc<InMemoryServiceStore>), Box<dyn Error>> {
    let mut rng = rng_for(args.seed);
    let services = seed_services(args.services, &mut rng);
    let service_ids: Vec<String> = services.iter().map(|s| s.id.clone()).collect();
    let volunteers = seed_volunteers(args.volunteers, &service_ids, &mut rng);
    info!(
        volunteers = volunteers.len(),
        services = services.len(),
        "demo data seeded"
    );

    let service_store = Arc::new(InMemoryServiceStore::from_services(services));
    let volunteer_store = Arc::new(InMemoryVolunteerStore::from_volunteers(volunteers));

    let mut config = GaConfig::default()
        .with_population_size(args.population)
        .with_max_generations(args.generations);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let broadcaster = Arc::new(AssignmentBroadcaster::default());
    let mut results = broadcaster.subscribe();

    let orchestrator = AssignmentOrchestrator::new(
        volunteer_store,
        service_store.clone(),
        Arc::new(AssignmentSolver::new(config)),
        broadcaster,
    );
    orchestrator.trigger();

    let result = results.recv().await?;
    Ok((result, service_store))
}
