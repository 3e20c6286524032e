use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travel_rental_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::{self, SeedOptions},
    state::AppState,
};

/// Populate the database with sample users, properties, bookings, reviews,
/// payments and messages.
#[derive(Debug, Parser)]
#[command(name = "seed", version)]
struct Cli {
    /// Delete existing data (superusers excepted) before seeding.
    #[arg(long)]
    clear: bool,

    /// Fix the random generator so runs are reproducible.
    #[arg(long, value_name = "SEED")]
    rng_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,travel_rental_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState::new(orm);

    let mut rng = match cli.rng_seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_entropy(),
    };

    let summary = seed::run(&state, &mut rng, SeedOptions { clear: cli.clear }).await?;

    println!("Seed completed: {summary}");
    println!(
        "Admin login: {} / {}",
        seed::fixtures::ADMIN.2,
        seed::fixtures::ADMIN_PASSWORD
    );
    Ok(())
}
