// diamondline entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file; stdout carries only the report)
// 2. Load config, copying defaults/ into config/ on first run
// 3. Load the games feed, build the stat provider, grade every game
// 4. Print the report (or JSON with --json)

use diamondline_app::{render_report, run};
use diamondline_core::config;

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("diamondline starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: profile={}, ladder={:?}, min grade {}, seed={:?}",
        config.profile, config.grading.ladder, config.grading.min_grade, config.noise_seed
    );

    // 3. Grade
    let recs = run(&config).await?;

    // 4. Report
    let as_json = std::env::args().skip(1).any(|arg| arg == "--json");
    if as_json {
        let json = serde_json::to_string_pretty(&recs).context("failed to serialize recommendations")?;
        println!("{json}");
    } else {
        print!("{}", render_report(&recs));
    }

    info!("diamondline finished");
    Ok(())
}

/// Initialize tracing to log to a file so the report owns stdout.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("diamondline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("diamondline=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
