use collector_check::cli::Cli;
use collector_check::config::{Config, OutputFormat};
use collector_check::core::collector::{collector_checks, transport_from_upstream, CollectorRegion};
use collector_check::core::detect::{ProxyDetect, RegionDetect};
use collector_check::core::network::DebugLogger;
use collector_check::core::tasks::{Identifier, Options};
use collector_check::core::{ReportRenderer, Runner, Task};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        let path = Config::init()?;
        println!("Config: {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Command line wins over the config file
    if !cli.regions.is_empty() {
        config.regions = cli.regions.clone();
    }
    if cli.license_key.is_some() {
        config.license_key = cli.license_key.clone();
    }
    config.forced_tasks.extend(cli.tasks.iter().cloned());
    if cli.json {
        config.output = OutputFormat::Json;
    }

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    let detect: Vec<Arc<dyn Task>> = vec![
        Arc::new(ProxyDetect::new(cli.proxy.clone(), config.proxy_url.clone())),
        Arc::new(RegionDetect::new(
            config.regions.clone(),
            config.license_key.clone(),
        )),
    ];

    let mut known: Vec<(Identifier, &'static str)> = detect
        .iter()
        .map(|task| (task.identifier(), task.explain()))
        .collect();
    known.extend(CollectorRegion::ALL.iter().map(|region| {
        (
            Identifier::new("Base", "Collector", region.task_name),
            region.explain,
        )
    }));

    if cli.list {
        for (id, explain) in &known {
            println!("{:<28} {}", id.to_string(), explain);
        }
        return Ok(());
    }

    let (forced, rejected) = config.partition_forced_tasks();
    for err in &rejected {
        eprintln!("Warning: {}, ignoring it", err);
    }
    for id in &forced {
        if !known.iter().any(|(known_id, _)| known_id == id) {
            eprintln!("Warning: unknown task {} in forced task list", id);
        }
    }

    let logger = Arc::new(DebugLogger::new());
    let runner = Runner::new(Options::new().with_forced_tasks(forced))
        .with_logger(Arc::clone(&logger));

    let check_logger = Arc::clone(&logger);
    let results = runner
        .run_staged(detect, move |upstream| {
            collector_checks(transport_from_upstream(upstream), check_logger)
        })
        .await;

    let renderer = ReportRenderer::new();
    match config.output {
        OutputFormat::Text => println!("{}", renderer.render_text(&results)),
        OutputFormat::Json => println!("{}", renderer.render_json(&results)?),
    }

    Ok(())
}
