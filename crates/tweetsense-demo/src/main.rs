use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tweetsense_demo::cli::{Cli, Commands};
use tweetsense_demo::config::AppConfig;
use tweetsense_demo::context::AppContext;
use tweetsense_demo::server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            config,
            port,
            address,
            verbose,
        } => {
            init_logging(verbose);

            let app_config = AppConfig::from_file(&config)?.with_overrides(address, port);
            let addr: SocketAddr = app_config.server.socket_addr()?;

            // Artifacts load before anything is served
            let context = match AppContext::load(app_config) {
                Ok(context) => Arc::new(context),
                Err(e) => {
                    tracing::error!("Failed to load artifacts: {}", e);
                    return Err(e.into());
                }
            };

            println!();
            println!("  ╔═══════════════════════════════════════════════════════════╗");
            println!("  ║                                                           ║");
            println!("  ║   ████████╗██╗    ██╗███████╗███████╗████████╗            ║");
            println!("  ║   ╚══██╔══╝██║    ██║██╔════╝██╔════╝╚══██╔══╝            ║");
            println!("  ║      ██║   ██║ █╗ ██║█████╗  █████╗     ██║               ║");
            println!("  ║      ██║   ██║███╗██║██╔══╝  ██╔══╝     ██║               ║");
            println!("  ║      ██║   ╚███╔███╔╝███████╗███████╗   ██║               ║");
            println!("  ║      ╚═╝    ╚══╝╚══╝ ╚══════╝╚══════╝   ╚═╝               ║");
            println!("  ║                                                           ║");
            println!("  ║            Climate Sentiment Tweet Classifier             ║");
            println!("  ╚═══════════════════════════════════════════════════════════╝");
            println!();
            println!("  Config:   {}", config.display());
            println!("  Models:   {}", model_titles(&context));
            println!("  Examples: {}", context.dataset.len());
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(context, addr).await?;
        }

        Commands::Predict {
            text,
            model,
            config,
            verbose,
        } => {
            init_logging(verbose);

            let context = load_context(&config)?;
            let run = context.pipeline.predict_selected(
                &text,
                &context.config.placeholder,
                model.as_deref(),
            )?;

            if let Some(warning) = run.warning {
                eprintln!("warning: {}", warning.message());
            }

            for outcome in run.outcomes {
                match outcome.result {
                    Ok(prediction) => println!(
                        "{:<20} {:<16} {}",
                        outcome.title,
                        prediction.result.label.to_string(),
                        prediction.result.display_text
                    ),
                    Err(e) => println!("{:<20} error: {}", outcome.title, e),
                }
            }
        }

        Commands::Check { config, verbose } => {
            init_logging(verbose);

            let context = load_context(&config)?;
            let registry = context.registry();

            println!("Configuration OK: {}", config.display());
            println!("  Vectorizer features: {}", registry.dimension());
            println!("  Dataset examples:    {}", context.dataset.len());
            for (label, count) in context.dataset.label_counts() {
                println!("    {:<16} {}", label.to_string(), count);
            }
            println!("  Models:");
            for model in registry.models() {
                println!(
                    "    {:<8} {:<20} {} ({} classes)",
                    model.spec.id,
                    model.spec.title,
                    model.classifier.kind().display_name(),
                    model.classifier.classes().len()
                );
            }
        }
    }

    Ok(())
}

fn load_context(config: &Path) -> anyhow::Result<AppContext> {
    let app_config = AppConfig::from_file(config)?;
    Ok(AppContext::load(app_config)?)
}

fn model_titles(context: &AppContext) -> String {
    context
        .registry()
        .models()
        .iter()
        .map(|model| model.spec.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "tweetsense_demo=debug,tweetsense_classifiers=debug,tower_http=debug"
    } else {
        "tweetsense_demo=info,tweetsense_classifiers=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
