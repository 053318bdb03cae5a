use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tweetsense-demo")]
#[command(
    author,
    version,
    about = "Interactive climate-sentiment tweet classifier demo"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the demo server with web UI
    Start {
        /// Application config path
        #[arg(short, long, env = "TWEETSENSE_CONFIG", default_value = "./resources/app.yaml")]
        config: PathBuf,

        /// Listen port (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address (overrides the config file)
        #[arg(short, long)]
        address: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify one piece of text and print each model's answer
    Predict {
        /// Text to classify
        #[arg(short, long)]
        text: String,

        /// Only run this model id
        #[arg(short, long)]
        model: Option<String>,

        /// Application config path
        #[arg(short, long, env = "TWEETSENSE_CONFIG", default_value = "./resources/app.yaml")]
        config: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load every artifact and report what was found
    Check {
        /// Application config path
        #[arg(short, long, env = "TWEETSENSE_CONFIG", default_value = "./resources/app.yaml")]
        config: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
