use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cvpress::{loader, CvGenerator, GeneratorConfig};
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cvpress")]
#[command(about = "Generate PDF CVs from profile records")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a profile (JSON, TOML or YAML) to PDF
    Generate {
        input: PathBuf,
        /// Exact output file; overrides --output-dir
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the Typst markup for a profile
    Markup { input: PathBuf },
    /// Print the assembled layout blocks as JSON
    Blocks { input: PathBuf },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<GeneratorConfig> {
    let config = match path {
        Some(path) => GeneratorConfig::load_from_file(path),
        None => GeneratorConfig::load(),
    };
    config.context("Failed to load configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Generate {
            input,
            output,
            output_dir,
        } => {
            let record = loader::from_path(&input)
                .with_context(|| format!("Failed to load profile: {}", input.display()))?;

            let config = match output_dir {
                Some(dir) => config.with_output_dir(dir),
                None => config,
            };
            let generator = CvGenerator::with_typst(config);

            let path = match output {
                Some(path) => generator.generate_to(&record, &path)?,
                None => generator.generate(&record)?,
            };
            info!("CV written to {}", path.display());
            println!("{}", path.display());
        }
        Command::Markup { input } => {
            let record = loader::from_path(&input)
                .with_context(|| format!("Failed to load profile: {}", input.display()))?;
            print!("{}", CvGenerator::with_typst(config).render_markup(&record));
        }
        Command::Blocks { input } => {
            let record = loader::from_path(&input)
                .with_context(|| format!("Failed to load profile: {}", input.display()))?;
            let blocks = cvpress::assemble(&record);
            println!(
                "{}",
                serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks")?
            );
        }
    }

    Ok(())
}
