use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use expo_converter::{convert_file, extract_style_table_file, ConvertMode, ConverterConfig};

#[derive(Parser)]
#[command(name = "expo-convert")]
#[command(about = "ReactJS to ExpoJS converter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IoArgs {
    /// Path to the input ReactJS file
    #[arg(short, long)]
    input: PathBuf,
    /// Path to the output file
    #[arg(short, long)]
    output: PathBuf,
    /// JSON conversion profile overriding the Expo defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full conversion pipeline
    Convert(IoArgs),
    /// Convert only the import statements
    Imports(IoArgs),
    /// Convert only the styles table
    Styles {
        #[command(flatten)]
        io: IoArgs,
        /// Write the evaluated style table as JSON instead of source
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("expo_converter=info")),
        )
        .init();
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Cannot resolve {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => ConverterConfig::from_json_file(path)
            .with_context(|| format!("Cannot load config {}", path.display())),
        None => Ok(ConverterConfig::default()),
    }
}

fn run(io: &IoArgs, mode: ConvertMode, label: &str) -> Result<()> {
    let input = absolute(&io.input)?;
    let output = absolute(&io.output)?;
    if !input.exists() {
        bail!("Input file does not exist: {}", input.display());
    }
    let config = load_config(io.config.as_deref())?;

    convert_file(&input, &output, mode, &config)?;
    println!("{} Output written to {}", label, output.display());
    Ok(())
}

fn run_style_table(io: &IoArgs) -> Result<()> {
    let input = absolute(&io.input)?;
    let output = absolute(&io.output)?;
    if !input.exists() {
        bail!("Input file does not exist: {}", input.display());
    }
    let config = load_config(io.config.as_deref())?;

    let table = extract_style_table_file(&input, &config)?;
    let json = serde_json::to_string_pretty(&table)?;
    std::fs::write(&output, json)
        .with_context(|| format!("Cannot write {}", output.display()))?;
    println!("Styles conversion complete! Output written to {}", output.display());
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Convert(io) => run(io, ConvertMode::Full, "Conversion complete!"),
        Commands::Imports(io) => run(io, ConvertMode::Imports, "Imports conversion complete!"),
        Commands::Styles { io, json: false } => {
            run(io, ConvertMode::Styles, "Styles conversion complete!")
        }
        Commands::Styles { io, json: true } => run_style_table(io),
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
