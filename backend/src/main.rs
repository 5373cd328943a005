//! API Taste CLI - validate mock API descriptions and generate YAML
//!
//! # Commands
//!
//! ```bash
//! apitaste serve                          # Start HTTP server (port 5000)
//! apitaste validate service.json          # List validation errors
//! apitaste generate service.json          # Write {service_name}.yaml
//! apitaste generate service.json -o -     # Print YAML to stdout
//! ```

use apitaste::{
    files::{read_description, report_errors, write_generated, OutputTarget},
    generate, validate, GenerateError, ServerConfig,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "apitaste", version)]
#[command(about = "Validate mock API descriptions and generate api_taste YAML", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Interface to bind
        #[arg(long, env = "APITASTE_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "APITASTE_PORT", default_value_t = apitaste::config::DEFAULT_PORT)]
        port: u16,

        /// Largest accepted request body in bytes
        #[arg(long, env = "APITASTE_MAX_BODY_BYTES", default_value_t = apitaste::config::DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,

        /// CORS origin to allow (any origin if not specified)
        #[arg(long, env = "APITASTE_ALLOWED_ORIGIN")]
        allowed_origin: Option<String>,
    },

    /// Validate a JSON service description
    Validate {
        /// Input JSON file
        input: PathBuf,
    },

    /// Validate and generate the YAML configuration
    Generate {
        /// Input JSON file
        input: PathBuf,

        /// Output file, `-` for stdout (default: {service_name}.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            max_body_bytes,
            allowed_origin,
        } => {
            cmd_serve(ServerConfig {
                host,
                port,
                max_body_bytes,
                allowed_origin,
            })
            .await
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Generate { input, output } => cmd_generate(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    apitaste::server::start_server(config).await?;
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let description = read_description(input)?;
    let errors = validate(&description);

    if errors.is_empty() {
        eprintln!("✅ Description is valid");
        return Ok(());
    }

    report_errors(&mut std::io::stderr().lock(), &errors)?;
    std::process::exit(1);
}

fn cmd_generate(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Generating from: {}", input.display());

    let description = read_description(input)?;
    let generated = match generate(&description) {
        Ok(generated) => generated,
        Err(GenerateError::Invalid(errors)) => {
            report_errors(&mut std::io::stderr().lock(), &errors)?;
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let target = OutputTarget::resolve(output, Path::new("."), &generated);
    if let Some(path) = write_generated(&generated, &target)? {
        eprintln!("💾 Output written to: {}", path.display());
    }

    Ok(())
}
