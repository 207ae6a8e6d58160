use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prdkit::DevelopmentMode;
use prdkit::cli::commands;
use prdkit::cli::{CommandContext, LlmOverrides};

fn parse_mode(s: &str) -> Result<DevelopmentMode, String> {
    s.parse::<DevelopmentMode>().map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "prdkit")]
#[command(
    version,
    about = "Conversational PRD assistant: collect requirements, draft PRDs, scope versions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "LLM provider (openai, ollama)")]
    provider: Option<String>,

    #[arg(long, global = true, help = "Model to use")]
    model: Option<String>,

    #[arg(long, global = true, help = "API base URL override")]
    api_base: Option<String>,

    #[arg(
        long,
        global = true,
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        help = "OpenAI API key"
    )]
    api_key: Option<String>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect requirements in an interactive conversation
    Chat {
        #[arg(long, help = "Save the transcript to this JSON file")]
        save: Option<PathBuf>,
        #[arg(long, help = "Resume a saved transcript")]
        resume: Option<PathBuf>,
    },

    /// Extract structured requirements from a transcript
    Extract {
        #[arg(long, help = "Transcript JSON file")]
        transcript: PathBuf,
        #[arg(long, short, help = "Requirements JSON output file")]
        output: Option<PathBuf>,
    },

    /// Draft a PRD from a requirements file
    Generate {
        #[arg(long, help = "Requirements JSON file")]
        requirements: PathBuf,
        #[arg(long, value_parser = parse_mode, help = "Development mode: sprint, tdd, bdd, ddd")]
        mode: Option<DevelopmentMode>,
        #[arg(long, short, help = "PRD output file")]
        output: Option<PathBuf>,
    },

    /// Recommend a development mode for a requirements file
    SuggestMode {
        #[arg(long, help = "Requirements JSON file")]
        requirements: PathBuf,
    },

    /// Expand a PRD into MVP, standard and ideal versions
    Versions {
        #[arg(long, help = "PRD Markdown file")]
        prd: PathBuf,
        #[arg(long, help = "Directory for mvp.md, standard.md, ideal.md, comparison.md")]
        output_dir: Option<PathBuf>,
    },

    /// Split a saved multi-version reply into its parts (offline)
    Segment {
        #[arg(long, help = "Multi-version Markdown file")]
        input: PathBuf,
        #[arg(long, help = "Directory for the split files")]
        output_dir: Option<PathBuf>,
    },

    /// Review a PRD for completeness
    Review {
        #[arg(long, help = "PRD Markdown file")]
        prd: PathBuf,
        #[arg(long, help = "Revise the PRD from the review")]
        apply: bool,
        #[arg(long, short, help = "Revised PRD output file")]
        output: Option<PathBuf>,
    },

    /// Run the AI-friendliness upgrade checklist
    Checklist {
        #[arg(long, help = "PRD Markdown file")]
        prd: PathBuf,
        #[arg(long, help = "Upgrade the PRD from failed items")]
        apply: bool,
        #[arg(long, short, help = "Upgraded PRD output file")]
        output: Option<PathBuf>,
    },

    /// Combine requirements, PRD and versions into one document
    Export {
        #[arg(long, help = "Requirements JSON file")]
        requirements: PathBuf,
        #[arg(long, help = "Initial PRD Markdown file")]
        prd: PathBuf,
        #[arg(long, help = "Directory written by `versions`")]
        versions_dir: PathBuf,
        #[arg(long, short, help = "Combined Markdown output file")]
        output: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Print as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
    /// Check that the configured provider is reachable
    Check,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mprdkit encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace with RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = LlmOverrides {
        provider: cli.provider,
        model: cli.model,
        api_base: cli.api_base,
        api_key: cli.api_key,
    };
    let quiet = cli.quiet;
    let context = || CommandContext::load(&overrides, quiet);

    match cli.command {
        Commands::Chat { save, resume } => {
            let ctx = context()?;
            Runtime::new()?.block_on(commands::chat::run(ctx, save, resume))?;
        }
        Commands::Extract { transcript, output } => {
            let ctx = context()?;
            Runtime::new()?.block_on(commands::extract::run(ctx, transcript, output))?;
        }
        Commands::Generate {
            requirements,
            mode,
            output,
        } => {
            let ctx = context()?;
            Runtime::new()?.block_on(commands::generate::run(ctx, requirements, mode, output))?;
        }
        Commands::SuggestMode { requirements } => {
            commands::suggest_mode::run(&requirements, quiet)?;
        }
        Commands::Versions { prd, output_dir } => {
            let ctx = context()?;
            Runtime::new()?.block_on(commands::versions::run(ctx, prd, output_dir))?;
        }
        Commands::Segment { input, output_dir } => {
            commands::segment::run(&input, output_dir, quiet)?;
        }
        Commands::Review { prd, apply, output } => {
            let ctx = context()?;
            Runtime::new()?.block_on(commands::review::review(ctx, prd, apply, output))?;
        }
        Commands::Checklist { prd, apply, output } => {
            let ctx = context()?;
            Runtime::new()?.block_on(commands::review::checklist(ctx, prd, apply, output))?;
        }
        Commands::Export {
            requirements,
            prd,
            versions_dir,
            output,
        } => {
            commands::export::run(&requirements, &prd, &versions_dir, &output, quiet)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::config::show(json)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => commands::config::init(global, force, quiet)?,
            ConfigAction::Check => {
                let ctx = context()?;
                Runtime::new()?.block_on(commands::config::check(ctx))?;
            }
        },
    }

    Ok(())
}
