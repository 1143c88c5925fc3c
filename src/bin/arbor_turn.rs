use clap::{Parser, Subcommand};
use std::path::PathBuf;

use arbor_turn_engine::api::services::engine_service::{preview_move, MovePreviewRequest};
use arbor_turn_engine::config::{EngineConfig, PersonaCatalog, PersonaVariant};
use arbor_turn_engine::modules::cues::analyze;
use arbor_turn_engine::modules::moves::MemoryHints;
use arbor_turn_engine::modules::prompt::compose;
use arbor_turn_engine::utils::init_tracing;

#[derive(Parser)]
#[command(name = "arbor-turn", version, about = "Inspect cue analysis, move selection and prompt composition")]
struct Cli {
    /// Engine config file (defaults to ./arbor_config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a message for coming-up / going-down cues
    Analyze { text: String },

    /// Pick the next move for a message
    NextMove {
        text: String,
        #[arg(long)]
        persona: Option<String>,
        #[arg(long)]
        address_as: Option<String>,
        #[arg(long)]
        redirect_hook: Option<String>,
    },

    /// Render the system prompt for a persona
    SystemPrompt {
        #[arg(long)]
        persona: Option<String>,
        /// Remembered fact, repeatable, e.g. --fact "redirect:escape=painting"
        #[arg(long = "fact")]
        facts: Vec<String>,
    },
}

fn persona_key(explicit: Option<String>, config: &EngineConfig) -> String {
    explicit
        .filter(|key| PersonaVariant::parse(key).is_some())
        .unwrap_or_else(|| config.persona.default_variant.as_str().to_string())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze { text } => {
            println!("{}", serde_json::to_string_pretty(&analyze(&text))?);
        }
        Command::NextMove {
            text,
            persona,
            address_as,
            redirect_hook,
        } => {
            let request = MovePreviewRequest {
                persona: Some(persona_key(persona, &config)),
                text,
                memory: MemoryHints {
                    address_as,
                    redirect_hook,
                    humor_hook: None,
                },
            };
            println!("{}", serde_json::to_string_pretty(&preview_move(&request))?);
        }
        Command::SystemPrompt { persona, facts } => {
            let persona = PersonaCatalog::lookup(Some(&persona_key(persona, &config)));
            println!("{}", compose(persona, &facts));
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let directive = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = init_tracing(directive) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "arbor-turn failed");
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
