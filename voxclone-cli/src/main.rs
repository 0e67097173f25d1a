use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voxclone_core::voice::{ClonedVoice, VoiceId};
use voxclone_core::SettingsManager;

mod commands;
mod interactive_app;
mod output;
mod session;
mod state;

use crate::interactive_app::InteractiveApp;
use crate::output::{print_reply, spinner};
use crate::session::{Reply, Session};

#[derive(Parser, Debug)]
#[command(name = "voxclone")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "VoxClone - clone a voice and synthesize speech with Play.ht")]
struct Args {
    /// Load settings from a specific file instead of ~/.voxclone/settings.toml
    #[arg(long, value_name = "PATH", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clone a voice from an audio sample
    Clone {
        /// Audio sample (mp3, wav, ogg, m4a or flac)
        #[arg(long)]
        sample: PathBuf,

        /// Display name for the new voice
        #[arg(long)]
        name: String,
    },

    /// List cloned voices
    Voices,

    /// Synthesize text with a cloned voice
    #[command(group(ArgGroup::new("input").required(true).args(["text", "text_file"])))]
    Say {
        /// Voice identifier as shown by `voices`
        #[arg(long)]
        voice: String,

        /// Text to speak (max 2000 characters)
        #[arg(long)]
        text: Option<String>,

        /// Read the text to speak from a file
        #[arg(long, value_name = "PATH")]
        text_file: Option<PathBuf>,
    },

    /// List generated audio files
    Artifacts,

    /// Play a generated audio file (newest when omitted)
    Play {
        /// Position in `artifacts` or a file name
        selector: Option<String>,
    },

    /// Show the active configuration with the API key masked
    Config,
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(settings = ?args.settings, command = ?args.command, "CLI startup");

    let settings_manager = match args.settings {
        Some(path) => SettingsManager::from_path(path)?,
        None => SettingsManager::new()?,
    };
    let mut session = Session::from_settings(settings_manager.effective_settings())?;

    let Some(command) = args.command else {
        let mut app = InteractiveApp::new(session);
        return app.run().await;
    };

    let reply = match command {
        Command::Clone { sample, name } => {
            let progress = spinner("Cloning voice...");
            let reply = session.clone_voice(&sample, &name).await;
            progress.finish_and_clear();
            reply
        }
        Command::Voices => session.refresh_voices().await,
        Command::Say {
            voice,
            text,
            text_file,
        } => {
            let text = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read text from {path:?}"))?,
                (None, None) => anyhow::bail!("--text or --text-file is required"),
            };
            session.state.selected_voice = Some(ClonedVoice {
                id: VoiceId::new(&voice),
                name: voice,
            });

            let progress = spinner("Generating audio...");
            let reply = session.say(&text).await;
            progress.finish_and_clear();
            reply
        }
        Command::Artifacts => session.artifacts().await,
        Command::Play { selector } => session.play(selector.as_deref()).await,
        Command::Config => {
            print_reply(&Reply::Info(format!(
                "Settings:   {}",
                settings_manager.path().display()
            )));
            session.config()
        }
    };

    match reply {
        Reply::Error(msg) => Err(anyhow::anyhow!(msg)),
        reply => {
            print_reply(&reply);
            Ok(())
        }
    }
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    // Create trace directory in user's home
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    let trace_dir = PathBuf::from(home).join(".voxclone").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("voxclone.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
