//! Cueline CLI: command-line interface for narrated storyboard timelines.
//!
//! Usage:
//!   cueline parse <TEXT>             Strip cue tokens and show marker times
//!   cueline estimate <TEXT>          Estimate narration duration
//!   cueline init <TIMELINE>          Build a timeline from clip stubs
//!   cueline info <TIMELINE>          Show timeline information
//!   cueline validate <TIMELINE>      Check timeline consistency
//!   cueline resolve <TIMELINE> <T>   Locate a playhead time
//!   cueline edit <TIMELINE> <OP>     Apply an edit operation
//!   cueline voiceover <TIMELINE>     Attach placeholder voiceovers
//!   cueline probe <PAYLOAD>          Measure a base64 PCM16 payload
//!   cueline subtitles <TIMELINE>     Export SRT/VTT subtitles
//!   cueline play <TIMELINE>          Simulate real-time playback

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cueline_common::config::AppConfig;
use cueline_sync_core::edit::{Direction, EditOp};

mod commands;

#[derive(Parser)]
#[command(
    name = "cueline",
    about = "Narration-synchronized timelines: cue alignment, editing, and playback",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/cueline/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip cue tokens from narration and show aligned markers
    Parse {
        /// Narration text, e.g. "Hello [M] world"
        text: String,

        /// Align against this duration instead of the estimate
        #[arg(long)]
        duration: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Estimate how long narration takes to speak
    Estimate {
        /// Narration text
        text: String,
    },

    /// Create a timeline from generation-provider clip stubs
    Init {
        /// Timeline file to create
        timeline: PathBuf,

        /// JSON array of clip stubs
        #[arg(long)]
        stubs: PathBuf,

        /// Overwrite an existing timeline
        #[arg(long)]
        force: bool,
    },

    /// Show timeline information
    Info {
        /// Timeline file
        timeline: PathBuf,
    },

    /// Check timeline consistency
    Validate {
        /// Timeline file
        timeline: PathBuf,
    },

    /// Show which clip and animation step a playhead time lands on
    Resolve {
        /// Timeline file
        timeline: PathBuf,

        /// Global playhead in seconds
        seconds: f64,
    },

    /// Apply an edit operation and save the timeline
    Edit {
        /// Timeline file
        timeline: PathBuf,

        /// Write the result here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(subcommand)]
        op: EditCommand,
    },

    /// Attach silent placeholder voiceovers timed at the configured speaking rate
    Voiceover {
        /// Timeline file
        timeline: PathBuf,
    },

    /// Measure a base64 PCM16 payload without decoding it
    Probe {
        /// File containing the base64 payload
        payload: PathBuf,

        /// Sample rate of the payload
        #[arg(long)]
        sample_rate: Option<u32>,
    },

    /// Export subtitles (format chosen by extension: .srt or .vtt)
    Subtitles {
        /// Timeline file
        timeline: PathBuf,

        /// Output file; prints SRT to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play the timeline in real time with a silent audio engine
    Play {
        /// Timeline file
        timeline: PathBuf,

        /// Start position in seconds
        #[arg(long, default_value = "0")]
        from: f64,
    },
}

#[derive(Subcommand)]
enum EditCommand {
    /// Lengthen or shorten a clip
    Trim {
        clip_id: u64,

        /// Seconds to add (negative to shorten)
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },

    /// Split a clip in two at a local offset
    Split { clip_id: u64, offset: f64 },

    /// Swap a clip with its neighbour
    Move {
        clip_id: u64,

        #[arg(value_enum)]
        direction: MoveDirection,
    },

    /// Copy a clip and insert it after the original
    Duplicate { clip_id: u64 },

    /// Remove a clip
    Delete { clip_id: u64 },

    /// Append an empty clip
    Add,

    /// Replace a clip's narration
    Narrate { clip_id: u64, text: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum MoveDirection {
    Earlier,
    Later,
}

impl From<EditCommand> for EditOp {
    fn from(cmd: EditCommand) -> Self {
        use cueline_project_model::ClipId;

        match cmd {
            EditCommand::Trim { clip_id, delta } => EditOp::Trim {
                clip_id: ClipId(clip_id),
                delta_secs: delta,
                index_hint: None,
            },
            EditCommand::Split { clip_id, offset } => EditOp::Split {
                clip_id: ClipId(clip_id),
                offset_secs: offset,
            },
            EditCommand::Move { clip_id, direction } => EditOp::Move {
                clip_id: ClipId(clip_id),
                direction: match direction {
                    MoveDirection::Earlier => Direction::Earlier,
                    MoveDirection::Later => Direction::Later,
                },
            },
            EditCommand::Duplicate { clip_id } => EditOp::Duplicate {
                clip_id: ClipId(clip_id),
            },
            EditCommand::Delete { clip_id } => EditOp::Delete {
                clip_id: ClipId(clip_id),
            },
            EditCommand::Add => EditOp::Add,
            EditCommand::Narrate { clip_id, text } => EditOp::SetNarration {
                clip_id: ClipId(clip_id),
                text,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    cueline_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Parse {
            text,
            duration,
            json,
        } => commands::parse::run(text, duration, json, &config),
        Commands::Estimate { text } => commands::estimate::run(text, &config),
        Commands::Init {
            timeline,
            stubs,
            force,
        } => commands::init::run(timeline, stubs, force, &config),
        Commands::Info { timeline } => commands::info::run(timeline),
        Commands::Validate { timeline } => commands::validate::run(timeline, &config),
        Commands::Resolve { timeline, seconds } => commands::resolve::run(timeline, seconds),
        Commands::Edit {
            timeline,
            output,
            op,
        } => commands::edit::run(timeline, output, op.into(), &config),
        Commands::Voiceover { timeline } => commands::voiceover::run(timeline, &config),
        Commands::Probe {
            payload,
            sample_rate,
        } => commands::probe::run(payload, sample_rate, &config),
        Commands::Subtitles { timeline, output } => commands::subtitles::run(timeline, output),
        Commands::Play { timeline, from } => commands::play::run(timeline, from, &config).await,
    }
}
