//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use restauro_core::{tools::Resolution, Artifact};

/// Guided checklist and help desk for restoring MiniDV/VHS footage with
/// FFmpeg and a ComfyUI 4x upscale.
///
/// Progress is saved after every change and restored on the next run.
#[derive(Parser)]
#[command(version, about, name = "restauro")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/restauro/restauro.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show overall progress and the full checklist
    #[command(alias = "st")]
    Status,
    /// Show the checklist without the progress header
    #[command(alias = "ls")]
    Steps,
    /// Flip a task between pending and done
    #[command(alias = "t")]
    Toggle(TaskRef),
    /// Mark a task as done
    Done(TaskRef),
    /// Mark a task as pending
    Undo(TaskRef),
    /// Clear saved progress and start over
    Reset(ResetArgs),
    /// Write the file offered by a task's download action
    #[command(alias = "dl")]
    Download(DownloadArgs),
    /// Write one of the bundled files by kind
    Artifact(ArtifactArgs),
    /// Estimate GPU memory for the upscale pass
    Vram(VramArgs),
    /// Compute the bitrate needed to hit a target file size
    Bitrate(BitrateArgs),
    /// Show prerequisites and advanced tuning tables
    Guide,
    /// Ask the restoration assistant
    Chat(ChatArgs),
    /// List suggested questions for the assistant
    Prompts,
}

/// Identifies one task inside one step.
#[derive(ClapArgs)]
pub struct TaskRef {
    /// Step identifier (e.g. step1)
    pub step: String,
    /// Task identifier within the step (e.g. dl_script)
    pub task: String,
}

#[derive(ClapArgs)]
pub struct ResetArgs {
    /// Confirm the reset (required to prevent accidental loss of progress)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(ClapArgs)]
pub struct DownloadArgs {
    /// Task whose action produces the file (dl_script or dl_json)
    pub task: String,
    /// Directory to write into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ArtifactKind {
    /// prepara_minidv.bat
    Script,
    /// Workflow_Wan21_v4.json
    Workflow,
}

impl From<ArtifactKind> for Artifact {
    fn from(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::Script => Artifact::EncodeScript,
            ArtifactKind::Workflow => Artifact::NodeWorkflow,
        }
    }
}

#[derive(ClapArgs)]
pub struct ArtifactArgs {
    #[arg(value_enum)]
    pub kind: ArtifactKind,
    /// Directory to write into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

#[derive(ClapArgs)]
pub struct VramArgs {
    /// Output resolution as WIDTHxHEIGHT
    #[arg(short, long, default_value = "1440x1080")]
    pub resolution: Resolution,
    /// Latent frames per batch (1-16)
    #[arg(short, long, default_value_t = 1)]
    pub batch: u32,
}

#[derive(ClapArgs)]
pub struct BitrateArgs {
    /// Video duration in minutes
    #[arg(short, long, default_value_t = 60.0)]
    pub minutes: f64,
    /// Target file size in GB
    #[arg(short, long, default_value_t = 4.0)]
    pub size: f64,
}

#[derive(ClapArgs)]
pub struct ChatArgs {
    /// Question to ask. Without it, an interactive session reads from stdin.
    pub message: Option<String>,
    /// Use the offline guide even when an API key is configured
    #[arg(long)]
    pub offline: bool,
    /// Wait for the hosted model's complete answer instead of streaming it
    #[arg(long)]
    pub no_stream: bool,
}
