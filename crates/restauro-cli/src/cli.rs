//! Command handlers.
//!
//! Each handler calls into `restauro-core` and renders the returned model
//! through its markdown `Display` implementation.

use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use restauro_core::{
    chat::{source_for, ResponseSource, QUICK_PROMPTS},
    display::{ArtifactWritten, Checklist, Dashboard, OperationStatus, TaskUpdate},
    guide::GUIDE,
    tools::{estimate_vram, BitrateEstimate, Resolution, RESOLUTION_PRESETS},
    Artifact, ChatRole, ChatSession, Config, Tracker,
};
use tokio::sync::mpsc;

use crate::args::{ChatArgs, TaskRef};
use crate::renderer::TerminalRenderer;

/// Words that end an interactive chat.
const EXIT_WORDS: [&str; 3] = ["sair", "exit", "quit"];

/// Handles one CLI invocation against the loaded tracker.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub fn status(&self) -> Result<()> {
        let last_saved = self.tracker.last_saved();
        let dashboard = Dashboard::new(self.tracker.steps()).with_last_saved(last_saved.as_ref());
        self.renderer.render(&dashboard.to_string())
    }

    pub fn steps(&self) -> Result<()> {
        self.renderer
            .render(&Checklist(self.tracker.steps()).to_string())
    }

    pub async fn toggle(&mut self, target: TaskRef) -> Result<()> {
        let task = self
            .tracker
            .toggle_task(&target.step, &target.task)
            .await
            .with_context(|| format!("Failed to toggle {}/{}", target.step, target.task))?;

        let update = TaskUpdate {
            step_id: &target.step,
            task: &task,
            progress: self.tracker.progress(),
            changed: true,
        };
        self.renderer.render(&update.to_string())
    }

    pub async fn set_done(&mut self, target: TaskRef, done: bool) -> Result<()> {
        let (task, changed) = self
            .tracker
            .set_task_done(&target.step, &target.task, done)
            .await
            .with_context(|| format!("Failed to update {}/{}", target.step, target.task))?;

        let update = TaskUpdate {
            step_id: &target.step,
            task: &task,
            progress: self.tracker.progress(),
            changed,
        };
        self.renderer.render(&update.to_string())
    }

    pub async fn reset(&mut self, confirm: bool) -> Result<()> {
        if !confirm {
            bail!("Reset requires --confirm; all saved progress would be lost");
        }

        self.tracker
            .reset()
            .await
            .context("Failed to reset progress")?;
        info!("Progress reset to template defaults");

        let status = OperationStatus::success("Progresso reiniciado. Todas as tarefas estão pendentes.");
        self.renderer.render(&status.to_string())
    }

    pub fn download(&self, task_id: &str, dir: &Path) -> Result<()> {
        let Some((_, task)) = self.tracker.state().find_task(task_id) else {
            bail!("Task '{task_id}' not found");
        };
        let Some(artifact) = Artifact::for_task(&task.id) else {
            bail!("Task '{task_id}' has no download action");
        };
        self.write_artifact(artifact, dir)
    }

    pub fn write_artifact(&self, artifact: Artifact, dir: &Path) -> Result<()> {
        let path = artifact
            .write_to(dir)
            .with_context(|| format!("Failed to write {artifact}"))?;

        let written = ArtifactWritten {
            artifact,
            path: &path,
        };
        self.renderer.render(&written.to_string())
    }

    pub fn vram(&self, resolution: Resolution, batch: u32) -> Result<()> {
        let estimate = estimate_vram(resolution, batch)?;

        let mut output = estimate.to_string();
        output.push_str("\n### Predefinições\n\n");
        for preset in &RESOLUTION_PRESETS {
            let marker = if preset.resolution == resolution { "●" } else { "○" };
            output.push_str(&format!(
                "- {marker} `{}` {}\n",
                preset.resolution, preset.label
            ));
        }
        self.renderer.render(&output)
    }

    pub fn bitrate(&self, minutes: f64, size_gb: f64) -> Result<()> {
        self.renderer
            .render(&BitrateEstimate::new(minutes, size_gb).to_string())
    }

    pub fn guide(&self) -> Result<()> {
        self.renderer.render(GUIDE)
    }

    pub fn prompts(&self) -> Result<()> {
        let mut output = String::from("## Atalhos rápidos\n\n");
        for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
            output.push_str(&format!("{}. {prompt}\n", i + 1));
        }
        self.renderer.render(&output)
    }

    pub async fn chat(&self, args: ChatArgs) -> Result<()> {
        let mut config = Config::load().context("Failed to load configuration")?;
        if args.offline {
            config.offline = true;
        }
        if args.no_stream {
            config.stream = false;
        }
        let source = source_for(&config);
        let mut session = ChatSession::new();

        match args.message {
            Some(message) => {
                if !self.chat_turn(&mut session, source.as_ref(), &message).await? {
                    bail!("Nothing to ask: the message is empty");
                }
                Ok(())
            }
            None => self.chat_interactive(&mut session, source.as_ref()).await,
        }
    }

    async fn chat_interactive(
        &self,
        session: &mut ChatSession,
        source: &dyn ResponseSource,
    ) -> Result<()> {
        if let Some(greeting) = session.trailing() {
            self.renderer.render(&greeting.to_string())?;
        }
        self.renderer.render("*Digite `sair` ou pressione Ctrl-D para terminar.*\n\n")?;

        let mut lines = spawn_stdin_reader();
        loop {
            self.renderer.prompt()?;

            let line = tokio::select! {
                line = lines.recv() => line,
                _ = tokio::signal::ctrl_c() => None,
            };
            let Some(line) = line else {
                println!();
                break;
            };

            let text = line.trim();
            if EXIT_WORDS.contains(&text.to_lowercase().as_str()) {
                break;
            }
            self.chat_turn(session, source, text).await?;
        }

        debug!("Chat ended after {} messages", session.messages().len());
        Ok(())
    }

    /// Sends one message and streams the answer. Returns false if the
    /// message was rejected.
    async fn chat_turn(
        &self,
        session: &mut ChatSession,
        source: &dyn ResponseSource,
        text: &str,
    ) -> Result<bool> {
        let first_reply = session.messages().len() + 1;
        let mut streamed = String::new();

        let outcome = tokio::select! {
            accepted = session.ask_with(text, source, |chunk| {
                streamed.push_str(chunk);
                // Output errors surface on the next render.
                let _ = self.renderer.stream(chunk);
            }) => Some(accepted),
            _ = tokio::signal::ctrl_c() => None,
        };

        let accepted = match outcome {
            Some(accepted) => accepted,
            None => {
                info!("Answer interrupted");
                session.fail();
                true
            }
        };
        if !accepted {
            return Ok(false);
        }
        if !streamed.is_empty() {
            println!();
        }

        // Anything the stream did not already show, such as a failure notice.
        let replies = session.messages().get(first_reply..).unwrap_or_default();
        for (i, reply) in replies.iter().enumerate() {
            if reply.role != ChatRole::Assistant || (i == 0 && reply.content == streamed) {
                continue;
            }
            self.renderer.render(&format!("{}\n", reply.content))?;
        }
        println!();
        Ok(true)
    }
}

/// Reads stdin lines on a detached thread so the chat loop can also watch
/// for Ctrl-C. The runtime would wait on a blocking task stuck in `read`.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
