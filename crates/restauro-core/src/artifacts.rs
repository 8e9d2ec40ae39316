//! Files the checklist hands to the user.
//!
//! Both artifacts are fixed text embedded at build time. Writing one to disk
//! never changes task state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Deserialize;

use crate::error::{RestauroError, Result};

const ENCODE_SCRIPT: &str = include_str!("../assets/prepara_minidv.bat");
const NODE_WORKFLOW: &str = include_str!("../assets/workflow_wan21.json");

/// A downloadable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Windows batch script that standardizes the source video with FFmpeg
    EncodeScript,
    /// ComfyUI node graph for the 4x upscale
    NodeWorkflow,
}

impl Artifact {
    pub const ALL: [Artifact; 2] = [Artifact::EncodeScript, Artifact::NodeWorkflow];

    /// Name the file is written under.
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::EncodeScript => "prepara_minidv.bat",
            Artifact::NodeWorkflow => "Workflow_Wan21_v4.json",
        }
    }

    /// Exact file contents.
    pub fn contents(&self) -> &'static str {
        match self {
            Artifact::EncodeScript => ENCODE_SCRIPT,
            Artifact::NodeWorkflow => NODE_WORKFLOW,
        }
    }

    /// Artifact offered by the task's download action, if any.
    pub fn for_task(task_id: &str) -> Option<Self> {
        match task_id {
            "dl_script" => Some(Artifact::EncodeScript),
            "dl_json" => Some(Artifact::NodeWorkflow),
            _ => None,
        }
    }

    /// Writes the artifact into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| RestauroError::FileSystem {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = dir.join(self.file_name());
        std::fs::write(&path, self.contents()).map_err(|e| RestauroError::FileSystem {
            path: path.clone(),
            source: e,
        })?;

        info!("Wrote {}", path.display());
        Ok(path)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for Artifact {
    type Err = RestauroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "script" | "bat" => Ok(Artifact::EncodeScript),
            "workflow" | "json" => Ok(Artifact::NodeWorkflow),
            _ => Err(RestauroError::invalid_input("artifact")
                .with_reason(format!("unknown artifact '{s}', expected 'script' or 'workflow'"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NodeGraph {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
}

#[derive(Debug, Deserialize)]
struct GraphNode {
    id: u64,
    #[serde(rename = "type")]
    kind: String,
}

/// `[link_id, from_node, from_slot, to_node, to_slot, type]`
#[derive(Debug, Deserialize)]
struct GraphLink(u64, u64, u64, u64, u64, String);

/// Node types along the IMAGE links of the bundled workflow, source first.
///
/// ```
/// let chain = restauro_core::artifacts::pipeline().unwrap();
/// assert_eq!(chain.first().map(String::as_str), Some("VHS_LoadVideo"));
/// ```
pub fn pipeline() -> Result<Vec<String>> {
    let graph: NodeGraph = serde_json::from_str(NODE_WORKFLOW)?;
    let image_links: Vec<&GraphLink> = graph
        .links
        .iter()
        .filter(|link| link.5 == "IMAGE")
        .collect();

    let kind_of = |id: u64| {
        graph
            .nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.kind.clone())
    };

    let Some(mut current) = image_links
        .iter()
        .map(|link| link.1)
        .find(|from| !image_links.iter().any(|link| link.3 == *from))
    else {
        return Ok(Vec::new());
    };

    let mut chain = Vec::new();
    while let Some(kind) = kind_of(current) {
        chain.push(kind);
        if chain.len() > graph.nodes.len() {
            return Err(RestauroError::Configuration {
                message: "workflow IMAGE links form a cycle".to_string(),
            });
        }
        match image_links.iter().find(|link| link.1 == current) {
            Some(link) => current = link.3,
            None => break,
        }
    }

    Ok(chain)
}
