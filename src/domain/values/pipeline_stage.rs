use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages an answer run moves through, strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Embedding,
    Retrieving,
    AssemblingContext,
    Generating,
    Done,
}

impl PipelineStage {
    /// The stage that follows this one. `Done` is terminal.
    pub fn next(self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Idle => Some(PipelineStage::Embedding),
            PipelineStage::Embedding => Some(PipelineStage::Retrieving),
            PipelineStage::Retrieving => Some(PipelineStage::AssemblingContext),
            PipelineStage::AssemblingContext => Some(PipelineStage::Generating),
            PipelineStage::Generating => Some(PipelineStage::Done),
            PipelineStage::Done => None,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Idle => write!(f, "idle"),
            PipelineStage::Embedding => write!(f, "embedding"),
            PipelineStage::Retrieving => write!(f, "retrieving"),
            PipelineStage::AssemblingContext => write!(f, "assembling_context"),
            PipelineStage::Generating => write!(f, "generating"),
            PipelineStage::Done => write!(f, "done"),
        }
    }
}
