use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What `answer` does when retrieval returns no documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyRetrievalPolicy {
    /// Generate with an empty context string.
    #[default]
    Proceed,
    /// Stop with `DomainError::RetrievalEmpty` before generation.
    Fail,
}

impl fmt::Display for EmptyRetrievalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyRetrievalPolicy::Proceed => write!(f, "proceed"),
            EmptyRetrievalPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for EmptyRetrievalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proceed" => Ok(EmptyRetrievalPolicy::Proceed),
            "fail" => Ok(EmptyRetrievalPolicy::Fail),
            _ => Err(format!("Unknown empty-retrieval policy: {s}")),
        }
    }
}
