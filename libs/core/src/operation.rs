use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the two remotely callable operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    RunWorkflow { question: String },
    Test,
}

impl Operation {
    pub fn run_workflow(question: impl Into<String>) -> Self {
        Self::RunWorkflow {
            question: question.into(),
        }
    }

    /// Remote method name
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::RunWorkflow { .. } => "run_workflow",
            Self::Test => "test",
        }
    }

    /// Positional arguments, in call order
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::RunWorkflow { question } => vec![question.clone()],
            Self::Test => Vec::new(),
        }
    }

    /// Reject a blank question
    ///
    /// The question itself is passed on untouched; only emptiness is judged
    /// on the trimmed text.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::RunWorkflow { question } if question.trim().is_empty() => {
                Err(Error::QuestionMissing)
            }
            _ => Ok(()),
        }
    }
}
