//! Analysis request (input contract).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the request inside an input directory.
pub const REQUEST_FILE_NAME: &str = "challenge1b_input.json";

/// Run identification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    /// Run identifier; names the output file
    pub challenge_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A document reference, resolved against the input directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Reader persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// Task the persona wants to accomplish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// A persona-driven analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub challenge_info: ChallengeInfo,
    pub documents: Vec<DocumentRef>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

impl AnalysisRequest {
    /// Parse and validate a request from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    /// Read a request file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Read `challenge1b_input.json` from an input directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::from_path(dir.as_ref().join(REQUEST_FILE_NAME))
    }

    /// Check the fields the analysis depends on.
    pub fn validate(&self) -> Result<()> {
        let id = self.challenge_info.challenge_id.trim();
        if id.is_empty() {
            return Err(Error::InvalidRequest("challenge_id is empty".to_string()));
        }
        if id.contains(['/', '\\']) {
            return Err(Error::InvalidRequest(format!(
                "challenge_id '{}' must not contain path separators",
                id
            )));
        }
        Ok(())
    }

    /// Requested filenames in request order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }

    /// Persona role.
    pub fn role(&self) -> &str {
        &self.persona.role
    }

    /// Task description.
    pub fn task(&self) -> &str {
        &self.job_to_be_done.task
    }

    /// Name of the report file: `<challenge_id>.json`.
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.challenge_info.challenge_id.trim())
    }
}
