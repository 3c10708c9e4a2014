//! Configuration types for schedule extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The only required field is the course
//! code, which is supplied by the caller and never derived from the document.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};

/// Department code stamped on every record unless overridden.
pub const DEFAULT_DEPT: &str = "BIL";

/// Configuration for one extraction run.
///
/// Built via [`ExtractionConfig::builder()`].
///
/// # Example
/// ```rust
/// use pdf2exams::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .course("CSE101")
///     .dept("BIL")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Course code stamped on every record. Required, must be non-empty.
    pub course: String,

    /// Department code stamped on every record. Default: [`DEFAULT_DEPT`].
    pub dept: String,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Pretty-print the output JSON. Default: true.
    pub pretty: bool,
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: ExtractionConfig {
                course: String::new(),
                dept: DEFAULT_DEPT.to_string(),
                password: None,
                pretty: true,
            },
        }
    }

    /// Shorthand for a config with the given course code and all defaults.
    pub fn new(course: impl Into<String>) -> Result<Self, ExtractError> {
        Self::builder().course(course).build()
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.config.course = course.into();
        self
    }

    pub fn dept(mut self, dept: impl Into<String>) -> Self {
        self.config.dept = dept.into();
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pretty(mut self, v: bool) -> Self {
        self.config.pretty = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.course.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "course code must not be empty".into(),
            ));
        }
        if c.dept.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "department code must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
