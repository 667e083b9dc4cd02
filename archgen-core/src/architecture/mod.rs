//! Generated architecture model and output post-processing
//!
//! The model mirrors the JSON document the generation prompt asks for:
//!
//! ```json
//! {
//!   "architecture": { "overview": "", "components": [], "patterns": [], "reasoning": "" },
//!   "recommendations": [],
//!   "tradeoffs": []
//! }
//! ```

pub mod sanitizer;
pub mod validator;

pub use sanitizer::sanitize;
pub use validator::validate;

use serde::{Deserialize, Serialize};

/// Validated architecture proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureResult {
    pub architecture: Architecture,
    pub recommendations: Vec<String>,
    pub tradeoffs: Vec<String>,
}

impl ArchitectureResult {
    pub fn overview(&self) -> &str {
        &self.architecture.overview
    }

    pub fn components(&self) -> &[Component] {
        &self.architecture.components
    }

    pub fn patterns(&self) -> &[String] {
        &self.architecture.patterns
    }

    pub fn reasoning(&self) -> &str {
        &self.architecture.reasoning
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    pub overview: String,
    pub components: Vec<Component>,
    pub patterns: Vec<String>,
    pub reasoning: String,
}

/// One building block of the proposed system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub description: String,
    pub technology: String,
    /// Why this technology was picked
    pub reasoning: String,
}
