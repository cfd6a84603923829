//! Rock AI Common Library
//!
//! Schema, data model, prompts and response validation shared by the CLI

pub mod error;
pub mod parser;
pub mod prompts;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use parser::{extract_json, parse_analysis_response, validate_categorical_fields};
pub use prompts::build_prompt;
pub use schema::response_schema;
pub use types::{AnalysisMode, AnalysisResult, AnalysisSummary, RockSpecimen, NO_LOCATION_CONTEXT};
