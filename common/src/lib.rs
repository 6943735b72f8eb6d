//! Pantry AI Common Library
//!
//! CLIと他フロントエンドで共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod parser;

pub use types::{PantryItem, Phase, SelectedFile, SubmissionState};
pub use error::{Error, Result};
pub use parser::{extract_error_message, parse_items};
