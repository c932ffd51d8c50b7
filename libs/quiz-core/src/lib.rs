//! Core quiz library shared by the HTTP backend and the CLI.
//!
//! Provides:
//! - DOCX to HTML conversion with inline images
//! - HTML to markdown rendering
//! - Quiz text parser (lists, questions, alternatives, answer keys)
//! - Shared types (List, Question, ConvertResponse)

pub mod docx;
pub mod error;
pub mod markdown;
pub mod parser;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use docx::docx_to_html;
pub use error::{ConvertError, Result};
pub use markdown::html_to_markdown;
pub use parser::{parse_docx, parse_markdown};
pub use types::{ConvertResponse, List, Question};
