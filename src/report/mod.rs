pub mod build;
pub mod output;

pub use build::build_report;
pub use output::{output_summary, render_text, write_json, write_report};
