pub mod formatter;
pub mod report;

pub use formatter::{
    format_breakdown, format_percentage, format_results_table, format_score, should_use_colors,
};
pub use report::{write_report, ResultsReport};
