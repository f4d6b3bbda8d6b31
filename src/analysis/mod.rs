pub mod aggregation;
pub mod filter;
pub mod format;
pub mod stats;


pub use aggregation::{aggregate_performance, aggregate_performance_with, AveragingMode};
pub use filter::{categories, filter_prompts, group_by_category};
pub use format::{format_chart_data, process_pie_data};
pub use stats::OverviewStats;
