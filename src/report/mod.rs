//! Reporting: summary lines stored in result objects and the terminal text
//! the CLI prints.

pub mod format;

pub use format::{
    CalculationSummary, EnhancedSummary, calculation_summary, enhanced_summary,
    format_calculation_report, format_comparison, format_enhanced_report, format_health_report,
    format_sdg_report,
};
