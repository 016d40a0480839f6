mod report_error;
mod report_grid;
pub mod report_layout;
mod report_writer;

pub use report_error::ReportError;
pub use report_grid::ReportGrid;
pub use report_layout::ReportLayout;
pub use report_writer::{artifact_count, init_report, RecordedCell, ReportWriter};
