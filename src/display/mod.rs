mod format;
pub mod report;
