pub mod ladder;
pub mod replay;
pub mod report;
pub mod version;
