// Scanner module - Result model fed by an external TLS/SSL scanner

pub mod config;
pub mod filter;
pub mod record;
pub mod result;

pub use config::ResultConfig;
pub use filter::VersionFilter;
pub use record::{CipherRecord, CipherRecordSet, CipherStatus};
pub use result::{ScanResult, ScanSummary};
