pub mod analyzers;
pub mod config;
pub mod scan_log;
pub mod server;

pub use analyzers::RiskLevel;
pub use config::Config;
pub use scan_log::{ScanLog, ScanStats};
