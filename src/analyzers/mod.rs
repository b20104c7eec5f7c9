pub mod file;
pub mod message;
pub mod password;
pub mod privacy;
pub mod url;

use serde::{Deserialize, Serialize};

/// Severity tier derived from an accumulated rule score. Ordering follows
/// ascending severity so levels can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}
