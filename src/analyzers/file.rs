use crate::analyzers::RiskLevel;
use serde::{Deserialize, Serialize};

static DANGEROUS_EXTENSIONS: &[&str] = &[
    "exe", "msi", "bat", "sh", "cmd", "ps1", "vbs", "scr", "com", "pif",
];

static SUSPICIOUS_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "iso", "dmg", "js", "jar", "svg"];

/// Document-style extensions a masquerading executable hides behind.
static COMMON_DOC_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "txt", "jpg", "png"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVerdict {
    pub risk_level: RiskLevel,
    pub file_category: String,
    pub file_extension: String,
    pub explanation: String,
    pub indicators: Vec<String>,
    pub recommendation: String,
}

/// Score a file by name, declared size in bytes, and optional declared MIME
/// type. Sizes are taken as-is; negative or absurd values are not rejected.
pub fn analyze_file(file_name: &str, file_size: f64, file_type: Option<&str>) -> FileVerdict {
    if file_name.is_empty() {
        return FileVerdict {
            risk_level: RiskLevel::Safe,
            file_category: "Document".to_string(),
            file_extension: "unknown".to_string(),
            explanation: "This file appears to be a standard document and is likely safe."
                .to_string(),
            indicators: Vec::new(),
            recommendation:
                "You can safely open this file, but stay alert for any unusual behavior."
                    .to_string(),
        };
    }

    let parts: Vec<&str> = file_name.split('.').collect();
    let extension = if parts.len() > 1 {
        parts.last().map(|s| s.to_lowercase()).unwrap_or_default()
    } else {
        String::new()
    };
    let file_extension = if extension.is_empty() {
        "none".to_string()
    } else {
        extension.clone()
    };

    let mut score: u32 = 0;
    let mut indicators: Vec<String> = Vec::new();
    let mut file_category = "Document".to_string();

    if DANGEROUS_EXTENSIONS.contains(&extension.as_str()) {
        score += 80;
        file_category = "Executable / Script".to_string();
        indicators.push(format!(
            "High-risk executable extension (.{extension}) detected"
        ));
    } else if SUSPICIOUS_EXTENSIONS.contains(&extension.as_str()) {
        score += 40;
        file_category = "Archive / Script".to_string();
        indicators.push(format!(
            "Potentially suspicious extension (.{extension}) detected"
        ));
    }

    // Masquerade like "invoice.pdf.exe": document extension directly before
    // a dangerous final one.
    if parts.len() > 2 {
        let second_last = parts[parts.len() - 2].to_lowercase();
        if COMMON_DOC_EXTENSIONS.contains(&second_last.as_str())
            && DANGEROUS_EXTENSIONS.contains(&extension.as_str())
        {
            score += 50;
            indicators.push(format!(
                "Double extension detected (trying to look like a .{second_last} while being an .{extension})"
            ));
        }
    }

    let size_mb = file_size / (1024.0 * 1024.0);
    if size_mb > 50.0 {
        score += 10;
        indicators.push("Unusually large file size for a simple document".to_string());
    }

    if let Some(declared) = file_type {
        if declared.split('/').next() == Some("image")
            && DANGEROUS_EXTENSIONS.contains(&extension.as_str())
        {
            score += 40;
            indicators.push(
                "MIME type indicates an image, but the extension is executable (highly suspicious)"
                    .to_string(),
            );
        }
    }

    let (risk_level, explanation, recommendation) = band(score);

    FileVerdict {
        risk_level,
        file_category,
        file_extension,
        explanation: explanation.to_string(),
        indicators,
        recommendation: recommendation.to_string(),
    }
}

fn band(score: u32) -> (RiskLevel, &'static str, &'static str) {
    if score >= 80 {
        (
            RiskLevel::Critical,
            "This file is extremely dangerous. It is an executable program that could install malware, steal your data, or lock your computer.",
            "⚠️ DO NOT OPEN THIS FILE. Delete it immediately and do not run it.",
        )
    } else if score >= 50 {
        (
            RiskLevel::High,
            "This file has high-risk characteristics. It might be a virus disguised as a normal document.",
            "Do not open this file unless you are 100% sure you know who sent it and why. Scan it with a dedicated antivirus.",
        )
    } else if score >= 30 {
        (
            RiskLevel::Medium,
            "This file type is often used to hide malware. While it might be safe, it requires caution.",
            "Only open if you expected this file. If it asks for special permissions, deny them.",
        )
    } else if score >= 15 {
        (
            RiskLevel::Low,
            "Minor suspicious indicators found, possibly due to the file type or size.",
            "Proceed with caution. Ensure your antivirus software is active.",
        )
    } else {
        (
            RiskLevel::Safe,
            "No significant threat indicators were found for this file structure.",
            "This file appears safe to use.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_name_returns_default_verdict() {
        let verdict = analyze_file("", 0.0, None);
        assert_eq!(verdict.risk_level, RiskLevel::Safe);
        assert_eq!(verdict.file_extension, "unknown");
        assert_eq!(verdict.file_category, "Document");
        assert!(verdict.indicators.is_empty());
    }

    #[test]
    fn masqueraded_executable_is_critical() {
        // 80 (dangerous extension) + 50 (double extension) = 130
        let verdict = analyze_file("invoice.pdf.exe", 1000.0, Some("application/pdf"));
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
        assert_eq!(verdict.file_category, "Executable / Script");
        assert_eq!(verdict.file_extension, "exe");
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.contains("Double extension")));
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.contains("High-risk executable")));
    }

    #[test]
    fn image_mime_with_executable_extension_is_flagged() {
        // 80 + 40 (MIME mismatch) = 120
        let verdict = analyze_file("photo.scr", 2048.0, Some("image/png"));
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.contains("MIME type indicates an image")));
    }

    #[test]
    fn archives_are_medium_risk() {
        let verdict = analyze_file("backup.zip", 1024.0, None);
        assert_eq!(verdict.risk_level, RiskLevel::Medium);
        assert_eq!(verdict.file_category, "Archive / Script");
    }

    #[test]
    fn oversized_archive_crosses_into_high() {
        // 40 (iso) + 10 (size) = 50
        let verdict = analyze_file("image.iso", 60.0 * 1024.0 * 1024.0, None);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert!(verdict
            .indicators
            .iter()
            .any(|i| i.contains("large file size")));
    }

    #[test]
    fn name_without_extension_reports_none() {
        let verdict = analyze_file("README", 100.0, None);
        assert_eq!(verdict.file_extension, "none");
        assert_eq!(verdict.risk_level, RiskLevel::Safe);
        assert_eq!(
            verdict.explanation,
            "No significant threat indicators were found for this file structure."
        );
    }

    #[test]
    fn trailing_dot_also_reports_none() {
        let verdict = analyze_file("notes.", 100.0, None);
        assert_eq!(verdict.file_extension, "none");
    }

    #[test]
    fn negative_size_is_accepted_as_is() {
        let verdict = analyze_file("report.pdf", -5000.0, None);
        assert_eq!(verdict.risk_level, RiskLevel::Safe);
        assert!(verdict.indicators.is_empty());
    }

    #[test]
    fn double_extension_needs_a_dangerous_final_part() {
        let verdict = analyze_file("archive.pdf.zip", 1000.0, None);
        assert!(!verdict
            .indicators
            .iter()
            .any(|i| i.contains("Double extension")));
    }

    #[test]
    fn repeated_calls_are_identical() {
        assert_eq!(
            analyze_file("setup.exe", 1000.0, None),
            analyze_file("setup.exe", 1000.0, None)
        );
    }
}
