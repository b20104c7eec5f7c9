use serde::{Deserialize, Serialize};

const BRUTE_FORCE_SPEED: f64 = 1e10;
const GPU_SPEED: f64 = 8e11;

static COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "qwerty",
    "admin",
    "welcome",
    "12345678",
    "password123",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "very weak")]
    VeryWeak,
    #[serde(rename = "weak")]
    Weak,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "very strong")]
    VeryStrong,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordVerdict {
    pub score: u32,
    pub strength: Strength,
    pub crack_time: String,
    pub attacks: AttackSimulation,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSimulation {
    pub brute_force: BruteForceAttack,
    pub dictionary: DictionaryAttack,
    pub gpu_crack: GpuCrackAttack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BruteForceAttack {
    pub attempts_per_second: String,
    pub combinations: String,
    pub time_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryAttack {
    pub vulnerable: bool,
    pub time_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuCrackAttack {
    pub gpu_cluster: String,
    pub attempts_per_second: String,
    pub time_estimate: String,
}

/// Score password strength and derive closed-form crack-time estimates.
/// An empty password yields `None`: there is nothing to analyze.
pub fn analyze_password(password: &str) -> Option<PasswordVerdict> {
    if password.is_empty() {
        return None;
    }

    let mut score: u32 = 0;
    let mut warnings: Vec<String> = Vec::new();
    let mut suggestions: Vec<String> = Vec::new();

    let length = password.chars().count() as u32;
    if length < 8 {
        warnings.push("Password is too short (minimum 8 characters recommended)".to_string());
        score += length * 2;
    } else if length >= 12 {
        score += 40;
    } else {
        score += 25;
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());

    if has_upper {
        score += 15;
    } else {
        suggestions.push("Add uppercase letters".to_string());
    }
    if has_lower {
        score += 10;
    }
    if has_digit {
        score += 15;
    } else {
        suggestions.push("Add numbers".to_string());
    }
    if has_special {
        score += 20;
    } else {
        suggestions.push("Add special characters (@, #, $, etc.)".to_string());
    }

    let mut dictionary = DictionaryAttack {
        vulnerable: false,
        time_estimate: "0.01 seconds".to_string(),
    };

    // A common password overrides everything accumulated so far.
    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        score = 5;
        warnings.push("This is a very common password and extremely easy to guess".to_string());
        dictionary.vulnerable = true;
        dictionary.time_estimate = "Instant".to_string();
    }

    // Fixed alphabet sizes per class; special is an assumed 32, not the
    // count of distinct symbols actually used.
    let mut charset_size: u32 = 0;
    if has_lower {
        charset_size += 26;
    }
    if has_upper {
        charset_size += 26;
    }
    if has_digit {
        charset_size += 10;
    }
    if has_special {
        charset_size += 32;
    }

    let combinations = (charset_size as f64).powf(length as f64);
    let brute_force_seconds = combinations / BRUTE_FORCE_SPEED;
    let gpu_seconds = combinations / GPU_SPEED;
    let crack_time = format_crack_time(brute_force_seconds);

    let score = score.min(100);
    let strength = if score >= 90 {
        Strength::VeryStrong
    } else if score >= 70 {
        Strength::Strong
    } else if score >= 50 {
        Strength::Moderate
    } else if score >= 30 {
        Strength::Weak
    } else {
        Strength::VeryWeak
    };

    // Appended last, even when a length hint already exists.
    if score < 50 {
        suggestions.push("Make your password at least 12 characters long".to_string());
    }

    Some(PasswordVerdict {
        score,
        strength,
        crack_time: crack_time.clone(),
        attacks: AttackSimulation {
            brute_force: BruteForceAttack {
                attempts_per_second: "10 Billion".to_string(),
                combinations: to_exponential(combinations),
                time_estimate: crack_time,
            },
            dictionary,
            gpu_crack: GpuCrackAttack {
                gpu_cluster: "8x RTX 4090".to_string(),
                attempts_per_second: "800 Billion".to_string(),
                time_estimate: format_crack_time(gpu_seconds),
            },
        },
        warnings,
        suggestions,
    })
}

/// Bucket a duration into the coarse human-readable scale used for
/// crack-time display.
fn format_crack_time(seconds: f64) -> String {
    if seconds < 1.0 {
        "Instant".to_string()
    } else if seconds < 60.0 {
        format!("{} seconds", seconds.floor() as u64)
    } else if seconds < 3_600.0 {
        format!("{} minutes", (seconds / 60.0).floor() as u64)
    } else if seconds < 86_400.0 {
        format!("{} hours", (seconds / 3_600.0).floor() as u64)
    } else if seconds < 31_536_000.0 {
        format!("{} days", (seconds / 86_400.0).floor() as u64)
    } else if seconds < 3_153_600_000.0 {
        format!("{} years", (seconds / 31_536_000.0).floor() as u64)
    } else {
        "Centuries".to_string()
    }
}

/// Two-decimal scientific notation in the JavaScript `toExponential(2)`
/// style, e.g. "2.09e+11".
fn to_exponential(value: f64) -> String {
    if !value.is_finite() {
        return "Infinity".to_string();
    }
    if value == 0.0 {
        return "0.00e+0".to_string();
    }
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exponent);
    mantissa = (mantissa * 100.0).round() / 100.0;
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    if exponent >= 0 {
        format!("{mantissa:.2}e+{exponent}")
    } else {
        format!("{mantissa:.2}e-{}", -exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_yields_none() {
        assert!(analyze_password("").is_none());
    }

    #[test]
    fn common_password_override_forces_score_to_five() {
        let verdict = analyze_password("password").unwrap();
        assert_eq!(verdict.score, 5);
        assert_eq!(verdict.strength, Strength::VeryWeak);
        assert!(verdict.attacks.dictionary.vulnerable);
        assert_eq!(verdict.attacks.dictionary.time_estimate, "Instant");
        assert!(verdict
            .warnings
            .iter()
            .any(|w| w.contains("very common password")));
        // 26^8 = 2.0882...e11, swept in roughly 20 seconds at 10 billion/s.
        assert_eq!(verdict.attacks.brute_force.combinations, "2.09e+11");
        assert_eq!(verdict.crack_time, "20 seconds");
    }

    #[test]
    fn common_password_check_is_case_insensitive() {
        let verdict = analyze_password("QWERTY").unwrap();
        assert_eq!(verdict.score, 5);
        assert!(verdict.attacks.dictionary.vulnerable);
    }

    #[test]
    fn long_varied_password_is_very_strong() {
        let verdict = analyze_password("Tr0ub4dor&3xplor!").unwrap();
        // 40 (length) + 15 + 10 + 15 + 20 = 100
        assert_eq!(verdict.score, 100);
        assert_eq!(verdict.strength, Strength::VeryStrong);
        assert!(verdict.suggestions.is_empty());
        assert_eq!(verdict.crack_time, "Centuries");
        assert!(!verdict.attacks.dictionary.vulnerable);
    }

    #[test]
    fn short_password_scores_double_its_length() {
        let verdict = analyze_password("abc").unwrap();
        // 3 * 2 + 10 (lowercase) = 16
        assert_eq!(verdict.score, 16);
        assert_eq!(verdict.strength, Strength::VeryWeak);
        assert!(verdict.warnings.iter().any(|w| w.contains("too short")));
    }

    #[test]
    fn length_suggestion_is_appended_last_for_weak_scores() {
        let verdict = analyze_password("abc").unwrap();
        assert_eq!(
            verdict.suggestions.last().map(String::as_str),
            Some("Make your password at least 12 characters long")
        );
        assert!(verdict
            .suggestions
            .contains(&"Add uppercase letters".to_string()));
        assert!(verdict.suggestions.contains(&"Add numbers".to_string()));
    }

    #[test]
    fn missing_classes_each_produce_a_suggestion() {
        let verdict = analyze_password("abcdefgh").unwrap();
        // 25 (length 8-11) + 10 (lowercase) = 35
        assert_eq!(verdict.score, 35);
        assert_eq!(verdict.strength, Strength::Weak);
        assert_eq!(verdict.suggestions.len(), 4);
    }

    #[test]
    fn gpu_estimate_uses_faster_throughput() {
        let verdict = analyze_password("abcdefghij").unwrap();
        // 26^10 / 1e10 ≈ 14116 s (3 hours); / 8e11 ≈ 176 s (2 minutes)
        assert_eq!(verdict.attacks.brute_force.time_estimate, "3 hours");
        assert_eq!(verdict.attacks.gpu_crack.time_estimate, "2 minutes");
        assert_eq!(verdict.attacks.gpu_crack.gpu_cluster, "8x RTX 4090");
    }

    #[test]
    fn crack_time_buckets() {
        assert_eq!(format_crack_time(0.5), "Instant");
        assert_eq!(format_crack_time(59.9), "59 seconds");
        assert_eq!(format_crack_time(120.0), "2 minutes");
        assert_eq!(format_crack_time(7_200.0), "2 hours");
        assert_eq!(format_crack_time(200_000.0), "2 days");
        assert_eq!(format_crack_time(63_072_000.0), "2 years");
        assert_eq!(format_crack_time(4e9), "Centuries");
        assert_eq!(format_crack_time(f64::INFINITY), "Centuries");
    }

    #[test]
    fn exponential_display_matches_javascript_formatting() {
        assert_eq!(to_exponential(208_827_064_576.0), "2.09e+11");
        assert_eq!(to_exponential(1.0), "1.00e+0");
        assert_eq!(to_exponential(0.00123), "1.23e-3");
        assert_eq!(to_exponential(0.0), "0.00e+0");
        assert_eq!(to_exponential(f64::INFINITY), "Infinity");
        assert_eq!(to_exponential(9.999e9), "1.00e+10");
    }

    #[test]
    fn repeated_calls_are_identical() {
        assert_eq!(analyze_password("hunter2"), analyze_password("hunter2"));
    }
}
