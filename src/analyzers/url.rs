use crate::analyzers::RiskLevel;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Dotted-quad host with an optional scheme prefix.
static IP_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:https?://)?(?:\d{1,3}\.){3}\d{1,3}").unwrap());

static SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "verify", "account", "secure", "update", "banking", "paypal", "wallet", "signin",
    "confirm", "urgent", "suspend", "disabled", "bonus", "free", "reward", "gift", "prize",
    "claim", "winner",
];

static SUSPICIOUS_TLDS: &[&str] = &[
    ".tk", ".ml", ".ga", ".cf", ".gq", ".xyz", ".top", ".zip", ".mov",
];

/// (brand, lookalike) pairs. A hit requires the lookalike token without the
/// real brand token anywhere in the URL.
static BRAND_LOOKALIKES: &[(&str, &str)] = &[
    ("paypal", "paypa1"),
    ("google", "g00gle"),
    ("microsoft", "micosoft"),
    ("apple", "app1e"),
    ("facebook", "faceb00k"),
    ("amazon", "amaz0n"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlVerdict {
    pub risk_level: RiskLevel,
    pub risk_percentage: u32,
    pub explanation: String,
    pub indicators: Vec<String>,
    pub recommendation: String,
}

/// Score a URL against the phishing rule table and band the result.
pub fn analyze_url(url: &str) -> UrlVerdict {
    if url.is_empty() {
        return UrlVerdict {
            risk_level: RiskLevel::Safe,
            risk_percentage: 0,
            explanation: "This URL appears to be safe based on our current analysis.".to_string(),
            indicators: Vec::new(),
            recommendation:
                "You can proceed, but always remain cautious when entering sensitive information."
                    .to_string(),
        };
    }

    let url_lower = url.to_lowercase();
    let mut score: u32 = 0;
    let mut indicators: Vec<String> = Vec::new();

    if IP_LITERAL.is_match(url) {
        score += 40;
        indicators
            .push("Uses an IP address instead of a domain name (common in phishing)".to_string());
    }

    let found_keywords: Vec<&str> = SUSPICIOUS_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| url_lower.contains(keyword))
        .collect();
    if !found_keywords.is_empty() {
        score += 15 * found_keywords.len() as u32;
        indicators.push(format!(
            "Contains suspicious keywords: {}",
            found_keywords.join(", ")
        ));
    }

    if url.len() > 75 {
        score += 15;
        indicators.push("Unusually long URL (often used to hide the actual domain)".to_string());
    }

    if SUSPICIOUS_TLDS
        .iter()
        .any(|tld| url_lower.ends_with(tld) || url_lower.contains(&format!("{tld}/")))
    {
        score += 25;
        indicators.push(
            "Uses a top-level domain frequently associated with malicious activity".to_string(),
        );
    }

    for (brand, fake) in BRAND_LOOKALIKES {
        if url_lower.contains(fake) && !url_lower.contains(brand) {
            score += 50;
            indicators.push(format!(
                "Possible impersonation of {brand} (found \"{fake}\")"
            ));
        }
    }

    // Domain part is the third slash-delimited segment; absent for
    // scheme-less input, which leaves the subdomain count negative.
    let domain_part = url.split('/').nth(2).unwrap_or("");
    let subdomains = domain_part.split('.').count() as i32 - 2;
    if subdomains > 3 {
        score += 20;
        indicators.push("Excessive number of subdomains detected".to_string());
    }

    if domain_part.matches('-').count() > 3 {
        score += 15;
        indicators.push("Large number of hyphens in domain name".to_string());
    }

    if url.starts_with("http://") {
        score += 10;
        indicators.push("Uses unencrypted HTTP instead of HTTPS".to_string());
    }

    let (risk_level, explanation, recommendation) = band(score);

    UrlVerdict {
        risk_level,
        risk_percentage: score.min(100),
        explanation: explanation.to_string(),
        indicators,
        recommendation: recommendation.to_string(),
    }
}

fn band(score: u32) -> (RiskLevel, &'static str, &'static str) {
    if score >= 80 {
        (
            RiskLevel::Critical,
            "This URL shows multiple high-risk indicators common in severe phishing or malware attacks.",
            "⚠️ DO NOT CLICK! This link is extremely dangerous. Close the page immediately.",
        )
    } else if score >= 50 {
        (
            RiskLevel::High,
            "This URL is highly suspicious and matches known phishing patterns.",
            "Avoid clicking this link. If you must, verify the source through official channels first.",
        )
    } else if score >= 30 {
        (
            RiskLevel::Medium,
            "Several suspicious elements were detected that are often found in deceptive links.",
            "Be cautious. Check if you were expecting this link and if the sender is trustworthy.",
        )
    } else if score >= 15 {
        (
            RiskLevel::Low,
            "A few minor red flags were detected, though the link might be legitimate.",
            "Use caution and double-check the website once it loads.",
        )
    } else {
        (
            RiskLevel::Safe,
            "No significant threat indicators were found for this URL.",
            "This link appears safe, but always practice good cybersecurity hygiene.",
        )
    }
}
