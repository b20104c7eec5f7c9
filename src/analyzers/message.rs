use crate::analyzers::RiskLevel;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "now",
    "hurry",
    "limited time",
    "expires",
    "last chance",
    "suspended",
    "blocked",
    "closed",
    "action required",
];

static FINANCIAL_KEYWORDS: &[&str] = &[
    "lottery",
    "winner",
    "won",
    "prize",
    "reward",
    "cash",
    "dollars",
    "bitcoin",
    "crypto",
    "bank",
    "account",
    "invoice",
    "payment",
    "refund",
    "tax",
    "irs",
    "gift card",
];

static SECURITY_KEYWORDS: &[&str] = &[
    "verify",
    "confirm",
    "otp",
    "password",
    "login",
    "security",
    "identity",
    "verification",
    "unauthorized",
    "suspicious activity",
];

static GENERIC_GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(sir|madam|dear customer|winner)\b").unwrap());

static SCAM_PHRASING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(kindly|please do the needful|congratulations)\b").unwrap());

// Deliberately case-sensitive: three or more consecutive capitals.
static EXCESSIVE_CAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3,}").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageVerdict {
    pub risk_level: RiskLevel,
    pub scam_probability: String,
    pub explanation: String,
    pub highlighted_words: Vec<String>,
    pub indicators: Vec<String>,
    pub recommendation: String,
}

/// Score a text message for scam and social-engineering patterns.
/// `simple_mode` selects the plain-language explanation wording.
pub fn analyze_message(message: &str, simple_mode: bool) -> MessageVerdict {
    if message.is_empty() {
        return MessageVerdict {
            risk_level: RiskLevel::Safe,
            scam_probability: "0%".to_string(),
            explanation: "This message shows no obvious signs of being a scam.".to_string(),
            highlighted_words: Vec::new(),
            indicators: Vec::new(),
            recommendation: "This message appears safe to engage with.".to_string(),
        };
    }

    let message_lower = message.to_lowercase();
    let mut score: u32 = 0;
    let mut indicators: Vec<String> = Vec::new();
    let mut highlighted_words: Vec<String> = Vec::new();

    fn highlight(words: &[&str], highlighted: &mut Vec<String>) {
        for word in words {
            if !highlighted.iter().any(|w| w == word) {
                highlighted.push(word.to_string());
            }
        }
    }

    let found_urgency: Vec<&str> = URGENCY_KEYWORDS
        .iter()
        .copied()
        .filter(|word| message_lower.contains(word))
        .collect();
    if !found_urgency.is_empty() {
        score += 15 * found_urgency.len() as u32;
        highlight(&found_urgency, &mut highlighted_words);
        indicators.push(
            "Creates a false sense of urgency or fear to make you act without thinking"
                .to_string(),
        );
    }

    let found_financial: Vec<&str> = FINANCIAL_KEYWORDS
        .iter()
        .copied()
        .filter(|word| message_lower.contains(word))
        .collect();
    if !found_financial.is_empty() {
        score += 15 * found_financial.len() as u32;
        highlight(&found_financial, &mut highlighted_words);
        indicators.push(
            "Offers suspicious rewards or mentions financial accounts to grab your attention"
                .to_string(),
        );
    }

    let found_security: Vec<&str> = SECURITY_KEYWORDS
        .iter()
        .copied()
        .filter(|word| message_lower.contains(word))
        .collect();
    if !found_security.is_empty() {
        score += 20 * found_security.len() as u32;
        highlight(&found_security, &mut highlighted_words);
        indicators.push("Asks for sensitive security information or verification codes".to_string());
    }

    if GENERIC_GREETING.is_match(message) {
        score += 10;
        indicators.push("Uses a generic greeting instead of your name".to_string());
    }
    if SCAM_PHRASING.is_match(message) {
        score += 15;
        indicators.push("Uses language commonly used in international scams".to_string());
    }
    if EXCESSIVE_CAPS.is_match(message) {
        score += 10;
        indicators.push("Uses excessive capitalization to create panic".to_string());
    }

    // Raw-string match, so an upper-cased "HTTP" does not count.
    if message.contains("http") || message.contains("bit.ly") || message.contains("t.co") {
        score += 20;
        indicators.push("Contains a link that might lead to a phishing website".to_string());
    }

    let (risk_level, explanation, recommendation) = band(score, simple_mode);

    MessageVerdict {
        risk_level,
        scam_probability: format!("{}%", score.min(100)),
        explanation: explanation.to_string(),
        highlighted_words,
        indicators,
        recommendation: recommendation.to_string(),
    }
}

fn band(score: u32, simple_mode: bool) -> (RiskLevel, &'static str, &'static str) {
    if score >= 80 {
        (
            RiskLevel::Critical,
            if simple_mode {
                "This is 100% a TRAP! Someone is trying to trick you into giving them your secrets. They are using scary words to make you panic."
            } else {
                "This message exhibits multiple high-confidence characteristic patterns of a phishing scam. It uses urgency and authority to manipulate the recipient."
            },
            "DO NOT reply. DO NOT click any links. Block the sender and delete the message.",
        )
    } else if score >= 50 {
        (
            RiskLevel::High,
            if simple_mode {
                "This looks very fishy! It talks about money or accounts in a way that feels like a trick."
            } else {
                "This message has a high probability of being a scam. The combination of keywords and tactics is very suspicious."
            },
            "Be extremely careful. Do not provide any information. If it claims to be from a company, contact them using their official website instead.",
        )
    } else if score >= 30 {
        (
            RiskLevel::Medium,
            if simple_mode {
                "Be careful! Some parts of this message are a bit strange and might be trying to trick you."
            } else {
                "This message contains some red flags. It might be legitimate, but it uses tactics often seen in marketing or low-level scams."
            },
            "Verify the sender's identity. If you didn't expect this message, treat it as suspicious.",
        )
    } else if score >= 10 {
        (
            RiskLevel::Low,
            if simple_mode {
                "This message is probably okay, but it's always good to stay alert!"
            } else {
                "Only minor suspicious elements were detected. It could be a generic marketing message."
            },
            "Use normal caution. If anything feels \"off\", don't click on links.",
        )
    } else {
        (
            RiskLevel::Safe,
            if simple_mode {
                "This message looks safe! No scary or tricky words found."
            } else {
                "No phishing indicators or scam patterns were detected in this message."
            },
            "This message appears to be safe.",
        )
    }
}
