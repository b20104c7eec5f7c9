use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Safe,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyCategory {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub status: CategoryStatus,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyReport {
    pub categories: Vec<PrivacyCategory>,
}

/// Produce the fixed privacy-category template for a profile URL. The only
/// dynamic part is the first category, swapped by a coarse platform match;
/// no actual profile inspection takes place.
pub fn analyze_privacy(url: &str) -> PrivacyReport {
    let mut categories = vec![
        PrivacyCategory {
            id: "visibility".to_string(),
            title: "Profile Visibility".to_string(),
            icon: "⚠️".to_string(),
            status: CategoryStatus::Warning,
            issues: vec![
                "Profile is public".to_string(),
                "Location sharing enabled".to_string(),
            ],
            recommendations: vec![
                "Set profile to private".to_string(),
                "Disable location sharing".to_string(),
            ],
        },
        PrivacyCategory {
            id: "contact".to_string(),
            title: "Contact Information".to_string(),
            icon: "✓".to_string(),
            status: CategoryStatus::Safe,
            issues: Vec::new(),
            recommendations: vec!["Keep current settings".to_string()],
        },
        PrivacyCategory {
            id: "tracking".to_string(),
            title: "Activity Tracking".to_string(),
            icon: "⚠️".to_string(),
            status: CategoryStatus::Warning,
            issues: vec![
                "Activity status visible".to_string(),
                "Online status shown".to_string(),
            ],
            recommendations: vec![
                "Hide activity status".to_string(),
                "Disable online indicators".to_string(),
            ],
        },
    ];

    if url.contains("facebook") || url.contains("fb.com") {
        categories[0].issues = vec![
            "Friends list is public".to_string(),
            "Posts are visible to everyone".to_string(),
        ];
        categories[0].recommendations = vec![
            "Change post privacy to Friends".to_string(),
            "Hide friends list".to_string(),
        ];
    } else if url.contains("github") {
        categories[0].issues = vec![
            "Email address is public".to_string(),
            "Organization membership is visible".to_string(),
        ];
        categories[0].recommendations = vec![
            "Hide your email in settings".to_string(),
            "Keep organization memberships private".to_string(),
        ];
    }

    PrivacyReport { categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_three_fixed_categories() {
        let report = analyze_privacy("https://example.com/profile");
        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories[0].id, "visibility");
        assert_eq!(report.categories[1].id, "contact");
        assert_eq!(report.categories[2].id, "tracking");
        assert_eq!(report.categories[0].status, CategoryStatus::Warning);
        assert_eq!(report.categories[1].status, CategoryStatus::Safe);
        assert_eq!(report.categories[2].status, CategoryStatus::Warning);
    }

    #[test]
    fn github_profiles_get_the_github_issue_set() {
        let report = analyze_privacy("https://github.com/someuser");
        assert!(report.categories[0]
            .issues
            .contains(&"Email address is public".to_string()));
    }

    #[test]
    fn facebook_profiles_get_the_facebook_issue_set() {
        let report = analyze_privacy("https://www.fb.com/someone");
        assert!(report.categories[0]
            .issues
            .contains(&"Friends list is public".to_string()));
    }

    #[test]
    fn unknown_platforms_fall_back_to_generic_defaults() {
        let report = analyze_privacy("https://example.com");
        assert!(report.categories[0]
            .issues
            .contains(&"Profile is public".to_string()));
        assert!(report.categories[0]
            .issues
            .contains(&"Location sharing enabled".to_string()));
    }

    #[test]
    fn empty_url_behaves_like_an_unknown_platform() {
        let report = analyze_privacy("");
        assert!(report.categories[0]
            .issues
            .contains(&"Profile is public".to_string()));
    }
}
