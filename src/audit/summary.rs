use serde::{Deserialize, Serialize};

/// Overall severity of an audit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of a single recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Duplicate,
    Moodboard,
    Svg,
    Unused,
    Component,
    Animation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub action: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, priority: Priority, message: String, action: &str) -> Self {
        Self {
            kind,
            priority,
            message,
            action: action.to_string(),
        }
    }
}

/// Merged counts of every detector that ran
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditSummary {
    pub content_duplicates: usize,
    pub name_duplicates: usize,
    pub similar_names: usize,
    pub unused_images: usize,
    pub unused_components: usize,
    pub unused_animations: usize,
    pub moodboard_duplicates: usize,
    pub svg_exact_duplicates: usize,
    pub svg_normalized_duplicates: usize,
    pub total_wasted_space: u64,
    pub total_unused_size: u64,
    pub severity: Severity,
}

impl AuditSummary {
    /// First matching rule wins: content duplicates, then moodboard or exact SVG duplicates
    pub fn compute_severity(&self) -> Severity {
        if self.content_duplicates > 0 {
            Severity::High
        } else if self.moodboard_duplicates > 0 || self.svg_exact_duplicates > 0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Recommendations for every category with findings, highest priority first
    pub fn recommendations(&self, unused_image_threshold: usize) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if self.content_duplicates > 0 {
            recommendations.push(Recommendation::new(
                RecommendationKind::Duplicate,
                Priority::High,
                format!(
                    "Found {} content-based duplicate groups. Consider removing duplicates to save space.",
                    self.content_duplicates
                ),
                "Run `assetaudit clean --duplicates-only` to remove duplicates",
            ));
        }

        if self.moodboard_duplicates > 0 {
            recommendations.push(Recommendation::new(
                RecommendationKind::Moodboard,
                Priority::Medium,
                format!(
                    "Found {} duplicate moodboard files. Review and consolidate.",
                    self.moodboard_duplicates
                ),
                "Review moodboard-duplicates-report.json and remove duplicates",
            ));
        }

        if self.svg_exact_duplicates > 0 {
            recommendations.push(Recommendation::new(
                RecommendationKind::Svg,
                Priority::Medium,
                format!("Found {} exact SVG duplicates.", self.svg_exact_duplicates),
                "Review svg-duplicates-report.json and remove duplicates",
            ));
        }

        if self.unused_images > 0 && self.unused_images > unused_image_threshold {
            recommendations.push(Recommendation::new(
                RecommendationKind::Unused,
                Priority::Low,
                format!(
                    "Found {} unused images. Consider removing them to reduce bundle size.",
                    self.unused_images
                ),
                "Review unused-assets-report.json and remove unused images",
            ));
        }

        if self.unused_components > 0 {
            recommendations.push(Recommendation::new(
                RecommendationKind::Component,
                Priority::Low,
                format!("Found {} unused components.", self.unused_components),
                "Review unused-assets-report.json and delete them manually",
            ));
        }

        if self.unused_animations > 0 {
            recommendations.push(Recommendation::new(
                RecommendationKind::Animation,
                Priority::Low,
                format!("Found {} unused animation components.", self.unused_animations),
                "Review unused-assets-report.json and consider removing or using them",
            ));
        }

        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        recommendations
    }
}
