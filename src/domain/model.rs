use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which endpoint a scan came in through. Selects the fallback score and
/// whether domain age takes part in aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Url,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRequest {
    Url { url: String },
    Text { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Verdict returned by the model-inference collaborator, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSignal {
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainAgeSignal {
    pub age_years: Option<f64>,
}

/// Raw registration record as far as scoring cares about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRecord {
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusLabel {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl StatusLabel {
    pub fn from_trust_score(score: u8) -> Self {
        if score < 40 {
            StatusLabel::HighRisk
        } else if score < 70 {
            StatusLabel::MediumRisk
        } else {
            StatusLabel::LowRisk
        }
    }

    /// Human-facing label with its severity glyph.
    pub fn display(&self) -> &'static str {
        match self {
            StatusLabel::HighRisk => "🚨 High Scam Risk",
            StatusLabel::MediumRisk => "⚠️ Medium Risk",
            StatusLabel::LowRisk => "✅ Low Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub trust_score: u8,
    pub status_label: StatusLabel,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub domain: Option<String>,
}

/// User feedback on a scan, as persisted by the report store.
///
/// Field values are kept as the client sent them; the reports table decides
/// what it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub url: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mona_score: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_risk_level: Option<Value>,
    pub user_vote: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label_boundaries() {
        assert_eq!(StatusLabel::from_trust_score(0), StatusLabel::HighRisk);
        assert_eq!(StatusLabel::from_trust_score(39), StatusLabel::HighRisk);
        assert_eq!(StatusLabel::from_trust_score(40), StatusLabel::MediumRisk);
        assert_eq!(StatusLabel::from_trust_score(69), StatusLabel::MediumRisk);
        assert_eq!(StatusLabel::from_trust_score(70), StatusLabel::LowRisk);
        assert_eq!(StatusLabel::from_trust_score(100), StatusLabel::LowRisk);
    }

    #[test]
    fn test_status_label_serializes_kebab_case() {
        let json = serde_json::to_string(&StatusLabel::MediumRisk).unwrap();
        assert_eq!(json, "\"medium-risk\"");
    }

    #[test]
    fn test_feedback_report_uses_camel_case_keys() {
        let report = FeedbackReport {
            url: Value::from("https://example.com"),
            mona_score: Some(Value::from(72.5)),
            ai_risk_level: Some(Value::from("low")),
            user_vote: Value::from("safe"),
            comment: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["monaScore"], 72.5);
        assert_eq!(value["aiRiskLevel"], "low");
        assert_eq!(value["userVote"], "safe");
        assert!(value.get("comment").is_none());
    }
}
