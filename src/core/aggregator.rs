use crate::domain::model::{DomainAgeSignal, ProviderSignal, ScanResult, StatusLabel};

/// Penalty for a domain registered less than a year ago.
pub const NEW_DOMAIN_PENALTY: f64 = 25.0;

/// Share of the model's risk score that counts against a URL.
pub const URL_MODEL_WEIGHT: f64 = 0.6;

fn clamp_trust(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

pub fn aggregate_url(domain: &str, age: DomainAgeSignal, signal: ProviderSignal) -> ScanResult {
    let mut risk = 0.0;
    let mut reasons = Vec::with_capacity(signal.reasons.len() + 1);

    match age.age_years {
        Some(years) if years < 1.0 => {
            risk += NEW_DOMAIN_PENALTY;
            reasons.push("Very new domain".to_string());
        }
        Some(years) => reasons.push(format!("Domain age: {:.1} years", years)),
        None => reasons.push("Domain age unavailable".to_string()),
    }

    risk += f64::from(signal.risk_score) * URL_MODEL_WEIGHT;
    let trust_score = clamp_trust(100.0 - risk);

    reasons.extend(signal.reasons);

    ScanResult {
        trust_score,
        status_label: StatusLabel::from_trust_score(trust_score),
        risk_level: signal.risk_level,
        reasons,
        domain: Some(domain.to_string()),
    }
}

pub fn aggregate_text(signal: ProviderSignal) -> ScanResult {
    let trust_score = 100u8.saturating_sub(signal.risk_score.min(100));

    ScanResult {
        trust_score,
        status_label: StatusLabel::from_trust_score(trust_score),
        risk_level: signal.risk_level,
        reasons: signal.reasons,
        domain: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RiskLevel;

    fn signal(score: u8, reasons: &[&str]) -> ProviderSignal {
        ProviderSignal {
            risk_level: RiskLevel::Medium,
            risk_score: score,
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn aged(years: f64) -> DomainAgeSignal {
        DomainAgeSignal {
            age_years: Some(years),
        }
    }

    #[test]
    fn test_url_new_domain_penalty() {
        let result = aggregate_url("new.example", aged(0.5), signal(50, &["Suspicious TLD"]));
        // 100 - 25 - 30
        assert_eq!(result.trust_score, 45);
        assert_eq!(result.status_label, StatusLabel::MediumRisk);
        assert_eq!(result.reasons, vec!["Very new domain", "Suspicious TLD"]);
        assert_eq!(result.domain.as_deref(), Some("new.example"));
    }

    #[test]
    fn test_url_established_domain() {
        let result = aggregate_url("example.com", aged(12.345), signal(10, &["Well known"]));
        assert_eq!(result.trust_score, 94);
        assert_eq!(result.status_label, StatusLabel::LowRisk);
        assert_eq!(result.reasons, vec!["Domain age: 12.3 years", "Well known"]);
    }

    #[test]
    fn test_url_age_unavailable_reason_comes_first() {
        let result = aggregate_url(
            "example.com",
            DomainAgeSignal { age_years: None },
            signal(30, &["AI API request failed"]),
        );
        assert_eq!(result.trust_score, 82);
        assert_eq!(
            result.reasons,
            vec!["Domain age unavailable", "AI API request failed"]
        );
    }

    #[test]
    fn test_url_rounds_only_at_the_end() {
        // 100 - 33 * 0.6 = 80.2
        assert_eq!(aggregate_url("a.b", aged(3.0), signal(33, &[])).trust_score, 80);
        // 100 - 25 - 41 * 0.6 = 50.4
        assert_eq!(aggregate_url("a.b", aged(0.1), signal(41, &[])).trust_score, 50);
        // 100 - 25 - 74 * 0.6 = 30.6
        assert_eq!(aggregate_url("a.b", aged(0.1), signal(74, &[])).trust_score, 31);
    }

    #[test]
    fn test_url_worst_case_score() {
        // 100 - 25 - 100 * 0.6
        let result = aggregate_url("scam.example", aged(0.01), signal(100, &[]));
        assert_eq!(result.trust_score, 15);
        assert_eq!(result.status_label, StatusLabel::HighRisk);
    }

    #[test]
    fn test_clamp_trust_floors_and_caps() {
        assert_eq!(clamp_trust(-12.4), 0);
        assert_eq!(clamp_trust(-0.4), 0);
        assert_eq!(clamp_trust(130.0), 100);
        assert_eq!(clamp_trust(99.6), 100);
        assert_eq!(clamp_trust(49.5), 50);
    }

    #[test]
    fn test_text_subtracts_raw_score() {
        let result = aggregate_text(signal(61, &["Upfront fee"]));
        assert_eq!(result.trust_score, 39);
        assert_eq!(result.status_label, StatusLabel::HighRisk);
        assert_eq!(result.reasons, vec!["Upfront fee"]);
        assert_eq!(result.domain, None);

        assert_eq!(aggregate_text(signal(60, &[])).status_label, StatusLabel::MediumRisk);
        assert_eq!(aggregate_text(signal(30, &[])).status_label, StatusLabel::LowRisk);
        assert_eq!(aggregate_text(signal(100, &[])).trust_score, 0);
        assert_eq!(aggregate_text(signal(0, &[])).trust_score, 100);
    }
}
