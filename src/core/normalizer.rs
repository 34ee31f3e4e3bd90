//! Turns raw collaborator output into bounded, typed signals.
//!
//! Nothing in here fails: a lookup or model call that errored, or returned
//! something unusable, becomes an absent age or a fixed fallback verdict.

use crate::domain::model::{DomainAgeSignal, DomainRecord, ProviderSignal, RiskLevel, ScanKind};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.0;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"));

static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").expect("code fence pattern is valid")
});

/// Strips a leading `http://` or `https://` and cuts at the first `/`.
pub fn extract_domain(url: &str) -> String {
    let without_scheme = SCHEME_RE.replace(url.trim(), "");
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn normalize_domain_age(lookup: Result<DomainRecord>, now: DateTime<Utc>) -> DomainAgeSignal {
    let record = match lookup {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("Domain lookup failed: {}", e);
            return DomainAgeSignal { age_years: None };
        }
    };

    let created = record.created_date.as_deref().and_then(|raw| {
        let parsed = parse_created_date(raw);
        if parsed.is_none() {
            tracing::warn!("Unrecognised domain creation date: {}", raw);
        }
        parsed
    });

    DomainAgeSignal {
        age_years: created
            .map(|created| (now - created).num_milliseconds() as f64 / MILLIS_PER_YEAR),
    }
}

/// Accepts the timestamp shapes WHOIS registries commonly hand back.
pub fn parse_created_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S UTC") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[derive(Debug, Deserialize)]
struct ModelVerdict {
    risk_level: RiskLevel,
    #[serde(deserialize_with = "number_or_numeric_string")]
    risk_score: f64,
    #[serde(default)]
    reasons: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreRepr {
    Number(f64),
    Text(String),
}

/// Models sometimes quote the score (`"85"`); accept that, but only for finite numbers.
fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match ScoreRepr::deserialize(deserializer)? {
        ScoreRepr::Number(n) => n,
        ScoreRepr::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom)?,
    };
    if !score.is_finite() {
        return Err(serde::de::Error::custom("risk_score is not a finite number"));
    }
    Ok(score)
}

enum FallbackCause {
    Unparseable,
    Unavailable,
}

fn fallback_signal(kind: ScanKind, cause: FallbackCause) -> ProviderSignal {
    let (risk_score, reason) = match (kind, cause) {
        (ScanKind::Text, FallbackCause::Unparseable) => (40, "AI output could not be parsed"),
        (ScanKind::Text, FallbackCause::Unavailable) => (40, "AI service unavailable"),
        (ScanKind::Url, FallbackCause::Unparseable) => (30, "AI output parse failed"),
        (ScanKind::Url, FallbackCause::Unavailable) => (30, "AI API request failed"),
    };
    ProviderSignal {
        risk_level: RiskLevel::Medium,
        risk_score,
        reasons: vec![reason.to_string()],
    }
}

/// Out-of-range scores are clamped into [0, 100] before anything weights them.
fn clamp_risk_score(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}

fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

pub fn normalize_model_signal(completion: Result<String>, kind: ScanKind) -> ProviderSignal {
    let text = match completion {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Model inference failed: {}", e);
            return fallback_signal(kind, FallbackCause::Unavailable);
        }
    };

    let body = strip_code_fence(text.trim());
    match serde_json::from_str::<ModelVerdict>(body) {
        Ok(verdict) => ProviderSignal {
            risk_level: verdict.risk_level,
            risk_score: clamp_risk_score(verdict.risk_score),
            reasons: verdict.reasons,
        },
        Err(e) => {
            tracing::warn!(raw = %text, "Model output was not a valid verdict: {}", e);
            fallback_signal(kind, FallbackCause::Unparseable)
        }
    }
}
