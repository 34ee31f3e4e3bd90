use crate::domain::model::{ScanKind, ScanResult, StatusLabel};
use serde::Serialize;

pub const BRAND: &str = "TrustMona";
pub const POWERED_BY: &str = "TrustMona AI";
pub const MESSAGE_SCAN_TYPE: &str = "message_scan";

/// Public JSON shape shared by `/scan` and `/scan-text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub brand: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub status: &'static str,
    pub status_label: StatusLabel,
    pub mona_score: u8,
    pub ai_risk_level: &'static str,
    pub reasons: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scan_type: Option<&'static str>,
    pub powered_by: &'static str,
}

pub fn format_response(result: ScanResult, kind: ScanKind) -> ScanResponse {
    let (domain, scan_type) = match kind {
        ScanKind::Url => (result.domain, None),
        ScanKind::Text => (None, Some(MESSAGE_SCAN_TYPE)),
    };

    ScanResponse {
        brand: BRAND,
        domain,
        status: result.status_label.display(),
        status_label: result.status_label,
        mona_score: result.trust_score,
        ai_risk_level: result.risk_level.as_str(),
        reasons: result.reasons,
        scan_type,
        powered_by: POWERED_BY,
    }
}
