pub mod aggregator;
pub mod formatter;
pub mod normalizer;
pub mod prompts;
pub mod scanner;

pub use crate::domain::model::{
    DomainAgeSignal, DomainRecord, FeedbackReport, ProviderSignal, RiskLevel, ScanKind,
    ScanRequest, ScanResult, StatusLabel,
};
pub use crate::domain::ports::{ConfigProvider, DomainLookup, ModelInference, ReportStore};
pub use crate::utils::error::Result;
