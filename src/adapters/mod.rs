// Adapters layer: concrete clients for the external collaborators behind the domain ports.

pub mod http;
pub mod openai;
pub mod supabase;
pub mod whois;

pub use openai::OpenAiClient;
pub use supabase::SupabaseReportStore;
pub use whois::WhoisXmlClient;
