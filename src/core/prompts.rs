pub fn url_prompt(url: &str) -> String {
    format!(
        r#"
You are a TrustMona cybersecurity AI.
Analyze the following link and determine if it is a scam.
Return ONLY a JSON object like this:
{{
  "risk_level": "low",
  "risk_score": 0,
  "reasons": ["reason1","reason2"]
}}
Link: {url}
"#
    )
}

pub fn text_prompt(message: &str) -> String {
    format!(
        r#"
You are TrustMona AI, specialized in detecting scam messages.
Analyze the following text message.

Look for:
- Fake job offers
- Requests for upfront fees
- WhatsApp / Telegram scams
- Impersonation
- Crypto or investment fraud

Return ONLY valid JSON:
{{
  "risk_level": "low | medium | high",
  "risk_score": 0-100,
  "reasons": ["short reason 1", "short reason 2"]
}}

Message:
"""{message}"""
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_input() {
        assert!(url_prompt("https://x.example").contains("Link: https://x.example"));
        assert!(text_prompt("pay $50 first").contains("\"\"\"pay $50 first\"\"\""));
    }
}
