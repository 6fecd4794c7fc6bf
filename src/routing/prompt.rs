use super::candidates::CandidateProtocol;
use super::UserPreferences;

fn describe_candidates(candidates: &[CandidateProtocol]) -> String {
    candidates
        .iter()
        .map(|c| {
            format!(
                "Protocol: {}\n- APY: {}%\n- Total Value Locked: {:.2} tokens\n- Active Users: {}\n- Contract: {}\n- Status: {}",
                c.name,
                c.apy(),
                c.tvl(),
                c.user_count,
                c.contract_address,
                if c.is_active { "Active" } else { "Inactive" }
            )
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Prompt asking the model to pick one of `candidates` for `amount_tokens`.
pub fn build_prompt(
    amount_tokens: &str,
    preferences: &UserPreferences,
    candidates: &[CandidateProtocol],
) -> String {
    let preferred = preferences
        .preferred_protocols
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(|p| p.join(", "))
        .unwrap_or_else(|| "None specified".to_string());

    format!(
        r#"You are a DeFi investment advisor AI. Analyze the following protocols and recommend the best investment option.

Investment Details:
- Amount: {amount} tokens
- Risk Tolerance: {risk}
- Investment Duration: {duration}
- Preferred Protocols: {preferred}

Available Protocols:
{protocols}

Please analyze these protocols considering:
1. APY (Annual Percentage Yield)
2. Total Value Locked (TVL) as a measure of protocol stability
3. Number of active users as a measure of trust
4. Risk vs reward ratio
5. User's risk tolerance and investment duration

Provide your recommendation in the following JSON format:
{{
  "protocolName": "Protocol Name",
  "expectedYield": number (APY as percentage),
  "reasoning": "Detailed explanation of why this protocol is recommended",
  "confidence": number (0-100, confidence in recommendation)
}}

Only return the JSON object, no additional text."#,
        amount = amount_tokens,
        risk = preferences.risk_tolerance.as_deref().unwrap_or("medium"),
        duration = preferences.investment_duration.as_deref().unwrap_or("medium"),
        preferred = preferred,
        protocols = describe_candidates(candidates),
    )
}
