use serde::Deserialize;

use crate::error::RouterError;

/// The fields a model answer must carry, checked for type at the boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVerdict {
    pub protocol_name: String,
    pub expected_yield: f64,
    pub reasoning: String,
    pub confidence: f64,
}

/// First balanced `{...}` span in `text`. Braces inside JSON string
/// literals are ignored. A `{` that never closes is skipped and the scan
/// resumes at the next one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.match_indices('{')
        .find_map(|(start, _)| balanced_from(&text[start..]))
}

/// The balanced span opening at the first byte of `text`, if it closes.
fn balanced_from(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Locate and validate the verdict inside free-form model output.
pub fn parse_verdict(text: &str) -> Result<ModelVerdict, RouterError> {
    let json = extract_json_object(text)
        .ok_or_else(|| RouterError::ParseFailed("No JSON found in AI response".to_string()))?;
    let verdict: ModelVerdict = serde_json::from_str(json)?;
    if !verdict.expected_yield.is_finite() || !verdict.confidence.is_finite() {
        return Err(RouterError::ParseFailed(
            "Non-finite number in AI response".to_string(),
        ));
    }
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_from_prose() {
        let text = r#"Sure! Here is my pick:
{"protocolName": "Aave", "expectedYield": 5.8, "reasoning": "stable", "confidence": 80}
Let me know if you need anything else {or not}."#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"protocolName": "Aave", "expectedYield": 5.8, "reasoning": "stable", "confidence": 80}"#)
        );
    }

    #[test]
    fn test_extract_json_object_nested_and_strings() {
        let text = r#"```json
{"a": {"b": 1}, "s": "curly } inside \" quote {"}
```"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"a": {"b": 1}, "s": "curly } inside \" quote {"}"#)
        );
    }

    #[test]
    fn test_extract_json_object_unbalanced() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object(r#"{"protocolName": "Aave""#), None);
    }

    #[test]
    fn test_extract_json_object_skips_unclosed_brace() {
        let text = r#"{oops, let me try again: {"protocolName": "Aave", "confidence": 80}"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"protocolName": "Aave", "confidence": 80}"#)
        );
    }

    #[test]
    fn test_parse_verdict() {
        let verdict = parse_verdict(
            r#"Recommendation: {"protocolName": "Curve Finance", "expectedYield": 6.5, "reasoning": "deep liquidity", "confidence": 72} Thanks."#,
        )
        .unwrap();
        assert_eq!(verdict.protocol_name, "Curve Finance");
        assert_eq!(verdict.expected_yield, 6.5);
        assert_eq!(verdict.confidence, 72.0);
    }

    #[test]
    fn test_parse_verdict_rejects_wrong_types() {
        let missing = parse_verdict(r#"{"protocolName": "Aave", "expectedYield": 5.8}"#);
        assert!(matches!(missing, Err(RouterError::ParseFailed(_))));

        let wrong_type = parse_verdict(
            r#"{"protocolName": "Aave", "expectedYield": "5.8%", "reasoning": "r", "confidence": 80}"#,
        );
        assert!(matches!(wrong_type, Err(RouterError::ParseFailed(_))));

        assert!(matches!(parse_verdict("I cannot help"), Err(RouterError::ParseFailed(_))));
    }
}
