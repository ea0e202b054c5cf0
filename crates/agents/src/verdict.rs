//! Decoding of LLM relation verdicts.

use causalflow_core::{Error, Judgment, Result};
use serde::Deserialize;

/// Structured verdict the relation prompt asks the model to emit.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationVerdict {
    /// Relation label: a_causes_b, b_causes_a, or no_relation.
    pub relation: String,

    /// Model-reported confidence in [0, 1].
    #[serde(default)]
    pub confidence: f32,

    /// Short causal rationale.
    #[serde(default)]
    pub rationale: String,
}

impl RelationVerdict {
    /// Judgment for this verdict, if the label is inside the domain.
    pub fn judgment(&self) -> Result<Judgment> {
        Judgment::parse_lenient(&self.relation).ok_or_else(|| {
            Error::agent(format!(
                "relation label outside the judgment domain: '{}'",
                self.relation
            ))
        })
    }
}

/// Decode a verdict from a raw model reply.
///
/// Accepts the bare JSON object, a reply with surrounding prose, or a fenced
/// code block; falls back to keyword matching on the whole reply when no JSON
/// object decodes.
pub fn decode_verdict(reply: &str) -> Result<RelationVerdict> {
    if let Some(json) = extract_json_object(reply) {
        if let Ok(verdict) = serde_json::from_str::<RelationVerdict>(&json) {
            return Ok(verdict);
        }
    }

    match Judgment::parse_lenient(reply) {
        Some(judgment) => Ok(RelationVerdict {
            relation: judgment.as_str().to_string(),
            confidence: 0.0,
            rationale: String::new(),
        }),
        None => Err(Error::agent(format!(
            "could not decode relation verdict from reply: {}",
            truncated(reply)
        ))),
    }
}

/// First balanced JSON object in the text.
pub(crate) fn extract_json_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + offset + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn truncated(reply: &str) -> &str {
    let mut end = reply.len().min(120);
    while !reply.is_char_boundary(end) {
        end -= 1;
    }
    &reply[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_json() {
        let verdict = decode_verdict(
            r#"{"relation":"a_causes_b","confidence":0.85,"rationale":"mechanism"}"#,
        )
        .unwrap();
        assert_eq!(verdict.judgment().unwrap(), Judgment::ACausesB);
        assert!((verdict.confidence - 0.85).abs() < f32::EPSILON);
        assert_eq!(verdict.rationale, "mechanism");
    }

    #[test]
    fn test_decode_json_wrapped_in_prose() {
        let reply = "Based on the evidence, here is my verdict:\n\
            ```json\n{\"relation\": \"b_causes_a\", \"confidence\": 0.6, \"rationale\": \"reverse\"}\n```\n\
            Let me know if you need more detail.";
        let verdict = decode_verdict(reply).unwrap();
        assert_eq!(verdict.judgment().unwrap(), Judgment::BCausesA);
    }

    #[test]
    fn test_decode_handles_braces_inside_strings() {
        let reply = r#"{"relation":"no_relation","confidence":0.4,"rationale":"set {a, b} is independent"}"#;
        let verdict = decode_verdict(reply).unwrap();
        assert_eq!(verdict.judgment().unwrap(), Judgment::NoRelation);
        assert!(verdict.rationale.contains("{a, b}"));
    }

    #[test]
    fn test_keyword_fallback() {
        let verdict = decode_verdict("I am fairly sure that A causes B in this setting.").unwrap();
        assert_eq!(verdict.judgment().unwrap(), Judgment::ACausesB);
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn test_undecodable_reply_is_an_error() {
        assert!(decode_verdict("the weather is nice today").is_err());
    }

    #[test]
    fn test_bidirectional_label_is_rejected() {
        let verdict =
            decode_verdict(r#"{"relation":"bidirectional","confidence":0.9,"rationale":"loop"}"#)
                .unwrap();
        assert!(verdict.judgment().is_err());
    }
}
