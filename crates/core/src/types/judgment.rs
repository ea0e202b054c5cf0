//! Pairwise causal judgment domain.

use serde::{Deserialize, Serialize};

/// Outcome of judging one unordered pair of variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    /// The first variable causes the second (A → B).
    ACausesB,

    /// The second variable causes the first (B → A).
    BCausesA,

    /// No direct causal relation between the pair.
    NoRelation,
}

impl Judgment {
    /// Lenient parse of a model-produced relation label.
    ///
    /// Returns None for anything outside the three-value domain, including
    /// "bidirectional" replies.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if lower.contains("a_causes_b") || lower.contains("a causes b") {
            Some(Self::ACausesB)
        } else if lower.contains("b_causes_a") || lower.contains("b causes a") {
            Some(Self::BCausesA)
        } else if lower.contains("no_relation")
            || lower.contains("no relation")
            || lower.contains("none")
        {
            Some(Self::NoRelation)
        } else {
            None
        }
    }

    /// Whether this judgment installs an edge.
    pub fn is_causal(&self) -> bool {
        !matches!(self, Self::NoRelation)
    }

    /// Canonical label used in logs and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ACausesB => "a_causes_b",
            Self::BCausesA => "b_causes_a",
            Self::NoRelation => "no_relation",
        }
    }
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_labels() {
        assert_eq!(Judgment::parse_lenient("a_causes_b"), Some(Judgment::ACausesB));
        assert_eq!(Judgment::parse_lenient("B_CAUSES_A"), Some(Judgment::BCausesA));
        assert_eq!(
            Judgment::parse_lenient("no_relation"),
            Some(Judgment::NoRelation)
        );
    }

    #[test]
    fn test_parse_prose_labels() {
        assert_eq!(
            Judgment::parse_lenient("I believe A causes B here"),
            Some(Judgment::ACausesB)
        );
        assert_eq!(Judgment::parse_lenient("none"), Some(Judgment::NoRelation));
    }

    #[test]
    fn test_bidirectional_is_outside_the_domain() {
        assert_eq!(Judgment::parse_lenient("bidirectional"), None);
        assert_eq!(Judgment::parse_lenient("mutual feedback loop"), None);
    }

    #[test]
    fn test_serde_labels_round_trip() {
        let encoded = serde_json::to_string(&Judgment::ACausesB).unwrap();
        assert_eq!(encoded, "\"a_causes_b\"");
        let decoded: Judgment = serde_json::from_str("\"no_relation\"").unwrap();
        assert_eq!(decoded, Judgment::NoRelation);
    }
}
