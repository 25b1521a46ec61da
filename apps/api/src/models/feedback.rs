//! ATS scoring result returned by the oracle.
//!
//! Field names mirror the oracle's JSON contract exactly (camelCase, literal
//! "ATS"), so the value round-trips between the LLM response, the JSONB
//! column and API responses without translation. Scores are opaque integers
//! supplied by the oracle; no relationship between the overall score and the
//! category scores is computed or enforced.

use serde::{Deserialize, Serialize};

pub const FALLBACK_SCORE: u8 = 70;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "overallScore")]
    pub overall_score: u8,
    #[serde(rename = "ATS")]
    pub ats: CategoryFeedback,
    #[serde(rename = "toneAndStyle")]
    pub tone_and_style: CategoryFeedback,
    pub content: CategoryFeedback,
    pub structure: CategoryFeedback,
    pub skills: CategoryFeedback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedback {
    pub score: u8,
    pub tips: Vec<Tip>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    #[serde(rename = "type")]
    pub kind: TipKind,
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Good,
    Improve,
}

impl Feedback {
    /// Fixed feedback persisted when the oracle call fails. The record must
    /// never stay in the pending (NULL feedback) state after upload.
    pub fn fallback() -> Self {
        let plain = |score| CategoryFeedback {
            score,
            tips: Vec::new(),
        };
        Feedback {
            overall_score: FALLBACK_SCORE,
            ats: CategoryFeedback {
                score: FALLBACK_SCORE,
                tips: vec![Tip {
                    kind: TipKind::Improve,
                    tip: "Automated analysis was unavailable for this upload. \
                          The resume was saved; try the review again later."
                        .to_string(),
                    explanation: None,
                }],
            },
            tone_and_style: plain(FALLBACK_SCORE),
            content: plain(FALLBACK_SCORE),
            structure: plain(FALLBACK_SCORE),
            skills: plain(FALLBACK_SCORE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_oracle_field_names() {
        let json = serde_json::to_value(Feedback::fallback()).unwrap();
        assert_eq!(json["overallScore"], 70);
        assert!(json.get("ATS").is_some());
        assert!(json.get("toneAndStyle").is_some());
        assert_eq!(json["ATS"]["tips"][0]["type"], "improve");
    }

    #[test]
    fn test_deserializes_oracle_response() {
        let raw = r#"{
            "overallScore": 83,
            "ATS": {"score": 90, "tips": [{"type": "good", "tip": "Clean headings"}]},
            "toneAndStyle": {"score": 80, "tips": []},
            "content": {"score": 85, "tips": [{"type": "improve", "tip": "Quantify impact", "explanation": "Numbers read better"}]},
            "structure": {"score": 78, "tips": []},
            "skills": {"score": 88, "tips": []}
        }"#;
        let feedback: Feedback = serde_json::from_str(raw).unwrap();
        assert_eq!(feedback.overall_score, 83);
        assert_eq!(feedback.ats.score, 90);
        assert_eq!(feedback.ats.tips[0].kind, TipKind::Good);
        assert_eq!(feedback.ats.tips[0].explanation, None);
        assert_eq!(
            feedback.content.tips[0].explanation.as_deref(),
            Some("Numbers read better")
        );
    }

    #[test]
    fn test_fallback_has_fixed_overall_score() {
        assert_eq!(Feedback::fallback().overall_score, FALLBACK_SCORE);
        assert_eq!(Feedback::fallback().ats.tips.len(), 1);
    }
}
