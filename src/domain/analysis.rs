use serde::{Deserialize, Serialize};

use crate::app::{Result, ReviewLensError};

/// Pros, cons and suggestions produced by the language model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub name: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub suggest_what_improve: String,
    pub why_app_popular: String,
}

#[derive(Deserialize)]
struct AnalysisReply {
    app_analysis: AnalysisResult,
}

impl AnalysisResult {
    /// Decode a model reply of the form `{"app_analysis": {...}}`.
    pub fn from_reply(text: &str) -> Result<Self> {
        let reply: AnalysisReply = serde_json::from_str(text).map_err(|e| {
            ReviewLensError::Analysis(format!("malformed model reply: {}", e))
        })?;
        Ok(reply.app_analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reply() {
        let text = r#"{"app_analysis": {"name": "Liquid Player",
            "pros": ["No ads", "Easy to use"],
            "cons": ["Crashes on iPhone 5s"],
            "suggest_what_improve": "Fix crashes",
            "why_app_popular": "Simple"}}"#;
        let result = AnalysisResult::from_reply(text).unwrap();

        assert_eq!(result.name, "Liquid Player");
        assert_eq!(result.pros, vec!["No ads", "Easy to use"]);
        assert_eq!(result.cons.len(), 1);
        assert_eq!(result.suggest_what_improve, "Fix crashes");
    }

    #[test]
    fn test_from_reply_missing_fields_default() {
        let result = AnalysisResult::from_reply(r#"{"app_analysis": {"pros": ["a"]}}"#).unwrap();
        assert_eq!(result.pros, vec!["a"]);
        assert!(result.cons.is_empty());
        assert!(result.name.is_empty());
    }

    #[test]
    fn test_from_reply_requires_app_analysis() {
        let err = AnalysisResult::from_reply(r#"{"pros": []}"#).unwrap_err();
        assert!(matches!(err, ReviewLensError::Analysis(_)));
    }

    #[test]
    fn test_from_reply_invalid_json() {
        assert!(AnalysisResult::from_reply("not json").is_err());
    }
}
