use std::fmt;

use clap::ValueEnum;

/// Chat models that support JSON-object responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GptModel {
    #[default]
    #[value(name = "gpt-4o-mini-2024-07-18")]
    Gpt4oMini,
    #[value(name = "gpt-4o-2024-05-13")]
    Gpt4o,
    #[value(name = "gpt-4-1106-preview")]
    Gpt4Turbo,
    #[value(name = "gpt-3.5-turbo-1106")]
    Gpt35Turbo,
}

impl GptModel {
    pub fn id(&self) -> &'static str {
        match self {
            GptModel::Gpt4oMini => "gpt-4o-mini-2024-07-18",
            GptModel::Gpt4o => "gpt-4o-2024-05-13",
            GptModel::Gpt4Turbo => "gpt-4-1106-preview",
            GptModel::Gpt35Turbo => "gpt-3.5-turbo-1106",
        }
    }

    /// Context window in tokens.
    pub fn context_window(&self) -> usize {
        match self {
            GptModel::Gpt35Turbo => 16_385,
            _ => 128_000,
        }
    }
}

impl fmt::Display for GptModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_names_match_ids() {
        for model in GptModel::value_variants() {
            let value = model.to_possible_value().unwrap();
            assert_eq!(value.get_name(), model.id());
        }
    }

    #[test]
    fn test_parse_from_str() {
        let model = GptModel::from_str("gpt-3.5-turbo-1106", false).unwrap();
        assert_eq!(model, GptModel::Gpt35Turbo);
        assert_eq!(model.context_window(), 16_385);
        assert!(GptModel::from_str("gpt-2", false).is_err());
    }

    #[test]
    fn test_default_model() {
        assert_eq!(GptModel::default().to_string(), "gpt-4o-mini-2024-07-18");
    }
}
