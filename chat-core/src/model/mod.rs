use serde::{Deserialize, Serialize};

use crate::cost::{ModelPricing, PricingTable};
use crate::error::{ChatError, Result};
use crate::gateway::OpenAiChatClient;

/// Closed set of user-facing model labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelChoice {
    Gpt35,
    Gpt4,
}

impl ModelChoice {
    /// The label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            ModelChoice::Gpt35 => "GPT-3.5",
            ModelChoice::Gpt4 => "GPT-4",
        }
    }

    /// The identifier sent to the completion endpoint.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelChoice::Gpt35 => "gpt-3.5-turbo",
            ModelChoice::Gpt4 => "gpt-4",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "GPT-3.5" => Ok(ModelChoice::Gpt35),
            "GPT-4" => Ok(ModelChoice::Gpt4),
            other => Err(ChatError::UnsupportedModel(other.to_string())),
        }
    }
}

/// The pricing and identifier data bound to a model choice for one session.
#[derive(Debug, Clone)]
pub struct ModelProfile {
    pub model_id: String,
    pub pricing: ModelPricing,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub organization: Option<String>,
}

impl Credentials {
    /// Read the API key (required) and organization id (optional) from the
    /// environment. A missing key halts startup; nothing downstream can
    /// recover from it.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ChatError::InvalidConfig("OPENAI_API_KEY is not set".to_string()))?;
        let organization = std::env::var("OPENAI_ORGANIZATION_ID").ok();

        Ok(Self {
            api_key,
            organization,
        })
    }
}

/// Resolve a model label into a ready-to-call completion client and the
/// pricing profile that goes with it.
pub fn select_model(
    choice: ModelChoice,
    temperature: f64,
    credentials: Credentials,
) -> Result<(OpenAiChatClient, ModelProfile)> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ChatError::InvalidConfig(format!(
            "temperature {temperature} outside 0.0..=2.0"
        )));
    }

    let pricing = PricingTable::new().get(choice.model_id())?;
    let profile = ModelProfile {
        model_id: choice.model_id().to_string(),
        pricing,
    };
    let client = OpenAiChatClient::new(credentials, profile.clone(), temperature);

    Ok((client, profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials {
            api_key: "sk-test".to_string(),
            organization: None,
        }
    }

    #[test]
    fn labels_resolve_to_model_ids_and_prices() {
        let choice = ModelChoice::from_label("GPT-3.5").unwrap();
        assert_eq!(choice.model_id(), "gpt-3.5-turbo");
        let (_, profile) = select_model(choice, 0.0, test_credentials()).unwrap();
        assert_eq!(profile.pricing.input_price_per_1k, 0.0015);
        assert_eq!(profile.pricing.output_price_per_1k, 0.002);

        let choice = ModelChoice::from_label("GPT-4").unwrap();
        assert_eq!(choice.model_id(), "gpt-4");
        let (_, profile) = select_model(choice, 0.0, test_credentials()).unwrap();
        assert_eq!(profile.pricing.input_price_per_1k, 0.03);
        assert_eq!(profile.pricing.output_price_per_1k, 0.06);
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(matches!(
            ModelChoice::from_label("GPT-5"),
            Err(ChatError::UnsupportedModel(_))
        ));
    }

    #[test]
    fn temperature_outside_the_closed_range_is_rejected() {
        assert!(select_model(ModelChoice::Gpt35, 2.01, test_credentials()).is_err());
        assert!(select_model(ModelChoice::Gpt35, -0.01, test_credentials()).is_err());
        assert!(select_model(ModelChoice::Gpt35, 0.0, test_credentials()).is_ok());
        assert!(select_model(ModelChoice::Gpt35, 2.0, test_credentials()).is_ok());
    }
}
