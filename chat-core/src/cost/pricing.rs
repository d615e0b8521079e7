use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_price_per_1k: f64,
    pub output_price_per_1k: f64,
}

impl ModelPricing {
    /// Cost in USD of one call with the given usage split.
    pub fn cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let input_cost = (input_tokens as f64 / 1000.0) * self.input_price_per_1k;
        let output_cost = (output_tokens as f64 / 1000.0) * self.output_price_per_1k;
        input_cost + output_cost
    }
}

#[derive(Debug, Clone)]
pub struct PricingTable {
    prices: HashMap<String, ModelPricing>,
}

impl PricingTable {
    pub fn new() -> Self {
        let mut prices = HashMap::new();

        // OpenAI pricing, USD per 1000 tokens
        prices.insert(
            "gpt-3.5-turbo".to_string(),
            ModelPricing {
                input_price_per_1k: 0.0015,
                output_price_per_1k: 0.002,
            },
        );
        prices.insert(
            "gpt-4".to_string(),
            ModelPricing {
                input_price_per_1k: 0.03,
                output_price_per_1k: 0.06,
            },
        );

        Self { prices }
    }

    /// Pricing entry for a supported model identifier. An identifier outside
    /// the supported set is a configuration error, not a zero-cost fallback.
    pub fn get(&self, model: &str) -> Result<ModelPricing> {
        self.prices
            .get(model)
            .copied()
            .ok_or_else(|| ChatError::UnsupportedModel(model.to_string()))
    }

    pub fn calculate_cost(&self, model: &str, input_tokens: u32, output_tokens: u32) -> Result<f64> {
        Ok(self.get(model)?.cost(input_tokens, output_tokens))
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new()
    }
}
