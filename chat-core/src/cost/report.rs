use std::fmt;

use crate::session::ChatSession;

/// Fixed conversion rate used for display: 1 USD = 150 JPY.
pub const EXCHANGE_RATE_JPY: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TurnCost {
    pub cost_usd: f64,
    pub cost_jpy: f64,
    pub tokens: u32,
    /// The turn's token count priced at the input rate alone. Deliberately
    /// distinct from `cost_usd`, which the gateway computed from the real
    /// input/output split.
    pub token_cost_usd: f64,
    pub token_cost_jpy: f64,
}

/// Running totals and per-turn breakdown derived from a session's cost and
/// token samples. Derivation is pure; nothing on the session changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub total_usd: f64,
    pub total_jpy: f64,
    pub turns: Vec<TurnCost>,
}

impl CostReport {
    pub fn from_session(session: &ChatSession) -> Self {
        let input_price = session.input_price();

        let turns: Vec<TurnCost> = session
            .costs()
            .iter()
            .zip(session.tokens().iter())
            .map(|(&cost_usd, &tokens)| {
                let token_cost_usd = tokens as f64 / 1000.0 * input_price;
                TurnCost {
                    cost_usd,
                    cost_jpy: cost_usd * EXCHANGE_RATE_JPY,
                    tokens,
                    token_cost_usd,
                    token_cost_jpy: token_cost_usd * EXCHANGE_RATE_JPY,
                }
            })
            .collect();

        let total_usd: f64 = session.costs().iter().sum();

        Self {
            total_usd,
            total_jpy: total_usd * EXCHANGE_RATE_JPY,
            turns,
        }
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total cost: ${:.5} ({:.0} yen)",
            self.total_usd, self.total_jpy
        )?;
        for turn in &self.turns {
            writeln!(
                f,
                "- ${:.5} ({:.0} yen) for {} tokens (${:.5}, {:.2} yen at the input rate)",
                turn.cost_usd, turn.cost_jpy, turn.tokens, turn.token_cost_usd, turn.token_cost_jpy
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(turns: &[(f64, u32)], input_price: f64) -> ChatSession {
        let mut session = ChatSession::new();
        session.set_input_price(input_price);
        for (i, &(cost, tokens)) in turns.iter().enumerate() {
            session.add_user(format!("question {i}"));
            session.add_exchange(format!("answer {i}"), cost, tokens);
        }
        session
    }

    #[test]
    fn totals_convert_at_the_fixed_rate() {
        let session = session_with(&[(0.0008, 42), (0.0008, 42)], 0.0015);
        let report = CostReport::from_session(&session);

        assert!((report.total_usd - 0.0016).abs() < 1e-12);
        assert!((report.total_jpy - 0.24).abs() < 1e-12);
    }

    #[test]
    fn single_turn_display_totals() {
        let session = session_with(&[(0.0008, 42)], 0.0015);
        let report = CostReport::from_session(&session);

        assert_eq!(report.turns.len(), 1);
        assert!((report.total_jpy - 0.12).abs() < 1e-12);
    }

    #[test]
    fn token_cost_uses_the_input_rate_only() {
        let session = session_with(&[(0.0008, 42)], 0.0015);
        let report = CostReport::from_session(&session);

        let turn = &report.turns[0];
        assert!((turn.token_cost_usd - 0.000063).abs() < 1e-12);
        assert!((turn.token_cost_jpy - 0.00945).abs() < 1e-12);
        // The recomputation and the authoritative sample disagree by design.
        assert!(turn.token_cost_usd != turn.cost_usd);
    }

    #[test]
    fn empty_session_reports_zero() {
        let report = CostReport::from_session(&ChatSession::new());
        assert_eq!(report.total_usd, 0.0);
        assert_eq!(report.total_jpy, 0.0);
        assert!(report.turns.is_empty());
    }
}
