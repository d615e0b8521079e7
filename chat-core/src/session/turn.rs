use tracing::{debug, info};

use super::ChatSession;
use crate::error::Result;
use crate::gateway::{Completion, CompletionGateway};

/// Run one user turn against the completion gateway.
///
/// The user message is appended before the call; the assistant reply and its
/// cost/token samples are appended only if the call succeeds. A failed call
/// leaves the cost/token sequences untouched and the session usable for the
/// next turn.
pub async fn run_turn<G>(session: &mut ChatSession, gateway: &G, input: &str) -> Result<Completion>
where
    G: CompletionGateway + ?Sized,
{
    session.add_user(input);
    debug!(
        history_len = session.messages().len(),
        "sending conversation to completion endpoint"
    );

    let completion = gateway.complete(session.messages()).await?;

    session.add_exchange(
        completion.content.clone(),
        completion.cost_usd,
        completion.total_tokens,
    );
    info!(
        turn = session.turn_count(),
        cost_usd = completion.cost_usd,
        tokens = completion.total_tokens,
        "exchange completed"
    );

    Ok(completion)
}
