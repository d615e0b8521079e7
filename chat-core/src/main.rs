use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing::error;

use chat_core::{
    run_turn, select_model, setup_logging, ChatSession, CostReport, Credentials, ModelChoice, Role,
};

#[derive(Parser)]
#[command(name = "chat-cli")]
#[command(version, about = "Single-session LLM chat with running cost accounting")]
struct Cli {
    /// Model label: GPT-3.5 or GPT-4
    #[arg(short, long, default_value = "GPT-3.5")]
    model: String,

    /// Sampling temperature, 0.0 through 2.0
    #[arg(short, long, default_value_t = 0.0)]
    temperature: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    // Configuration failures halt here, before any turn is attempted.
    let choice = ModelChoice::from_label(&cli.model)?;
    let credentials = Credentials::from_env()?;
    let (client, profile) = select_model(choice, cli.temperature, credentials)?;

    let mut session = ChatSession::new();
    session.set_input_price(profile.pricing.input_price_per_1k);

    println!(
        "Chatting with {} at temperature {}. Commands: /clear /history /cost /quit",
        choice.label(),
        cli.temperature
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" => break,
            "/clear" => {
                session.reset();
                println!("Conversation cleared.");
            }
            "/history" => {
                for message in session.messages() {
                    match message.role {
                        Role::System => println!("[system] {}", message.content),
                        Role::User => println!("[user] {}", message.content),
                        Role::Assistant => println!("[assistant] {}", message.content),
                    }
                }
            }
            "/cost" => print!("{}", CostReport::from_session(&session)),
            _ => match run_turn(&mut session, &client, input).await {
                Ok(completion) => {
                    println!("{}", completion.content);
                    print!("{}", CostReport::from_session(&session));
                }
                // The turn is abandoned; the session stays usable.
                Err(err) => error!("turn failed: {err}"),
            },
        }
    }

    print!("{}", CostReport::from_session(&session));
    Ok(())
}
