use adk_chat::adapters::ReqwestHttpClient;
use adk_chat::cli::{parse_args, version_line, CliCommand, USAGE};
use adk_chat::config::ClientConfig;
use adk_chat::logging::init_logging;
use adk_chat::models::ConversationMessage;
use adk_chat::presenter::{reveal_chunks, REVEAL_INTERVAL};
use adk_chat::service::{HealthStatus, ServiceClient};
use adk_chat::session::ConversationSession;
use adk_chat::traits::HttpClient;

use color_eyre::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// What a line typed at the prompt asks for.
enum Input<'a> {
    Message(&'a str),
    New,
    Session,
    Clear,
    Health,
    Quit,
    Unknown(&'a str),
    Empty,
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Empty,
        "/new" => Input::New,
        "/session" => Input::Session,
        "/clear" => Input::Clear,
        "/health" => Input::Health,
        "/quit" | "/exit" => Input::Quit,
        other if other.starts_with('/') => Input::Unknown(other),
        other => Input::Message(other),
    }
}

fn print_health(status: &HealthStatus) {
    match (status.success, status.status_code) {
        (true, _) => println!("Service healthy: {}", status.detail),
        (false, Some(code)) => println!("Service unhealthy (HTTP {}): {}", code, status.detail),
        (false, None) => println!("Service unreachable: {}", status.detail),
    }
}

/// Reveal a reply on stdout, one presenter step per tick.
async fn reveal(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    let chunks = reveal_chunks(text);
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.iter().enumerate() {
        write!(stdout, "{}", chunk)?;
        stdout.flush()?;
        if i < last {
            tokio::time::sleep(REVEAL_INTERVAL).await;
        }
    }
    writeln!(stdout)?;
    Ok(())
}

fn print_details(message: &ConversationMessage, debug: bool) -> Result<()> {
    let time = message.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S");
    match &message.endpoint_used {
        Some(endpoint) => println!("  {} | {}", time, endpoint),
        None => println!("  {}", time),
    }

    if let Some(summary) = message.tools_summary() {
        println!("  {}", summary);
        for call in &message.tool_calls {
            println!("    {} args: {}", call.name, serde_json::to_string_pretty(&call.args)?);
        }
        for response in &message.tool_responses {
            println!(
                "    {} response: {}",
                response.name,
                serde_json::to_string_pretty(&response.response)?
            );
        }
    }

    if debug {
        if let Some(raw) = &message.raw_response {
            println!("  raw: {}", serde_json::to_string_pretty(raw)?);
        }
    }
    Ok(())
}

async fn run_chat(http: Arc<dyn HttpClient>, config: ClientConfig) -> Result<()> {
    let mut session = ConversationSession::from_config(http, &config)?;
    println!(
        "Connected to {} (app: {}, user: {})",
        config.service_url.as_deref().unwrap_or_default(),
        session.app_name(),
        session.user_id()
    );
    println!("Commands: /new /session /clear /health /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match classify(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Health => print_health(&session.health_check().await),
            Input::Clear => {
                session.reset();
                println!("Conversation cleared.");
            }
            Input::New => match session.new_session().await {
                Ok(id) => println!("New session: {}", id),
                Err(e) => println!("{}", e.user_message()),
            },
            Input::Session => match session.session_id() {
                Some(id) => println!("Session: {}", id),
                None => match session.create_session().await {
                    Ok(id) => println!("Session created: {}", id),
                    Err(e) => println!("{}", e.user_message()),
                },
            },
            Input::Unknown(command) => println!("Unknown command: {}", command),
            Input::Message(text) => {
                session.send(text).await;
                if let Some(reply) = session.last_message() {
                    reveal(&reply.content).await?;
                    print_details(reply, config.debug)?;
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let command = parse_args(std::env::args(), ClientConfig::from_env()?)?;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    match command {
        CliCommand::Version => println!("{}", version_line()),
        CliCommand::Help => print!("{}", USAGE),
        CliCommand::Health(config) => {
            let service = ServiceClient::new(http, config.endpoint()?)
                .with_health_timeout(config.health_timeout);
            let status = service.health_check().await;
            print_health(&status);
            if !status.success {
                std::process::exit(1);
            }
        }
        CliCommand::Chat(config) => run_chat(http, config).await?,
    }

    Ok(())
}
