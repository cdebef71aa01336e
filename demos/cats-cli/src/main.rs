//! Terminal client for Detonating Cats.
//!
//! ```text
//! cats-cli <name> [lobby] [url]
//! cats-cli config.json
//! ```
//!
//! Type to chat. Commands: `/play <n>`, `/draw`, `/combo <0-3>`,
//! `/a <answer>`, `/sort`, `/join`, `/leave`, `/start`, `/state`, `/quit`.
//! Any other `/...` line is sent to the server as typed.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use wwwcats::prelude::*;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One line of user input, interpreted.
#[derive(Debug)]
enum Line {
    Intent(Intent),
    State,
    Quit,
    /// A local command with a bad argument.
    Usage(&'static str),
}

fn parse_line(line: &str) -> Option<Line> {
    let Some(command) = line.strip_prefix('/') else {
        return (!line.is_empty()).then(|| Line::Intent(Intent::Chat(line.into())));
    };
    let (verb, arg) = command
        .split_once(' ')
        .map_or((command, ""), |(v, a)| (v, a.trim()));

    let line = match verb {
        "play" | "p" => match arg.parse() {
            Ok(index) => Line::Intent(Intent::PlayCard(index)),
            Err(_) => Line::Usage("/play <card number>"),
        },
        "draw" | "d" => Line::Intent(Intent::Draw),
        "combo" | "c" => match arg.parse() {
            Ok(n) => Line::Intent(Intent::SelectCombo(n)),
            Err(_) => Line::Usage("/combo <0-3>"),
        },
        "a" | "answer" if !arg.is_empty() => {
            Line::Intent(Intent::Answer(arg.to_string()))
        }
        "a" | "answer" => Line::Usage("/a <answer>"),
        "sort" => Line::Intent(Intent::Sort),
        "join" => Line::Intent(Intent::JoinGame),
        "leave" => Line::Intent(Intent::LeaveGame),
        "start" => Line::Intent(Intent::StartGame),
        "state" => Line::State,
        "quit" | "q" => Line::Quit,
        _ => Line::Intent(Intent::Chat(line.to_string())),
    };
    Some(line)
}

async fn read_input(handle: ClientHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let result = match parse_line(line.trim_end()) {
            None => continue,
            Some(Line::Intent(intent)) => handle.send(intent).await,
            Some(Line::State) => match handle.snapshot().await {
                Ok(snapshot) => {
                    match serde_json::to_string_pretty(&snapshot) {
                        Ok(json) => println!("{json}"),
                        Err(e) => eprintln!("cannot show state: {e}"),
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Some(Line::Quit) => break,
            Some(Line::Usage(usage)) => {
                println!("usage: {usage}");
                Ok(())
            }
        };
        if result.is_err() {
            break;
        }
    }
    // Dropping the handle shuts the client down.
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

struct Terminal;

impl Presentation for Terminal {
    fn notify(&mut self, session: &Session, event: Event) {
        match event {
            Event::Entered => println!(
                "* joined lobby {} as {}",
                session.identity().lobby(),
                session.identity().name()
            ),
            Event::Log(line) => println!("* {line}"),
            Event::Chat { name, text } => println!("<{name}> {text}"),
            Event::Reveal(Reveal::Cards(cards)) => {
                let cards: Vec<&str> = cards.iter().map(Card::as_str).collect();
                println!("  [{}]", cards.join("] ["));
            }
            Event::Reveal(Reveal::FaceDown) => println!("  [?]"),
            Event::Info(Some(text)) => println!("== {text} =="),
            Event::Info(None) => {}
            Event::Attention => println!("\x07>>> your turn <<<"),
            Event::Question { prompt, choices, .. } => {
                println!("? {prompt}");
                match choices {
                    Choices::HandCard { .. } => println!("  (/play a card)"),
                    Choices::Players(names) => {
                        println!("  (/a one of: {})", names.join(", "))
                    }
                    Choices::CardTypes(types) => {
                        println!("  (/a one of: {})", types.join(", "))
                    }
                    Choices::Position { max: Some(max) } => {
                        println!("  (/a a position from 0 to {max})")
                    }
                    Choices::Position { max: None } | Choices::FreeText => {
                        println!("  (/a your answer)")
                    }
                }
            }
            Event::QuestionCleared => println!("? (question withdrawn)"),
            Event::Rejected { message, .. } => println!("! {message}"),
            Event::Changed(Aspect::Hand) => print_hand(session),
            Event::Changed(Aspect::Roster) => println!(
                "  players: {} | spectators: {}",
                session.roster.players().join(" "),
                session.roster.spectators().join(" ")
            ),
            Event::Changed(_) => {}
            Event::Closed(reason) => println!("* disconnected: {}", describe(&reason)),
        }
    }
}

fn print_hand(session: &Session) {
    let cards: Vec<String> = session
        .hand
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| format!("{i}:{card}"))
        .collect();
    println!("  hand: {}", cards.join(" "));
}

fn describe(reason: &CloseReason) -> String {
    match reason {
        CloseReason::ServerError { message, .. } => message.clone(),
        CloseReason::VersionMismatch { server, client } => {
            format!("server speaks protocol {server}, this client speaks {client}")
        }
        CloseReason::TransportClosed => "server hung up".to_string(),
        CloseReason::TransportFailed(e) => format!("connection failed: {e}"),
        CloseReason::Shutdown => "bye".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

fn load_config() -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [path] if path.ends_with(".json") => {
            Ok(ClientConfig::from_json(&std::fs::read_to_string(path)?)?)
        }
        [name, rest @ ..] if rest.len() <= 2 => {
            let mut config = ClientConfig {
                name: name.clone(),
                ..ClientConfig::default()
            };
            if let Some(lobby) = rest.first() {
                config.lobby = lobby.clone();
            }
            if let Some(url) = rest.get(1) {
                config.url = url.clone();
            }
            Ok(config)
        }
        _ => Err("usage: cats-cli <name> [lobby] [url] | cats-cli <config.json>".into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(url = %config.url, "connecting");
    let (client, handle) = ClientBuilder::from_config(config).connect().await?;

    let input = tokio::spawn(read_input(handle));
    let reason = client.run(&mut Terminal).await;
    input.abort();

    tracing::debug!(?reason, "client finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert!(matches!(
            parse_line("hello all"),
            Some(Line::Intent(Intent::Chat(text))) if text == "hello all"
        ));
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_local_commands() {
        assert!(matches!(
            parse_line("/play 2"),
            Some(Line::Intent(Intent::PlayCard(2)))
        ));
        assert!(matches!(
            parse_line("/combo 3"),
            Some(Line::Intent(Intent::SelectCombo(3)))
        ));
        assert!(matches!(
            parse_line("/a bob"),
            Some(Line::Intent(Intent::Answer(answer))) if answer == "bob"
        ));
        assert!(matches!(parse_line("/state"), Some(Line::State)));
        assert!(matches!(parse_line("/play x"), Some(Line::Usage(_))));
        assert!(matches!(parse_line("/a"), Some(Line::Usage(_))));
    }

    #[test]
    fn test_unknown_slash_command_goes_raw() {
        assert!(matches!(
            parse_line("/kick bob"),
            Some(Line::Intent(Intent::Chat(text))) if text == "/kick bob"
        ));
    }
}
