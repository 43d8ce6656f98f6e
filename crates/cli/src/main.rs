//! Terminal harness for the voice session
//!
//! Drives a session end-to-end from the keyboard against the live services:
//! typed lines stand in for recognized speech, generated reply options are
//! printed for selection, and the chosen reply is voiced through the
//! network path (audio written to a file) or the console fallback voice.

mod console;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use voice_assist_config::Settings;
use voice_assist_core::LanguageCode;
use voice_assist_generate::HttpGenerateClient;
use voice_assist_playback::HttpSynthesisClient;
use voice_assist_session::{
    SessionBackends, SessionConfig, SessionState, VoiceSession,
};

use console::{ConsoleRecognitionProvider, ConsoleSynthesizer, FileSink};

/// Voice communication assistant terminal harness
#[derive(Parser, Debug)]
#[command(name = "voice-assist", version)]
struct Args {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language code (en-US, hi-IN, ta-IN, raj-IN)
    #[arg(short, long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    init_tracing(&settings);
    tracing::info!("Starting voice-assist v{}", env!("CARGO_PKG_VERSION"));

    let language: LanguageCode = match &args.language {
        Some(code) => code.parse()?,
        None => settings.language(),
    };

    let timeout = Duration::from_secs(settings.service.timeout_seconds);
    let provider = Arc::new(ConsoleRecognitionProvider::new());

    let backends = SessionBackends {
        recognition: provider.clone(),
        generate: Arc::new(HttpGenerateClient::new(
            &settings.service.generate_url,
            timeout,
        )?),
        synthesis: Arc::new(HttpSynthesisClient::new(
            &settings.service.synthesize_url,
            timeout,
        )?),
        sink: Arc::new(FileSink::new(
            std::env::temp_dir().join("voice-assist-reply.mp3"),
        )),
        local_synthesis: Arc::new(ConsoleSynthesizer),
    };

    let config = SessionConfig {
        language,
        persona_name: settings.session.persona_name.clone(),
        patron_label: settings.session.patron_label.clone(),
        ..Default::default()
    };

    let session = VoiceSession::new(config, backends);

    run(session, provider).await
}

async fn run(
    session: Arc<VoiceSession>,
    provider: Arc<ConsoleRecognitionProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("voice-assist terminal harness");
    println!("type what the patron says, or: /lang <code>, /log, /clear, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "/quit" {
            break;
        } else if line == "/clear" {
            session.clear_conversation();
            println!("conversation cleared");
        } else if line == "/log" {
            print_log(&session);
        } else if let Some(code) = line.strip_prefix("/lang ") {
            match code.trim().parse::<LanguageCode>() {
                Ok(language) => {
                    session.set_language(language);
                    let active = session.language();
                    println!("language: {} ({})", active, active.display_name());
                }
                Err(e) => println!("{e}"),
            }
        } else {
            handle_utterance(&session, &provider, line, &mut lines).await?;
        }
    }

    Ok(())
}

async fn handle_utterance(
    session: &Arc<VoiceSession>,
    provider: &Arc<ConsoleRecognitionProvider>,
    utterance: &str,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Box<dyn std::error::Error>> {
    provider.queue_utterance(utterance);
    session.start_recording();
    session.stop_recording().await;

    if session.state() != SessionState::AwaitingSelection {
        println!("{}", session.status());
        return Ok(());
    }

    let options = session.options();
    println!("{}", session.status());
    for (i, option) in options.iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, option.tone, option.response);
    }

    // The machine stays in AwaitingSelection until a reply is chosen.
    loop {
        let Some(choice) = lines.next_line().await? else {
            break;
        };

        match choice.trim().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => {
                session.select_option(n - 1).await;
                println!("{}", session.status());
                break;
            }
            _ => println!("enter a number between 1 and {}", options.len()),
        }
    }

    Ok(())
}

fn print_log(session: &Arc<VoiceSession>) {
    let entries = session.conversation();
    if entries.is_empty() {
        println!("(conversation is empty)");
        return;
    }
    for entry in entries {
        println!("  {}: {}", entry.role, entry.text);
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.observability.log_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
