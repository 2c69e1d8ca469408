use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use supportchat::{
    start_server, AppState, ChatSession, CompletionClient, GeminiForwarder, MockCompletionClient,
    MockForwarder, ProxyCompletionClient, UpstreamForwarder, DEFAULT_SERVER_URL,
};

#[derive(Parser)]
#[command(name = "supportchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use canned mock backends instead of the Gemini API (no key needed)
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the chat widget and the /api/chat proxy endpoint
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Directory holding the widget assets (index.html, styles.css, script.js)
        #[arg(long, default_value = "static")]
        static_dir: String,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Interactive terminal chat session against a running server
    Chat {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },
}

const MOCK_REPLY: &str =
    "Thanks for reaching out! This is a mock reply; start the server with a GEMINI_API_KEY \
     to talk to the real assistant.";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            port,
            static_dir,
            public,
        } => {
            let forwarder: Arc<dyn UpstreamForwarder> = if cli.mock {
                Arc::new(MockForwarder::new(MOCK_REPLY))
            } else {
                Arc::new(GeminiForwarder::from_env()?)
            };

            if !std::path::Path::new(&static_dir).is_dir() {
                warn!("Static directory {static_dir} does not exist; widget assets will 404");
            }

            let host = if public { "0.0.0.0" } else { "127.0.0.1" };
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            start_server(addr, AppState::new(forwarder, static_dir)).await?;
        }

        Commands::Chat { server_url } => {
            let client: Arc<dyn CompletionClient> = if cli.mock {
                Arc::new(MockCompletionClient::new(MOCK_REPLY))
            } else {
                Arc::new(ProxyCompletionClient::new(server_url))
            };
            run_chat(client).await?;
        }
    }

    Ok(())
}

/// Line-oriented REPL over a [`ChatSession`]. One turn per entered line;
/// EOF (Ctrl-D) ends the session.
async fn run_chat(client: Arc<dyn CompletionClient>) -> Result<()> {
    let mut session = ChatSession::new(client);

    println!("Customer support chat. Type a message and press Enter; Ctrl-D to quit.");
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        if !session.can_submit(&line) {
            continue;
        }

        if let Some(reply) = session.submit(&line).await {
            println!("bot [{}]> {}", reply.timestamp(), reply.text());
        }
    }

    println!();
    println!("Session ended after {} messages.", session.transcript().len());
    Ok(())
}
