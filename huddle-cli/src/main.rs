use anyhow::Result;
use clap::{Parser, Subcommand};

mod client;
mod hub;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "Mesh video call client with a development rendezvous hub")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the development rendezvous hub.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,
    },

    /// Join a room as a headless client.
    Join {
        #[arg(long, default_value = "ws://127.0.0.1:8000/ws")]
        url: String,

        #[arg(long)]
        room: String,

        #[arg(long)]
        name: String,

        /// Authenticated identity; generated when omitted.
        #[arg(long)]
        id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Commands::Serve { addr } => hub::run(&addr).await,
        Commands::Join {
            url,
            room,
            name,
            id,
        } => client::run(&url, room, name, id).await,
    }
}
