use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "defake-cli")]
#[command(about = "Command-line client for the DeFake gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify text through the external classification service
    Factcheck {
        /// News text or headline
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Match text against the built-in sample headlines
    Check {
        /// News text or headline
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Check gateway health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Factcheck { text } => {
            client
                .post(format!("{}/factcheck", base))
                .json(&json!({ "text": text.join(" ") }))
                .send()
                .await?
        }
        Commands::Check { text } => {
            client
                .post(format!("{}/check-news", base))
                .json(&json!({ "newsInput": text.join(" ") }))
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
