use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Query a running API gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3002")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the advertised endpoints
    Endpoints,
    /// Check gateway health
    Health,
    /// List demo posts
    Posts,
    /// Show a single demo post
    Post { id: String },
    /// List stored images
    Images,
    /// Show image storage statistics
    Stats,
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Endpoints => "/".to_string(),
            Commands::Health => "/health".to_string(),
            Commands::Posts => "/api/posts".to_string(),
            Commands::Post { id } => format!("/api/posts/{id}"),
            Commands::Images => "/images".to_string(),
            Commands::Stats => "/stats".to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client.get(url).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
