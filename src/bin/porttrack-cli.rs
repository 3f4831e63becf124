use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "porttrack-cli")]
#[command(about = "Command-line client for a running PortTrack API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "PORTTRACK_URL", default_value = "http://localhost:8082")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Service health
    Health,
    /// Aggregated port status
    Status,
    /// List vessels
    Ships {
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "type")]
        vessel_type: Option<String>,
    },
    /// Show one vessel
    Ship { id: String },
    /// Dock a vessel at a berth
    Berth { id: String, berth: String },
    /// List staff
    Staff {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        shift: Option<String>,
        /// Only the literal "true" selects active staff
        #[arg(long)]
        active: Option<String>,
    },
    /// Most recent port operations
    Operations,
    /// Cargo tracking for a vessel
    Cargo { id: String },
    /// Navigational routes
    Routes,
    /// Simulated login
    Login { username: String, password: String },
    /// Raw Prometheus exposition
    Metrics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{base}/health")),
        Commands::Status => client.get(format!("{base}/api/v1/status")),
        Commands::Ships {
            status,
            vessel_type,
        } => client
            .get(format!("{base}/api/v1/ships"))
            .query(&query(&[("status", status), ("type", vessel_type)])),
        Commands::Ship { id } => client.get(format!("{base}/api/v1/ships/{id}")),
        Commands::Berth { id, berth } => client
            .post(format!("{base}/api/v1/ships/{id}/berth"))
            .json(&json!({ "berthNumber": berth })),
        Commands::Staff {
            role,
            shift,
            active,
        } => client
            .get(format!("{base}/api/v1/staff"))
            .query(&query(&[("role", role), ("shift", shift), ("active", active)])),
        Commands::Operations => client.get(format!("{base}/api/v1/operations")),
        Commands::Cargo { id } => client.get(format!("{base}/api/v1/cargo/tracking/{id}")),
        Commands::Routes => client.get(format!("{base}/api/v1/routes")),
        Commands::Login { username, password } => client
            .post(format!("{base}/api/v1/auth/login"))
            .json(&json!({ "username": username, "password": password })),
        Commands::Metrics => {
            let res = client.get(format!("{base}/metrics")).send().await?;
            print!("{}", res.text().await?);
            return Ok(());
        }
    };

    print_response(request.send().await?).await
}

fn query(params: &[(&'static str, Option<String>)]) -> Vec<(&'static str, String)> {
    params
        .iter()
        .filter_map(|(key, value)| value.clone().map(|v| (*key, v)))
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{rendered}");
    } else {
        eprintln!("Error: PortTrack API returned status {status}");
        eprintln!("{rendered}");
    }
    Ok(())
}
