use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "crud-cli")]
#[command(about = "Command line client for the CRUD gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create documents from a JSON array
    Create {
        #[arg(short, long)]
        prefix: String,
        /// JSON array of documents
        data: String,
    },
    /// Read documents
    Read {
        #[arg(short, long)]
        prefix: String,
        /// JSON object filter
        #[arg(long)]
        filter: Option<String>,
        /// JSON object of field -> 1 | -1
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        skip: Option<i64>,
        /// Include the total number of matching documents
        #[arg(long)]
        count: bool,
    },
    /// Update documents matching a filter
    Update {
        #[arg(short, long)]
        prefix: String,
        /// JSON object filter
        #[arg(long)]
        filter: String,
        /// JSON update document
        data: String,
        #[arg(long)]
        upsert: bool,
    },
    /// Delete documents matching a filter
    Delete {
        #[arg(short, long)]
        prefix: String,
        /// JSON object filter
        #[arg(long)]
        filter: String,
    },
    /// Check gateway health
    Health,
}

fn parse_json(label: &str, raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON for {}: {}", label, e).into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}/api/v1", cli.url.trim_end_matches('/'));

    let (method, url, body) = match cli.command {
        Commands::Create { prefix, data } => (
            Method::POST,
            api,
            Some(json!({ "prefix": prefix, "data": parse_json("data", &data)? })),
        ),
        Commands::Read { prefix, filter, sort, limit, skip, count } => {
            let mut body = Map::new();
            body.insert("prefix".into(), Value::String(prefix));
            if let Some(filter) = filter {
                body.insert("filter".into(), parse_json("filter", &filter)?);
            }
            if let Some(sort) = sort {
                body.insert("sort".into(), parse_json("sort", &sort)?);
            }
            if let Some(limit) = limit {
                body.insert("limit".into(), limit.into());
            }
            if let Some(skip) = skip {
                body.insert("skip".into(), skip.into());
            }
            let url = if count { format!("{}?count=1", api) } else { api };
            (Method::GET, url, Some(Value::Object(body)))
        }
        Commands::Update { prefix, filter, data, upsert } => (
            Method::PUT,
            api,
            Some(json!({
                "prefix": prefix,
                "filter": parse_json("filter", &filter)?,
                "data": parse_json("data", &data)?,
                "upsert": upsert,
            })),
        ),
        Commands::Delete { prefix, filter } => (
            Method::DELETE,
            api,
            Some(json!({ "prefix": prefix, "filter": parse_json("filter", &filter)? })),
        ),
        Commands::Health => (Method::GET, format!("{}/health", cli.url.trim_end_matches('/')), None),
    };

    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }

    println!("{}", rendered);
    Ok(())
}
