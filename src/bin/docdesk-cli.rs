use clap::{Parser, Subcommand};
use serde_json::Value;

use docdesk::app;
use docdesk::routing::{MatchOptions, Resolution, RouteTarget};

#[derive(Parser)]
#[command(name = "docdesk-cli")]
#[command(about = "Inspect the docdesk route table", long_about = None)]
struct Cli {
    /// Match paths case-sensitively.
    #[arg(long)]
    sensitive: bool,

    /// Require trailing slashes to match exactly.
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route table
    Routes,
    /// Resolve a path against the route table
    Resolve {
        /// Path to resolve, e.g. "/" or "/convert?doc=1"
        path: String,
    },
    /// Query a running server's status
    Status {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = MatchOptions {
        sensitive: cli.sensitive,
        strict: cli.strict,
    };

    match cli.command {
        Commands::Routes => {
            let router = app::build_router(options)?;
            for record in router.routes() {
                match record.target() {
                    RouteTarget::View(view) => {
                        println!("{:<10} view     {}", record.path(), view.name())
                    }
                    RouteTarget::Redirect(to) => {
                        println!("{:<10} redirect {}", record.path(), to)
                    }
                }
            }
        }
        Commands::Resolve { path } => {
            let router = app::build_router(options)?;
            match router.resolve(&path)? {
                Resolution::Matched(route) => {
                    print!("{} -> {} ({})", path, route.location, route.view.name());
                    if let Some(from) = &route.redirected_from {
                        print!(" [redirected from {}]", from);
                    }
                    println!();
                }
                Resolution::Unmatched(location) => {
                    eprintln!("{}: no route matches", location);
                    std::process::exit(1);
                }
            }
        }
        Commands::Status { url } => {
            let res = reqwest::get(format!("{}/_status", url.trim_end_matches('/'))).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(format!("server returned status {}", status).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
