//! hub-viewer - A self-contained GitHub repository tree browser
//!
//! # Usage
//! ```bash
//! hub-viewer                # Start server on the default port
//! hub-viewer --open         # Start and open browser
//! hub-viewer status         # Check if running
//! hub-viewer kill           # Stop running instance
//! ```
//!
//! Set `GITHUB_TOKEN` to raise the GitHub API rate limit for private or
//! heavily-browsed repositories.

mod error;
mod github;
mod models;
mod render;
mod routes;

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, Response, StatusCode};
use axum::routing::get;
use clap::{Parser, Subcommand};
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github::GitHubClient;

/// Embedded stylesheet and client script
#[derive(Embed)]
#[folder = "assets"]
struct Assets;

/// hub-viewer - Browse GitHub repository trees in your browser
#[derive(Parser)]
#[command(name = "hub-viewer")]
#[command(about = "A self-contained GitHub repository tree browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if hub-viewer is currently running
    Status,
    /// Stop the running hub-viewer instance
    Kill,
}

/// PID file info stored as JSON
#[derive(serde::Serialize, serde::Deserialize)]
struct PidInfo {
    pid: u32,
    port: u16,
}

fn get_pid_file_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("hub-viewer.pid");
    path
}

fn read_pid_info() -> Option<PidInfo> {
    let path = get_pid_file_path();
    let mut file = fs::File::open(&path).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_pid_info(info: &PidInfo) -> anyhow::Result<()> {
    let path = get_pid_file_path();
    let mut file = fs::File::create(&path)?;
    file.write_all(serde_json::to_string(info)?.as_bytes())?;
    Ok(())
}

fn remove_pid_file() {
    let _ = fs::remove_file(get_pid_file_path());
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // On Unix, sending signal 0 checks if process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use std::process::Command;
    // On Windows, check if process exists using tasklist
    Command::new("tasklist")
        .args(&["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| {
            let output_str = String::from_utf8_lossy(&output.stdout);
            output_str.contains(&pid.to_string())
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> bool {
    use std::process::Command;
    // On Windows, use taskkill
    Command::new("taskkill")
        .args(&["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn handle_status() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                println!("✓ hub-viewer is running");
                println!("  PID: {}", info.pid);
                println!("  URL: http://127.0.0.1:{}", info.port);
            } else {
                println!("✗ hub-viewer is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ hub-viewer is not running");
        }
    }
}

fn handle_kill() {
    match read_pid_info() {
        Some(info) => {
            if is_process_running(info.pid) {
                if kill_process(info.pid) {
                    println!("✓ Stopped hub-viewer (PID {})", info.pid);
                    remove_pid_file();
                } else {
                    println!("✗ Failed to stop hub-viewer (PID {})", info.pid);
                }
            } else {
                println!("✗ hub-viewer is not running (stale PID file)");
                remove_pid_file();
            }
        }
        None => {
            println!("✗ hub-viewer is not running");
        }
    }
}

/// Serve embedded static assets from /static/{path}
async fn serve_static(Path(path): Path<String>) -> Response<Body> {
    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
            .unwrap(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        None => {}
    }

    // Check if already running
    if let Some(info) = read_pid_info() {
        if is_process_running(info.pid) {
            eprintln!("✗ hub-viewer is already running (PID {})", info.pid);
            eprintln!("  URL: http://127.0.0.1:{}", info.port);
            eprintln!();
            eprintln!("Run 'hub-viewer kill' to stop it first.");
            std::process::exit(1);
        } else {
            remove_pid_file();
        }
    }

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = Arc::new(GitHubClient::from_env());
    let authenticated = client.is_authenticated();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router with page routes and embedded asset serving
    let app = Router::new()
        .route("/static/{*path}", get(serve_static))
        .merge(routes::create_router(client))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    // Write PID file
    let pid_info = PidInfo {
        pid: std::process::id(),
        port: cli.port,
    };
    write_pid_info(&pid_info)?;

    // Print startup message
    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │          GitHub Repository Browser          │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Server: {}", url);
    println!(
        "  GitHub: {}",
        if authenticated {
            "authenticated (GITHUB_TOKEN)"
        } else {
            "unauthenticated (60 requests/hour)"
        }
    );
    println!();
    println!("  Commands:");
    println!("    hub-viewer status  - Check if running");
    println!("    hub-viewer kill    - Stop the server");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Open browser if requested
    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    // Set up graceful shutdown
    let shutdown = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        println!("\n  Shutting down...");
        remove_pid_file();
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
