//! Media Intelligence Dashboard API Server Binary
//!
//! Run with: `cargo run --bin mediadash-server`

use mediadash::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Note: Tracing is initialized in run_server()
    // Set RUST_LOG environment variable to control log level:
    //   RUST_LOG=debug cargo run --bin mediadash-server

    // Create configuration from environment variables or defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let config = ServerConfig::new(host, port);

    println!("Starting Media Intelligence Dashboard API...");
    println!("   Host: {}", config.host);
    println!("   Port: {}", config.port);
    println!();
    println!(
        "Server will be available at: http://{}:{}",
        config.host, config.port
    );
    println!();
    println!("Available endpoints:");
    println!("  GET    /health                                   - Health check");
    println!("  GET    /views                                    - View catalog");
    println!("  POST   /sessions                                 - Upload CSV, create session");
    println!("  GET    /sessions/:id                             - Session status");
    println!("  PUT    /sessions/:id                             - Replace dataset");
    println!("  DELETE /sessions/:id                             - End session");
    println!("  GET    /sessions/:id/views                       - All summary views");
    println!("  GET    /sessions/:id/views/:view                 - One summary view");
    println!("  GET    /sessions/:id/views/:view/insight         - Generated commentary");
    println!();

    // Run server
    run_server(config).await?;

    Ok(())
}
