use base64::Engine;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use faas_fixtures::api;
use faas_fixtures::error::error_chain;
use faas_fixtures::models::{AppConfig, InvocationRequest};
use faas_fixtures::server;
use faas_fixtures::services::FunctionRegistry;

#[derive(Parser)]
#[command(name = "faas-fixtures")]
#[command(about = "Fixture functions for a function-as-a-service platform")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local invocation host
    Serve,
    /// Run a single invocation and print the response envelope
    Invoke {
        /// Function name (e.g. resize, test, pause)
        name: String,

        /// Path passed to the function (e.g. /images/photo.png/ratio/2)
        #[arg(short, long, default_value = "/")]
        path: String,

        /// Request header as name:value, repeatable
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Write the decoded response body to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected name:value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {raw:?}"));
    }
    Ok((name.to_ascii_lowercase(), value.trim().to_string()))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "faas-fixtures",
        description = "Local host for fixture functions",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_invoke_root, api::handle_invoke),
    tags(
        (name = "Functions", description = "Function invocation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Invoke {
            name,
            path,
            headers,
            output,
        }) => run_invoke_command(&name, &path, headers, output.as_ref()),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Run one invocation in-process (no server needed)
fn run_invoke_command(
    name: &str,
    path: &str,
    headers: Vec<(String, String)>,
    output: Option<&PathBuf>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faas_fixtures=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::from_env();
    let registry = FunctionRegistry::with_defaults(&config);
    let function = registry.get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown function {name:?}, available: {}",
            registry.names().join(", ")
        )
    })?;

    let request = headers
        .into_iter()
        .fold(InvocationRequest::new(path), |request, (name, value)| {
            request.with_header(&name, value)
        });

    let response = function
        .invoke(&request)
        .map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), error_chain(&e)))?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Some(output) = output {
        let body = if response.is_base64_encoded {
            base64::engine::general_purpose::STANDARD.decode(response.body.as_bytes())?
        } else {
            response.body.into_bytes()
        };
        std::fs::write(output, &body)?;
        eprintln!("Wrote {} ({} bytes)", output.display(), body.len());
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let static_dir = std::env::var("STATIC_DIR").ok();
    let origin_scheme = std::env::var("ORIGIN_SCHEME").ok();
    let origin_host = std::env::var("ORIGIN_HOST").ok();

    // Header
    println!("faas-fixtures v{VERSION}");
    println!("Fixture functions for a function-as-a-service platform\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:8888 (default)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  STATIC_DIR    = {}",
        static_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  ORIGIN_SCHEME = {}",
        origin_scheme.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  ORIGIN_HOST   = {}",
        origin_host.as_deref().unwrap_or("(not set)")
    );

    // Effective origin
    let config = AppConfig::from_env();
    println!("\nOrigin:");
    println!("  Scheme: {}", config.origin.scheme);
    println!(
        "  Host:   {}",
        config
            .origin
            .host
            .as_deref()
            .unwrap_or("(request host header)")
    );

    // Functions section
    println!("\nFunctions:");
    for name in FunctionRegistry::with_defaults(&config).names() {
        println!("  /.netlify/functions/{name}");
    }

    // Commands section
    println!("\nCommands:");
    println!("  faas-fixtures serve    Start the local invocation host");
    println!("  faas-fixtures invoke   Run one invocation and print the envelope");
    println!("\nRun 'faas-fixtures --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faas_fixtures=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8888".to_string());

    let state = server::create_app_state(AppConfig::from_env(), static_dir.clone());

    tracing::info!(
        scheme = %state.config.origin.scheme,
        host = state.config.origin.host.as_deref().unwrap_or("(request host header)"),
        static_dir = ?static_dir.as_ref().map(|p| p.display().to_string()),
        "Origin configured"
    );

    let app = server::build_router(state)
        // OpenAPI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "faas-fixtures host listening");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-NF-Pause: 1s").unwrap(),
            ("x-nf-pause".to_string(), "1s".to_string())
        );
        assert_eq!(
            parse_header("host:localhost:8888").unwrap(),
            ("host".to_string(), "localhost:8888".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_cli_parses_invoke() {
        let cli = Cli::try_parse_from([
            "faas-fixtures",
            "invoke",
            "resize",
            "--path",
            "/img.png/ratio/2",
            "-H",
            "host:example.com",
            "--output",
            "out.png",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Invoke {
                name,
                path,
                headers,
                output,
            }) => {
                assert_eq!(name, "resize");
                assert_eq!(path, "/img.png/ratio/2");
                assert_eq!(headers, vec![("host".to_string(), "example.com".to_string())]);
                assert_eq!(output, Some(PathBuf::from("out.png")));
            }
            _ => panic!("expected invoke command"),
        }
    }
}
