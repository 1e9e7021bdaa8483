use base64::Engine;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use urlseal::models::{AppConfig, RequestContext};
use urlseal::server;
use urlseal::services::RuntimeMode;

#[derive(Parser)]
#[command(name = "urlseal")]
#[command(about = "Signed URL verification and production root URL normalization")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print a signed URL for a path
    Sign {
        /// Path to sign, percent-encoded (e.g. "invoice/1")
        path: String,

        /// Query parameter as NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Seconds until the link expires (0 = never; default from config)
        #[arg(long)]
        ttl: Option<u32>,

        /// Sign only path and query, not scheme and host
        #[arg(long)]
        relative: bool,
    },
    /// Check a signed URL
    Verify {
        /// Full URL including the signature parameter
        url: String,

        /// Check a relative signature
        #[arg(long)]
        relative: bool,

        /// Query parameter to leave out of the signature (repeatable)
        #[arg(long)]
        ignore: Vec<String>,
    },
    /// Generate a random application key
    KeyGenerate,
    /// Print the root URL generated links would use
    RootUrl {
        /// Simulate a request to this host (server mode)
        #[arg(long)]
        host: Option<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{s}`"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Sign {
            path,
            params,
            ttl,
            relative,
        }) => run_sign_command(&path, params, ttl, relative),
        Some(Commands::Verify {
            url,
            relative,
            ignore,
        }) => run_verify_command(&url, relative, ignore),
        Some(Commands::KeyGenerate) => {
            println!("{}", generate_key());
            Ok(())
        }
        Some(Commands::RootUrl { host }) => run_root_url_command(host.as_deref()),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urlseal=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn run_sign_command(
    path: &str,
    params: Vec<(String, String)>,
    ttl: Option<u32>,
    relative: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let state = server::create_app_state(AppConfig::from_env(), RuntimeMode::Console);
    let params: BTreeMap<String, String> = params.into_iter().collect();
    let absolute = !relative;

    let url = match ttl.unwrap_or(state.config.signing.ttl_secs) {
        0 => state.signer.signed_url(path, &params, None, absolute, None)?,
        ttl => state
            .signer
            .temporary_signed_url(path, &params, ttl, absolute, None)?,
    };

    println!("{url}");
    Ok(())
}

fn run_verify_command(url: &str, relative: bool, ignore: Vec<String>) -> anyhow::Result<()> {
    init_cli_tracing();

    let state = server::create_app_state(AppConfig::from_env(), RuntimeMode::Console);
    let mut request = RequestContext::parse(url)?;
    state.generator.policy().apply(&mut request);

    let mut ignore_query = (*state.ignore_query).clone();
    ignore_query.extend(ignore);

    if !state
        .signer
        .has_correct_signature(&request, !relative, &ignore_query)?
    {
        println!("invalid signature");
        std::process::exit(1);
    }
    if !state.signer.signature_has_not_expired(&request) {
        println!("expired");
        std::process::exit(1);
    }

    println!("valid");
    Ok(())
}

fn run_root_url_command(host: Option<&str>) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::from_env();
    let root = match host {
        Some(host) => {
            let state = server::create_app_state(config, RuntimeMode::Server);
            let mut request = RequestContext::parse(&format!("http://{host}/"))?;
            state.generator.policy().apply(&mut request);
            state.generator.root(Some(&request))
        }
        None => {
            let state = server::create_app_state(config, RuntimeMode::Console);
            state.generator.root(None)
        }
    };

    println!("{root}");
    Ok(())
}

/// 32 random bytes, base64-encoded with a `base64:` prefix
fn generate_key() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!(
        "base64:{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config = AppConfig::from_env();
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("urlseal v{VERSION}");
    println!("Signed URL verification and root URL normalization\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nApplication:");
    println!("  Name: {}", config.app.name);
    println!("  Env:  {}", config.app.env);
    println!(
        "  URL:  {}",
        config.app.url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  Key:  {}",
        if config.signing_key().is_ok() {
            "set"
        } else {
            "NOT SET (run 'urlseal key-generate')"
        }
    );

    println!("\nCommands:");
    println!("  urlseal serve          Start the HTTP server");
    println!("  urlseal sign           Print a signed URL");
    println!("  urlseal verify         Check a signed URL");
    println!("  urlseal key-generate   Generate an application key");
    println!("  urlseal root-url       Print the resolved root URL");
    println!("\nRun 'urlseal --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urlseal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    // Decide the root URL policy before accepting requests
    let state = server::create_app_state(AppConfig::from_env(), RuntimeMode::Server);
    tracing::info!(
        app = %state.config.app.name,
        env = %state.config.app.env,
        policy = %state.generator.policy(),
        "Application configured"
    );

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "urlseal server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
