//! Egress routing demo
//!
//! Resolves the proxy configuration from the environment, reports which
//! trust classes have agents, then dispatches one request through the
//! selected class.
//!
//! # Usage
//!
//! ```bash
//! # No proxies: direct fetch
//! cargo run --example egress_demo -- --url https://example.com/
//!
//! # Route untrusted traffic through a local proxy
//! export OUTRIDER_PROXY_FOR_UNTRUSTED_URLS="http://localhost:3128"
//! cargo run --example egress_demo -- --url https://example.com/ --untrusted
//!
//! # Watch the sanitized diagnostic when the proxy is down
//! RUST_LOG=warn cargo run --example egress_demo -- \
//!     --url https://example.com/ --untrusted
//! ```

use anyhow::Result;
use clap::Parser;

use outrider::{RequestOptions, TrustClass};

#[derive(Parser, Debug)]
#[command(author, version, about = "Egress routing demo")]
struct Args {
    /// Destination URL to fetch
    #[arg(long, default_value = "https://example.com/")]
    url: String,

    /// Dispatch as untrusted (webhook-style) instead of trusted
    #[arg(long)]
    untrusted: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = outrider::ProxySettings::from_env();
    println!("trusted proxy:   {}", settings.trusted.as_deref().unwrap_or("(direct)"));
    println!("untrusted proxy: {}", settings.untrusted.as_deref().unwrap_or("(direct)"));
    for notice in &settings.notices {
        println!("note: {notice}");
    }

    // Builds the shared registry on first access; a bad proxy URL fails here.
    let registry = outrider::agents()?;

    let class = if args.untrusted {
        TrustClass::Untrusted
    } else {
        TrustClass::Trusted
    };

    let response = registry.fetch(class, &args.url, RequestOptions::new()).await?;
    println!("{} {} -> {}", class, args.url, response.status());

    Ok(())
}
