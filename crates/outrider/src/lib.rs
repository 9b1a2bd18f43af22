//! # outrider
//!
//! Trust-classified forward-proxy routing for outgoing HTTP(S) requests.
//!
//! Server applications make two very different kinds of outgoing requests:
//! calls to their own first-party services, and calls to destinations
//! supplied by external actors (webhook targets, user-configured
//! integrations). This crate routes each through zero, one, or two
//! independently configured forward proxies, selected by that trust
//! classification:
//!
//! - **trusted** — proxied through `HTTPS_PROXY` (or `https_proxy`) when
//!   set, directly otherwise.
//! - **untrusted** — proxied through `OUTRIDER_PROXY_FOR_UNTRUSTED_URLS`
//!   (or the deprecated `OUTRIDER_HTTPS_PROXY`) when set, directly
//!   otherwise. The literal value `direct` forces direct connections.
//!
//! Configuration is resolved once at startup into a process-wide
//! [`AgentRegistry`]; each configured slot gets a [`ProxyAgent`] whose
//! connections are bound to that fixed proxy. Dispatch makes exactly one
//! transport attempt per call, passes responses through unchanged whatever
//! their HTTP status, and on a proxied transport failure logs a sanitized
//! diagnostic (proxy URL, request protocol, request origin; never the
//! path, query, or credentials) before propagating the original error.
//!
//! ## Example
//!
//! ```no_run
//! use outrider::{fetch_untrusted, RequestOptions};
//!
//! # async fn example() -> outrider::Result<()> {
//! // Fail fast on bad proxy configuration before serving traffic.
//! outrider::agents()?;
//!
//! // Deliver a webhook through the untrusted-destination proxy, if one
//! // is configured.
//! let options = RequestOptions::post_json(&serde_json::json!({"event": "ping"}))?;
//! let response = fetch_untrusted("https://hooks.example.com/deliver", options).await?;
//! println!("delivered: {}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;

pub use agent::ProxyAgent;
pub use config::{DeprecationNotice, ProxySettings};
pub use dispatch::{
    fetch_trusted, fetch_untrusted, ProxyFailure, RequestOptions, PROXY_FAILURE_PREFIX,
};
pub use error::{Error, Result};
pub use registry::{agents, rebuild_agents, AgentRegistry, TrustClass};

// Callers build on the transport's request/response types directly.
pub use reqwest;
