//! Process-wide registry of proxy agents, one slot per trust class.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::warn;
use once_cell::sync::Lazy;
use reqwest::Client;

use crate::agent::ProxyAgent;
use crate::config::ProxySettings;
use crate::error::{Error, Result};

/// Trust classification of a request's destination.
///
/// Trusted destinations are internal or first-party; untrusted destinations
/// are supplied by external actors, such as webhook targets. The class
/// selects which proxy slot (if any) a request is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustClass {
    /// Internal or first-party destinations.
    Trusted,
    /// Externally supplied destinations.
    Untrusted,
}

impl fmt::Display for TrustClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trusted => write!(f, "trusted"),
            Self::Untrusted => write!(f, "untrusted"),
        }
    }
}

/// Immutable set of proxy agents derived from one configuration snapshot.
///
/// Holds at most one agent per trust class, plus a direct client used when
/// a class has no proxy configured. The direct client is built with proxies
/// disabled so environment proxy variables cannot reach the no-agent path
/// behind this layer's back.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    trusted: Option<ProxyAgent>,
    untrusted: Option<ProxyAgent>,
    direct: Client,
}

impl AgentRegistry {
    /// Build a registry from a resolved configuration snapshot.
    ///
    /// Pure with respect to logging: deprecation notices carried by
    /// `settings` are not emitted here. See [`AgentRegistry::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a configured proxy URL is
    /// invalid or a client cannot be built.
    pub fn build(settings: &ProxySettings) -> Result<Self> {
        let direct = Client::builder().no_proxy().build().map_err(|e| {
            Error::Configuration(format!("failed to build direct client: {e}"))
        })?;

        Ok(Self {
            trusted: settings.trusted.as_deref().map(ProxyAgent::new).transpose()?,
            untrusted: settings
                .untrusted
                .as_deref()
                .map(ProxyAgent::new)
                .transpose()?,
            direct,
        })
    }

    /// Resolve the process environment and build a registry from it.
    ///
    /// Deprecation notices collected during resolution are emitted here at
    /// warning severity, once per notice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a configured proxy URL is
    /// invalid or a client cannot be built.
    pub fn from_env() -> Result<Self> {
        let settings = ProxySettings::from_env();
        for notice in &settings.notices {
            warn!("{notice}");
        }
        Self::build(&settings)
    }

    /// The agent for a trust class, or `None` when that class connects
    /// directly.
    #[must_use]
    pub const fn agent_for(&self, class: TrustClass) -> Option<&ProxyAgent> {
        match class {
            TrustClass::Trusted => self.trusted.as_ref(),
            TrustClass::Untrusted => self.untrusted.as_ref(),
        }
    }

    /// The proxy-free client used when a class has no agent.
    pub(crate) const fn direct_client(&self) -> &Client {
        &self.direct
    }
}

static AGENTS: Lazy<RwLock<Option<Arc<AgentRegistry>>>> = Lazy::new(|| RwLock::new(None));

/// The process-wide agent registry, built from the environment on first
/// access and shared thereafter.
///
/// Call this once during startup so a bad proxy configuration fails the
/// process before it serves traffic. Steady-state readers only clone a
/// shared handle.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the first build fails; later calls
/// retry until one succeeds.
pub fn agents() -> Result<Arc<AgentRegistry>> {
    if let Some(existing) = AGENTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Ok(Arc::clone(existing));
    }

    let mut slot = AGENTS.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = slot.as_ref() {
        // Another caller finished initializing while we waited.
        return Ok(Arc::clone(existing));
    }

    let built = Arc::new(AgentRegistry::from_env()?);
    *slot = Some(Arc::clone(&built));
    Ok(built)
}

/// Re-resolve the environment and atomically replace the shared registry.
///
/// Reserved for test harnesses and administrative configuration reload;
/// request-serving code paths must never call this. Concurrent readers
/// observe either the old registry or the new one, never a partial build.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the rebuild fails; the previous
/// registry stays in place.
pub fn rebuild_agents() -> Result<Arc<AgentRegistry>> {
    let rebuilt = Arc::new(AgentRegistry::from_env()?);
    *AGENTS.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&rebuilt));
    Ok(rebuilt)
}
