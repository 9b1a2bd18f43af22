//! Proxy configuration resolution from the process environment.
//!
//! Two independent proxy slots are resolved: one for trusted (first-party)
//! destinations and one for untrusted destinations such as user-supplied
//! webhook targets. Resolution is a pure function of an environment lookup,
//! so tests can feed in a map instead of mutating process globals.
//!
//! | Slot | Preferred variable | Fallback |
//! |------|--------------------|----------|
//! | trusted | `HTTPS_PROXY` | `https_proxy` (co-equal alias) |
//! | untrusted | `OUTRIDER_PROXY_FOR_UNTRUSTED_URLS` | `OUTRIDER_HTTPS_PROXY` (deprecated) |
//!
//! Setting the untrusted slot to the literal value `direct` opts out of
//! proxying even when a variable is set.

use std::fmt;

/// Preferred variable for the trusted-destination proxy.
pub const TRUSTED_PROXY_VAR: &str = "HTTPS_PROXY";

/// Lower-case alias for the trusted-destination proxy, checked second.
pub const TRUSTED_PROXY_VAR_ALIAS: &str = "https_proxy";

/// Preferred variable for the untrusted-destination proxy.
pub const UNTRUSTED_PROXY_VAR: &str = "OUTRIDER_PROXY_FOR_UNTRUSTED_URLS";

/// Deprecated alias for the untrusted-destination proxy.
pub const UNTRUSTED_PROXY_VAR_DEPRECATED: &str = "OUTRIDER_HTTPS_PROXY";

/// Untrusted-slot value that forces direct connections, proxy or not.
pub const DIRECT_PROXY_VALUE: &str = "direct";

/// A deprecated variable supplied a value during resolution.
///
/// Informational only; notices never block startup or requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    /// The deprecated variable that was read.
    pub old_var: &'static str,
    /// The variable that replaces it.
    pub new_var: &'static str,
    /// The value resolved from the deprecated variable.
    pub value: String,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is deprecated in favor of {}. Please rather set {}=\"{}\"",
            self.old_var, self.new_var, self.new_var, self.value
        )
    }
}

/// Resolved proxy configuration snapshot.
///
/// `None` in a slot means requests of that trust class go out directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    /// Proxy URL for trusted (first-party) destinations.
    pub trusted: Option<String>,
    /// Proxy URL for untrusted (externally supplied) destinations.
    pub untrusted: Option<String>,
    /// Notices collected while resolving, one per deprecated variable used.
    pub notices: Vec<DeprecationNotice>,
}

impl ProxySettings {
    /// Resolve proxy settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve proxy settings through an arbitrary environment lookup.
    ///
    /// Pure and idempotent: the same lookup yields the same settings and
    /// the same notice list every time. Empty values count as unset.
    #[must_use]
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let trusted = non_empty(lookup(TRUSTED_PROXY_VAR))
            .or_else(|| non_empty(lookup(TRUSTED_PROXY_VAR_ALIAS)));

        let mut notices = Vec::new();
        let mut untrusted = non_empty(lookup(UNTRUSTED_PROXY_VAR));
        if untrusted.is_none() {
            if let Some(value) = non_empty(lookup(UNTRUSTED_PROXY_VAR_DEPRECATED)) {
                notices.push(DeprecationNotice {
                    old_var: UNTRUSTED_PROXY_VAR_DEPRECATED,
                    new_var: UNTRUSTED_PROXY_VAR,
                    value: value.clone(),
                });
                untrusted = Some(value);
            }
        }

        // The literal "direct" is an explicit opt-out, not a proxy URL.
        let untrusted = untrusted.filter(|value| value != DIRECT_PROXY_VALUE);

        Self {
            trusted,
            untrusted,
            notices,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_nothing_set() {
        let settings = ProxySettings::resolve(lookup_from(&[]));

        assert_eq!(settings.trusted, None);
        assert_eq!(settings.untrusted, None);
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_trusted_from_preferred_var() {
        let settings =
            ProxySettings::resolve(lookup_from(&[(TRUSTED_PROXY_VAR, "https://localhost:9000")]));

        assert_eq!(settings.trusted.as_deref(), Some("https://localhost:9000"));
        assert_eq!(settings.untrusted, None);
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_trusted_from_lowercase_alias() {
        let settings = ProxySettings::resolve(lookup_from(&[(
            TRUSTED_PROXY_VAR_ALIAS,
            "https://localhost:9000",
        )]));

        assert_eq!(settings.trusted.as_deref(), Some("https://localhost:9000"));
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_trusted_preferred_var_wins_over_alias() {
        let settings = ProxySettings::resolve(lookup_from(&[
            (TRUSTED_PROXY_VAR, "https://preferred:9000"),
            (TRUSTED_PROXY_VAR_ALIAS, "https://alias:9000"),
        ]));

        assert_eq!(settings.trusted.as_deref(), Some("https://preferred:9000"));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let settings = ProxySettings::resolve(lookup_from(&[
            (TRUSTED_PROXY_VAR, ""),
            (TRUSTED_PROXY_VAR_ALIAS, "https://alias:9000"),
            (UNTRUSTED_PROXY_VAR, ""),
        ]));

        assert_eq!(settings.trusted.as_deref(), Some("https://alias:9000"));
        assert_eq!(settings.untrusted, None);
    }

    #[test]
    fn test_untrusted_from_preferred_var() {
        let settings =
            ProxySettings::resolve(lookup_from(&[(UNTRUSTED_PROXY_VAR, "https://localhost:9001")]));

        assert_eq!(settings.untrusted.as_deref(), Some("https://localhost:9001"));
        assert_eq!(settings.trusted, None);
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_untrusted_from_deprecated_alias_emits_one_notice() {
        let settings = ProxySettings::resolve(lookup_from(&[(
            UNTRUSTED_PROXY_VAR_DEPRECATED,
            "https://localhost:9001",
        )]));

        assert_eq!(settings.untrusted.as_deref(), Some("https://localhost:9001"));
        assert_eq!(
            settings.notices,
            vec![DeprecationNotice {
                old_var: UNTRUSTED_PROXY_VAR_DEPRECATED,
                new_var: UNTRUSTED_PROXY_VAR,
                value: "https://localhost:9001".to_string(),
            }]
        );

        let rendered = settings.notices[0].to_string();
        assert!(rendered.contains(UNTRUSTED_PROXY_VAR_DEPRECATED));
        assert!(rendered.contains(UNTRUSTED_PROXY_VAR));
        assert!(rendered.contains("https://localhost:9001"));
    }

    #[test]
    fn test_deprecated_alias_ignored_when_preferred_set() {
        let settings = ProxySettings::resolve(lookup_from(&[
            (UNTRUSTED_PROXY_VAR, "https://preferred:9001"),
            (UNTRUSTED_PROXY_VAR_DEPRECATED, "https://deprecated:9001"),
        ]));

        assert_eq!(settings.untrusted.as_deref(), Some("https://preferred:9001"));
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_both_slots_resolve_independently() {
        let settings = ProxySettings::resolve(lookup_from(&[
            (TRUSTED_PROXY_VAR, "https://localhost:9000"),
            (UNTRUSTED_PROXY_VAR, "https://localhost:9001"),
        ]));

        assert_eq!(settings.trusted.as_deref(), Some("https://localhost:9000"));
        assert_eq!(settings.untrusted.as_deref(), Some("https://localhost:9001"));
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_direct_forces_no_untrusted_proxy() {
        let settings = ProxySettings::resolve(lookup_from(&[(UNTRUSTED_PROXY_VAR, "direct")]));

        assert_eq!(settings.untrusted, None);
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_direct_wins_even_with_deprecated_alias_set() {
        // The preferred variable is consulted first, so the alias never
        // resolves and no notice is owed for it.
        let settings = ProxySettings::resolve(lookup_from(&[
            (UNTRUSTED_PROXY_VAR, "direct"),
            (UNTRUSTED_PROXY_VAR_DEPRECATED, "https://deprecated:9001"),
        ]));

        assert_eq!(settings.untrusted, None);
        assert!(settings.notices.is_empty());
    }

    #[test]
    fn test_direct_through_deprecated_alias_keeps_its_notice() {
        let settings =
            ProxySettings::resolve(lookup_from(&[(UNTRUSTED_PROXY_VAR_DEPRECATED, "direct")]));

        assert_eq!(settings.untrusted, None);
        assert_eq!(settings.notices.len(), 1);
        assert_eq!(settings.notices[0].value, "direct");
    }

    #[test]
    fn test_direct_does_not_affect_trusted_slot() {
        let settings = ProxySettings::resolve(lookup_from(&[
            (TRUSTED_PROXY_VAR, "direct"),
            (UNTRUSTED_PROXY_VAR, "https://localhost:9001"),
        ]));

        // Only the untrusted slot knows the "direct" opt-out.
        assert_eq!(settings.trusted.as_deref(), Some("direct"));
        assert_eq!(settings.untrusted.as_deref(), Some("https://localhost:9001"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let pairs = [
            (TRUSTED_PROXY_VAR, "https://localhost:9000"),
            (UNTRUSTED_PROXY_VAR_DEPRECATED, "https://localhost:9001"),
        ];

        let first = ProxySettings::resolve(lookup_from(&pairs));
        let second = ProxySettings::resolve(lookup_from(&pairs));

        assert_eq!(first, second);
    }
}
