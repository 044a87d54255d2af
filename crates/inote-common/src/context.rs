use std::collections::HashMap;

/// Prefix Checkmk puts on every context variable it exports to a
/// notification script.
const ENV_PREFIX: &str = "NOTIFY_";

/// Flat key/value snapshot of one monitoring event.
///
/// Checkmk passes the event context as `NOTIFY_*` environment variables;
/// [`EventContext::from_env`] strips the prefix so keys read `WHAT`,
/// `HOSTSTATE`, `PARAMETER_INOTE_MSG_DURATION` and so on. The context is
/// read-only for the lifetime of the event.
///
/// # Examples
///
/// ```
/// use inote_common::context::EventContext;
///
/// let ctx = EventContext::from_pairs([("WHAT", "HOST"), ("HOSTSTATE", "DOWN")]);
/// assert_eq!(ctx.get("WHAT"), Some("HOST"));
/// assert_eq!(ctx.get("SERVICESTATE"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    vars: HashMap<String, String>,
}

impl EventContext {
    /// Collects the context from the process environment.
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars()
                .filter_map(|(k, v)| {
                    k.strip_prefix(ENV_PREFIX).map(|key| (key.to_string(), v))
                })
                .collect(),
        }
    }

    /// Builds a context from explicit pairs (keys without the `NOTIFY_`
    /// prefix).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
