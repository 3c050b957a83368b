/// Environment variable that enables collection when set to a truthy token.
pub const ENABLE_ENV_VAR: &str = "VULKAN_SIM_ENABLE_RAY_STATS";

const TRUTHY_TOKENS: [&str; 3] = ["1", "true", "TRUE"];

/// Decides whether instrumentation touches the counters at all.
///
/// Resolved once at startup and never changed afterwards, so reading it from worker
/// threads needs no synchronization beyond the handoff that shares the context.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionGate {
    enabled: bool,
}

impl CollectionGate {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Only the exact tokens `1`, `true` and `TRUE` enable the gate. Anything else,
    /// including a missing value, disables it.
    pub fn resolve(value: Option<&str>) -> Self {
        Self {
            enabled: value.map_or(false, |v| TRUTHY_TOKENS.contains(&v)),
        }
    }

    pub fn from_env() -> Self {
        // Non-unicode values can't match a token so they land on disabled too
        Self::resolve(std::env::var(ENABLE_ENV_VAR).ok().as_deref())
    }

    #[inline(always)]
    pub fn is_enabled(self) -> bool {
        self.enabled
    }
}

impl From<bool> for CollectionGate {
    fn from(enabled: bool) -> Self {
        Self { enabled }
    }
}
