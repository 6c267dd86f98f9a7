//! Decoder configuration owned by a `NotationDecoder` instance.

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const CACHE_CAPACITY_ENV: &str = "XIANGQI_CACHE_CAPACITY";
pub const RECOVERY_ENV: &str = "XIANGQI_RECOVERY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of memoised decodes; `0` disables the cache.
    pub cache_capacity: usize,
    /// Run the error-recovery pipeline on recoverable failures.
    pub recovery: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            recovery: true,
        }
    }
}

impl DecoderConfig {
    #[inline]
    pub fn caching_enabled(self) -> bool {
        self.cache_capacity > 0
    }

    /// Capacity rounded up so that halving on eviction always keeps at least
    /// one entry.
    #[inline]
    pub fn normalized_capacity(self) -> usize {
        if self.caching_enabled() {
            self.cache_capacity.max(2)
        } else {
            0
        }
    }

    /// Defaults overridden by `XIANGQI_CACHE_CAPACITY` and `XIANGQI_RECOVERY`.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(capacity) = lookup(CACHE_CAPACITY_ENV).and_then(|v| v.trim().parse().ok()) {
            config.cache_capacity = capacity;
        }
        match lookup(RECOVERY_ENV).as_deref().map(str::trim) {
            Some(v) if v == "0" || v.eq_ignore_ascii_case("off") || v.eq_ignore_ascii_case("false") => {
                config.recovery = false;
            }
            Some(v) if v == "1" || v.eq_ignore_ascii_case("on") || v.eq_ignore_ascii_case("true") => {
                config.recovery = true;
            }
            _ => {}
        }
        config
    }
}
