//! Build-time display metadata.

/// Version, environment and build timestamp, rendered into the background.
///
/// These are opaque strings; nothing parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub env: String,
    pub build_time: String,
}

impl BuildInfo {
    /// Metadata baked in at compile time.
    ///
    /// `TERMFOLIO_ENV` and `TERMFOLIO_BUILD_TIME` are read from the build
    /// environment; unset values fall back to `development` and `unknown`.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            env: option_env!("TERMFOLIO_ENV")
                .unwrap_or("development")
                .to_string(),
            build_time: option_env!("TERMFOLIO_BUILD_TIME")
                .unwrap_or("unknown")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_has_package_version() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.env.is_empty());
        assert!(!info.build_time.is_empty());
    }
}
