//! Calculator build stamp
//!
//! `build.rs` bumps the build counter and records the compile time. The
//! values surface in `tdee_status` and on stderr when the server starts.

use serde::Serialize;

/// Counter kept in `build_number.txt`, 0 when built without `build.rs`
pub const BUILD_NUMBER: u64 = match option_env!("TDEE_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// UTC compile time, RFC 3339
pub const BUILD_TIMESTAMP: &str = match option_env!("TDEE_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Reported as the MCP server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// option_env! yields a &str, so the counter is parsed at compile time
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if !digit.is_ascii_digit() {
            return None;
        }
        n = n * 10 + (digit - b'0') as u64;
        i += 1;
    }
    Some(n)
}

/// Build stamp embedded in the status payload
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }

    /// One-line identifier, e.g. `tdee 1.0.0+17`
    pub fn label(&self) -> String {
        format!("{} {}+{}", self.name, self.version, self.build_number)
    }
}

/// Lines shown on stderr before the stdio transport starts
pub fn startup_banner() -> Vec<String> {
    let info = BuildInfo::current();
    vec![
        format!("TDEE Calculator ({})", info.label()),
        format!("Built {}", info.build_timestamp),
        "BMR: Mifflin-St Jeor, or Katch-McArdle when body fat is given".to_string(),
        "Inputs are checked per call; nothing is stored".to_string(),
    ]
}

pub fn print_startup_banner() {
    for line in startup_banner() {
        eprintln!("[tdee] {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("17"), Some(17));
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("-3"), None);
        assert_eq!(parse_u64("1.5"), None);
    }

    #[test]
    fn test_label() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "tdee");
        assert_eq!(info.label(), format!("tdee {}+{}", VERSION, BUILD_NUMBER));
    }

    #[test]
    fn test_startup_banner_names_formulas() {
        let banner = startup_banner();
        assert!(banner[0].starts_with("TDEE Calculator (tdee "));
        assert!(banner.iter().any(|l| l.contains("Katch-McArdle")));
    }
}
