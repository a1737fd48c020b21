/// What `build.rs` recorded about this binary.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// Label/value rows for the `version` command.
    pub fn rows(&self) -> [(&'static str, String); 5] {
        [
            ("Build hash", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.timestamp.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}

macro_rules! build_env {
    ($name:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: build_env!("STERDIARY_BUILD_HASH"),
        git_status: build_env!("STERDIARY_BUILD_STATUS"),
        timestamp: build_env!("STERDIARY_BUILD_TIMESTAMP"),
        target: build_env!("STERDIARY_BUILD_TARGET"),
        profile: build_env!("STERDIARY_BUILD_PROFILE"),
        rustc: build_env!("STERDIARY_BUILD_RUSTC"),
    }
}
