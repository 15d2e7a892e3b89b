// Build-time version from Cargo.toml

use aws_config::AppName;

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// App name sent in the AWS SDK user agent. None if the package name has characters the SDK rejects.
pub fn app_name() -> Option<AppName> {
    AppName::new(NAME).ok()
}
