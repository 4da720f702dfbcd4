use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MediConnect";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base path when no override is set.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";

/// Base URL of the remote MediConnect API.
/// Overridable via MEDICONNECT_API_URL for non-local deployments.
pub fn api_base_url() -> String {
    std::env::var("MEDICONNECT_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}

/// Get the application data directory
/// ~/.mediconnect/ on all platforms
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".mediconnect")
}

/// Where the persisted session (token + role) lives.
pub fn session_file() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "mediconnect=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(".mediconnect"));
    }

    #[test]
    fn session_file_under_app_data() {
        let file = session_file();
        assert!(file.starts_with(app_data_dir()));
        assert!(file.ends_with("session.json"));
    }

    #[test]
    fn app_name_is_mediconnect() {
        assert_eq!(APP_NAME, "MediConnect");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
