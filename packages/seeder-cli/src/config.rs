use anyhow::{Context, Result, bail};
use url::Url;

pub(crate) const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
pub(crate) const SERVER_ENV: &str = "SEEDER_SERVER_URL";

/// `--server` wins over `SEEDER_SERVER_URL`, which wins over the default.
pub(crate) fn resolve_server(flag: Option<String>, env: Option<String>) -> Result<String> {
    let server = flag
        .or(env)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let url = Url::parse(&server).with_context(|| format!("invalid server url: {server}"))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        bail!("server url must be http(s): {server}");
    }

    Ok(server)
}

pub(crate) fn server_from_env(flag: Option<String>) -> Result<String> {
    resolve_server(flag, std::env::var(SERVER_ENV).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server() {
        assert_eq!(resolve_server(None, None).unwrap(), DEFAULT_SERVER);
    }

    #[test]
    fn test_flag_beats_env() {
        let server = resolve_server(
            Some("http://10.0.0.2:9000".to_string()),
            Some("http://10.0.0.3:9000".to_string()),
        )
        .unwrap();
        assert_eq!(server, "http://10.0.0.2:9000");
    }

    #[test]
    fn test_env_beats_default() {
        let server = resolve_server(None, Some("https://notify.internal".to_string())).unwrap();
        assert_eq!(server, "https://notify.internal");
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        assert_eq!(resolve_server(None, Some("  ".to_string())).unwrap(), DEFAULT_SERVER);
    }

    #[test]
    fn test_invalid_server_rejected() {
        assert!(resolve_server(Some("not a url".to_string()), None).is_err());
        assert!(resolve_server(Some("localhost:8000".to_string()), None).is_err());
        assert!(resolve_server(Some("ftp://example.com".to_string()), None).is_err());
    }
}
