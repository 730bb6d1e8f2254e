use clap::Parser;
use std::time::Duration;

const USAGE: &str = "\
files can be local or remote (api endpoints):
  remote: URI must start with http:// or https://
  local: passing directories is not supported, use glob instead.

additionally mok reads json from stdin, try it with 'echo '{\"k\": \"v\"}' | mok'";

/// Command line interface, parsed once at startup
#[derive(Debug, Parser)]
#[command(name = "mok", version, about = "Serve JSON files over HTTP", after_help = USAGE)]
struct Cli {
    /// Port to listen on
    #[arg(short = 'p', long, env = "MOK_PORT", default_value_t = 9172)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "MOK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// JSON string to serve on /
    #[arg(short = 's', long = "string", value_name = "JSON")]
    json_string: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Timeout in seconds for each remote download
    #[arg(long, env = "MOK_TIMEOUT", default_value_t = 30, value_name = "SECS")]
    timeout: u64,

    /// Milliseconds to wait for piped stdin to close
    #[arg(long, env = "MOK_STDIN_WAIT", default_value_t = 500, value_name = "MS")]
    stdin_wait: u64,

    /// Local JSON files or http(s):// URLs
    #[arg(value_name = "FILE_OR_URL")]
    sources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub json_string: Option<String>,
    pub verbose: bool,
    pub download_timeout: Duration,
    pub stdin_wait: Duration,
    pub sources: Vec<String>,
}

impl Config {
    pub fn from_args() -> Self {
        Cli::parse().into()
    }

    #[cfg(test)]
    fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Into::into)
    }

    /// Base URL printed to the user
    pub fn base_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn log_startup(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!("  Listening on: {}:{}", self.host, self.port);
        tracing::debug!("  Download timeout: {:?}", self.download_timeout);
        tracing::debug!("  Stdin wait: {:?}", self.stdin_wait);
        tracing::debug!(
            "  Inline JSON: {}",
            if self.json_string.is_some() { "set" } else { "not set" }
        );
        tracing::debug!("  Sources: {:?}", self.sources);
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            port: cli.port,
            host: cli.host,
            json_string: cli.json_string.filter(|s| !s.is_empty()),
            verbose: cli.verbose,
            download_timeout: Duration::from_secs(cli.timeout),
            stdin_wait: Duration::from_millis(cli.stdin_wait),
            sources: cli.sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_with_defaults() {
        let config = Config::try_from_iter(["mok", "a.json"]).unwrap();

        assert_eq!(config.port, 9172);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.json_string, None);
        assert!(!config.verbose);
        assert_eq!(config.download_timeout, Duration::from_secs(30));
        assert_eq!(config.stdin_wait, Duration::from_millis(500));
        assert_eq!(config.sources, vec!["a.json".to_string()]);
    }

    #[test]
    fn test_config_with_all_flags() {
        let config = Config::try_from_iter([
            "mok",
            "-p",
            "8080",
            "-s",
            r#"{"k":"v"}"#,
            "-v",
            "--host",
            "127.0.0.1",
            "--timeout",
            "5",
            "--stdin-wait",
            "2000",
            "a.json",
            "https://example.com/api",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.json_string.as_deref(), Some(r#"{"k":"v"}"#));
        assert!(config.verbose);
        assert_eq!(config.download_timeout, Duration::from_secs(5));
        assert_eq!(config.stdin_wait, Duration::from_secs(2));
        assert_eq!(config.sources, vec!["a.json", "https://example.com/api"]);
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_sources_keep_argument_order() {
        let config = Config::try_from_iter(["mok", "c.json", "a.json", "b.json", "a.json"]).unwrap();
        assert_eq!(config.sources, vec!["c.json", "a.json", "b.json", "a.json"]);
    }

    #[test]
    fn test_empty_json_string_is_ignored() {
        let config = Config::try_from_iter(["mok", "-s", ""]).unwrap();
        assert_eq!(config.json_string, None);
    }

    #[test]
    fn test_no_sources_parses() {
        // Missing sources is a resolution error, not a parse error
        let config = Config::try_from_iter(["mok"]).unwrap();
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::try_from_iter(["mok", "-p", "not-a-number"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_port_out_of_range() {
        let result = Config::try_from_iter(["mok", "-p", "99999"]);
        assert!(result.is_err());
    }
}
