//! Database connection settings shared by every command
//!
//! Values come from flags, then environment (a `.env` in the working
//! directory is loaded first), then defaults.

use std::time::Duration;

use clap::Args;
use enrollctl_server::db::DEFAULT_MAX_CONNECTIONS;

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL; overrides the discrete DB_* settings
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true, hide_default_value = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "enrollctl")]
    pub db_name: String,

    /// Seconds to keep retrying the initial connection
    #[arg(long, env = "DB_RETRY_DURATION", default_value_t = 10)]
    pub db_retry_duration: u64,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Connection URL, built from the discrete settings when no URL is given.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let credentials = if self.db_password.is_empty() {
            urlencoding::encode(&self.db_user).into_owned()
        } else {
            format!(
                "{}:{}",
                urlencoding::encode(&self.db_user),
                urlencoding::encode(&self.db_password)
            )
        };

        format!(
            "postgres://{}@{}:{}/{}?sslmode=disable",
            credentials, self.db_host, self.db_port, self.db_name
        )
    }

    pub fn retry_duration(&self) -> Duration {
        Duration::from_secs(self.db_retry_duration)
    }

    /// Where we connect, without credentials, for log lines.
    pub fn target(&self) -> String {
        match &self.database_url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}:{}/{}", self.db_host, self.db_port, self.db_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DatabaseArgs {
        DatabaseArgs {
            database_url: None,
            db_host: "db".into(),
            db_port: 5433,
            db_user: "app".into(),
            db_password: String::new(),
            db_name: "school".into(),
            db_retry_duration: 10,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    #[test]
    fn builds_url_from_parts() {
        assert_eq!(
            args().connection_url(),
            "postgres://app@db:5433/school?sslmode=disable"
        );
    }

    #[test]
    fn escapes_password() {
        let mut args = args();
        args.db_password = "p@ss/word".into();
        assert_eq!(
            args.connection_url(),
            "postgres://app:p%40ss%2Fword@db:5433/school?sslmode=disable"
        );
        assert!(!args.target().contains("p@ss"));
    }

    #[test]
    fn explicit_url_wins() {
        let mut args = args();
        args.database_url = Some("postgres://elsewhere/x".into());
        assert_eq!(args.connection_url(), "postgres://elsewhere/x");
        assert_eq!(args.target(), "DATABASE_URL");
    }
}
