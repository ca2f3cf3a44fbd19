use crate::config::Credentials;
use crate::db::models::HomeRecord;
use crate::error::AcquireError;
use crate::service::acquire::HousingSource;
use crate::types::HousingDataset;
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use std::fmt;
use tracing::{debug, warn};

/// Driver tag written into the descriptor string.
pub const DRIVER: &str = "mysql+pymysql";

/// Target database. Not configurable.
pub const DATABASE: &str = "zillow";

/// `<driver>://<user>:<password>@<host>/<database>`.
///
/// `Display` renders the full string, password included and nothing escaped.
/// `Debug` redacts the password so descriptors can be logged.
#[derive(Clone, PartialEq)]
pub struct ConnectionDescriptor {
    user: String,
    password: String,
    host: String,
}

impl ConnectionDescriptor {
    pub fn from_credentials(creds: &Credentials) -> Self {
        Self {
            user: creds.user.clone(),
            password: creds.password.clone(),
            host: creds.host.clone(),
        }
    }

    /// Driver options for an actual MySQL session.
    ///
    /// A trailing `:<port>` on the host is honored; anything that does not
    /// parse as a port stays part of the host name.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let opts = MySqlConnectOptions::new()
            .username(&self.user)
            .password(&self.password)
            .database(DATABASE);
        match split_host_port(&self.host) {
            (host, Some(port)) => opts.host(host).port(port),
            (host, None) => opts.host(host),
        }
    }
}

fn split_host_port(host: &str) -> (&str, Option<u16>) {
    host.rsplit_once(':')
        .and_then(|(h, p)| p.parse::<u16>().ok().map(|port| (h, Some(port))))
        .unwrap_or((host, None))
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DRIVER}://{}:{}@{}/{DATABASE}",
            self.user, self.password, self.host
        )
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DRIVER}://{}:***@{}/{DATABASE}", self.user, self.host)
    }
}

/// Queries the `zillow` database over a fresh connection per call.
#[derive(Debug, Clone)]
pub struct MySqlSource {
    credentials: Credentials,
}

impl MySqlSource {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl HousingSource for MySqlSource {
    async fn fetch(&self, query: &str) -> Result<HousingDataset, AcquireError> {
        let descriptor = ConnectionDescriptor::from_credentials(&self.credentials);
        debug!(descriptor = ?descriptor, "opening database connection");

        let mut conn = MySqlConnection::connect_with(&descriptor.connect_options())
            .await
            .map_err(AcquireError::Connection)?;

        let rows: Vec<HomeRecord> = sqlx::query_as(query)
            .fetch_all(&mut conn)
            .await
            .map_err(AcquireError::Query)?;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close database connection cleanly");
        }
        debug!(rows = rows.len(), "query returned");
        Ok(rows.into())
    }
}
