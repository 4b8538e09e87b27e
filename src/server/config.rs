use std::path::PathBuf;

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Root directory for documents and objects
    pub data_dir: PathBuf,
    /// Base URL clients use to reach this server; object URLs are built on it
    pub public_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables:
    /// - `LAKE_DILLON_PORT` (default 8080)
    /// - `LAKE_DILLON_DATA_DIR` (default ~/.local/share/lake-dillon-server)
    /// - `LAKE_DILLON_PUBLIC_URL` (default http://localhost:<port>)
    pub fn from_env() -> Self {
        let port = std::env::var("LAKE_DILLON_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let data_dir = std::env::var("LAKE_DILLON_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("lake-dillon-server")
            });

        let public_url = std::env::var("LAKE_DILLON_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        Self::new(port, data_dir, public_url)
    }

    pub fn new(port: u16, data_dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            port,
            data_dir: data_dir.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data_dir.join("objects")
    }

    /// Prefix of every object URL handed out.
    pub fn objects_url(&self) -> String {
        format!("{}/objects", self.public_url)
    }
}
