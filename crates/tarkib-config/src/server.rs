use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Base URL used when building absolute links in responses.
    pub public_base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.trim_start_matches(':').parse().ok())
            .unwrap_or(8080);

        Self {
            port,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
