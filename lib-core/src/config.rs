pub fn get_host_addr() -> String {
    let port = std::env::var("PORT").unwrap_or("8080".into());
    format!("[::]:{port}")
}

#[derive(Default)]
pub struct DbConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
}
impl DbConfig {
    pub fn new() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_default(),
            username: std::env::var("DATABASE_USERNAME").unwrap_or_default(),
            password: std::env::var("DATABASE_PASSWORD").unwrap_or_default(),
            namespace: std::env::var("DATABASE_NS").unwrap_or(String::from("incline")),
            database: std::env::var("DATABASE_DB").unwrap_or(String::from("incline")),
        }
    }
}

pub(crate) struct IdentityConfig {
    pub aud: String,
    pub pem: String,
}

impl IdentityConfig {
    pub(crate) fn new() -> Self {
        Self {
            aud: std::env::var("IDENTITY_AUD").unwrap_or_default(),
            pem: std::env::var("IDENTITY_PEM").unwrap_or_default(),
        }
    }
}
