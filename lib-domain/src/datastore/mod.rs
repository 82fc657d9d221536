use lib_core::config;
use surrealdb::{
    engine::remote::ws::{Client, Ws},
    opt::auth::Root,
    RecordId, Surreal,
};

pub mod learning_record;
pub mod learning_url;
pub mod user;
pub mod workspace;

#[cfg(test)]
pub(crate) mod mock;

pub struct Datastore {
    db: Surreal<Client>,
}

impl Datastore {
    pub(crate) async fn connect() -> Self {
        let db_config = config::DbConfig::new();

        let url = db_config.url;
        let db = Surreal::new::<Ws>(&url).await.expect(&format!("Failed to connect to db: {url}"));

        db.signin(Root {
            username: &db_config.username,
            password: &db_config.password,
        })
        .await
        .expect("Failed to sign into db");

        db.use_ns(db_config.namespace).use_db(db_config.database).await.expect("Failed to select ns and db");

        Self {
            db,
        }
    }
}

/// Alphabet for minted record keys. Stays inside Surreal's plain
/// identifier character set so keys round-trip through `RecordId`
/// display without bracket escaping.
pub(crate) const KEY_ALPHABET: [char; 63] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k',
    'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F',
    'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '_',
];

trait DbSchema {
    fn table_name() -> &'static str;

    fn get_id(key: &str) -> RecordId {
        RecordId::from_table_key(Self::table_name(), key)
    }
}
