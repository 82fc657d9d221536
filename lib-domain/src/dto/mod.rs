pub mod learning_record;
pub mod learning_url;
pub mod session;
pub mod user;
pub mod workspace;
