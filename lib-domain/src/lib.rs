pub mod datastore;
pub mod dto;
pub mod extension;
pub mod import;
pub mod service;
pub mod session;
