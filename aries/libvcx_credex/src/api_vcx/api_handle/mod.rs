pub mod connection;
pub mod credential;
pub mod object_cache;
