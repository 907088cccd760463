#[macro_use]
extern crate log;

pub mod errors;
pub mod logger;
pub mod mock_transport;
pub mod mockdata;
