#![allow(clippy::result_large_err)]
#![allow(clippy::large_enum_variant)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
#[macro_use]
extern crate serde_json;

pub mod errors;
pub mod handlers;
pub mod messages;
pub mod protocols;
pub mod transport;
