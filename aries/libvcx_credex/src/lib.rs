#![allow(clippy::result_large_err)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;
#[macro_use]
extern crate serde_json;

pub mod api_vcx;
pub mod errors;
