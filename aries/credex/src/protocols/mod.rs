use futures::future::BoxFuture;

use crate::{errors::error::VcxResult, messages::AriesMessage};

pub mod common;
pub mod issuance;

pub type SendClosure = Box<dyn Fn(AriesMessage) -> BoxFuture<'static, VcxResult<()>> + Send + Sync>;
