pub mod api_async;
pub mod api_global;
pub mod api_handle;
pub mod utils;
