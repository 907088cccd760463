pub mod issuance;
pub mod util;
