pub mod error;
mod mapping_from_ariesvcx;
mod mapping_from_others;
pub mod mapping_to_u32;
