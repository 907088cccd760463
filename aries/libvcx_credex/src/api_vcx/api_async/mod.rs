//! Completion based entry points. Every call schedules its work on the shared runtime and
//! returns immediately.

pub mod credential;
