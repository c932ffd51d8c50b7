//! HTTP route handlers

pub mod convert;
