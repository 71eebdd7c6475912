//! `voxnote-gateway` — HTTP ingress for memo uploads.

pub mod server;
pub mod upload;

pub use server::{start_server, GatewayState};
