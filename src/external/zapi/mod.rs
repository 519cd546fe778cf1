//! Z-API gateway adapter.

mod client;
mod types;

pub use client::{InstanceCredentials, ZapiClient};
pub use types::{
    GatewayError, GatewayErrorKind, GatewayResult, GroupMetadata, GroupSummary, MessageReceipt,
    ParticipantInfo,
};
