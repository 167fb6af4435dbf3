use std::io;

use thiserror::Error;

use crate::network::mac::MacParseError;

/// Failure modes of the wake operation.
///
/// [`WakeError::MacNotConfigured`] is the only configuration-class
/// error; everything else is a transmission failure.
#[derive(Debug, Error)]
pub enum WakeError {
    #[error("PC_MAC not configured")]
    MacNotConfigured,

    #[error("invalid MAC address: {0}")]
    InvalidMac(#[from] MacParseError),

    #[error("failed to send magic packet: {0}")]
    Transmission(#[from] io::Error),
}
