//! Key exchange.

use super::GUID;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

/// Length of a base64 encoded sha1 digest.
pub const ACCEPT_KEY_LEN: usize = 28;

/// Derive `Sec-WebSocket-Accept` from `Sec-WebSocket-Key`.
#[inline]
pub fn derive_accept_key(sec_key: &[u8]) -> [u8; ACCEPT_KEY_LEN] {
    let mut sha1 = Sha1::default();
    sha1.update(sec_key);
    sha1.update(GUID);
    let input = sha1.finalize();
    let mut output = [0_u8; ACCEPT_KEY_LEN];
    STANDARD.encode_slice(input, &mut output).expect("20 byte digest");
    output
}
