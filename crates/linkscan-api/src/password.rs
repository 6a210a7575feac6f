// Legacy login password obfuscation
//
// The E900 login form never carries the plaintext password. The page's
// JavaScript stretches it to a 64 character seed and posts the MD5 of
// that instead. The firmware compares digests, so this must match the
// page byte for byte.

use std::fmt;

use md5::{Digest, Md5};

/// Number of characters in the stretched seed that gets hashed.
const SEED_LEN: usize = 64;

/// Passwords shorter than this get a `'0'` pad before the length suffix.
const PAD_THRESHOLD: usize = 10;

/// The obfuscated password digest posted as `http_passwd`.
///
/// Always 32 lowercase hex characters. `Debug` is redacted: the digest
/// is a password equivalent as far as the router is concerned.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPassword(String);

impl EncodedPassword {
    /// The hex digest, for placing into the login form.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EncodedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncodedPassword([REDACTED])")
    }
}

/// Build the 64 character seed the router hashes.
///
/// Lengths and indices count characters, not bytes. The buffer is the
/// password, a `'0'` if it is shorter than ten characters, then its length
/// in decimal. The seed cycles through the buffer with a period of
/// `len + 2`; a position past the end of the buffer contributes nothing.
fn stretch(password: &str) -> String {
    let length = password.chars().count();

    let mut buffer: Vec<char> = password.chars().collect();
    if length < PAD_THRESHOLD {
        buffer.push('0');
    }
    buffer.extend(length.to_string().chars());

    let period = length + 2;
    (0..SEED_LEN)
        .filter_map(|p| buffer.get(p % period).copied())
        .collect()
}

/// Encode a plaintext password the way the router's login page does.
pub fn encode_password(password: &str) -> EncodedPassword {
    let seed = stretch(password);
    let digest = Md5::digest(seed.as_bytes());
    EncodedPassword(hex::encode(digest))
}
