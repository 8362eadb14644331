//! Data decoder: recover the plaintext of a shift-3 Caesar cipher.

use crate::input::normalize_text;
use crate::verdict::Verdict;

/// The intercepted transmission.
pub const CIPHERTEXT: &str = "KHOOR ZRUOG";

/// Expected plaintext after normalization.
const PLAINTEXT: &str = "helloworld";

/// Judge a decryption. Case, spacing, and punctuation are ignored.
pub fn check_decryption(input: &str) -> Verdict {
    if normalize_text(input) == PLAINTEXT {
        Verdict::pass("Decoding successful.")
    } else {
        Verdict::fail("Decoding error.")
    }
}
