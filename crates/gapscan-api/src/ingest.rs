//! # Upload Ingestion
//!
//! Best-effort decoding of uploaded bytes into text before scoring.
//! Invalid UTF-8 byte sequences are dropped outright (not replaced with
//! U+FFFD), so decoding never fails and never introduces characters that
//! were not in the upload. Decode errors must not reach the scorer — it
//! only ever sees a well-formed string.

/// Decode bytes to a string, skipping invalid UTF-8 sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                // The prefix was just validated, so the Cow is always Borrowed.
                text.push_str(&String::from_utf8_lossy(&rest[..valid_up_to]));
                // Skip the invalid sequence; error_len is None only at an
                // unexpected end of input, where nothing valid remains.
                match err.error_len() {
                    Some(len) => rest = &rest[valid_up_to + len..],
                    None => break,
                }
            }
        }
    }

    text
}
