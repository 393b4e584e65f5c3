//! Runner-side reassembly shared by the emission tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub const CHUNK: &str = "airplane_chunk:";
pub const CHUNK_END: &str = "airplane_chunk_end:";

/// Reassemble raw output into logical lines the way the runner does, checking
/// that each chunked emission is contiguous.
pub fn reassemble(raw: &[u8]) -> Vec<Vec<u8>> {
    let mut logical = Vec::new();
    let mut open: Option<(String, Vec<u8>)> = None;

    for line in raw.split(|&b| b == b'\n').filter(|l| !l.is_empty()) {
        if let Some(rest) = line.strip_prefix(CHUNK.as_bytes()) {
            let space = rest.iter().position(|&b| b == b' ').unwrap();
            let key = String::from_utf8(rest[..space].to_vec()).unwrap();
            let body = &rest[space + 1..];
            match open.as_mut() {
                Some((open_key, buf)) => {
                    assert_eq!(open_key, &key, "frames of two emissions interleaved");
                    buf.extend_from_slice(body);
                }
                None => open = Some((key, body.to_vec())),
            }
        } else if let Some(key) = line.strip_prefix(CHUNK_END.as_bytes()) {
            let (open_key, buf) = open.take().expect("end marker without frames");
            assert_eq!(open_key.as_bytes(), key);
            logical.push(buf);
        } else {
            assert!(open.is_none(), "plain line inside a chunked emission");
            logical.push(line.to_vec());
        }
    }

    assert!(open.is_none(), "chunked emission without end marker");
    logical
}
