//! Property-based tests for address encoding and chunk framing using proptest.
//!
//! Tests invariants:
//! 1. Identifier keys use dot notation, everything else is bracketed
//! 2. A bracketed key reads back to the original key
//! 3. Chunk bodies concatenate to the original line

// Integration tests have relaxed clippy settings for test ergonomics.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::doc_markdown
)]

use airplane_output::{encode_path, frame_line, PathSegment};
use proptest::prelude::*;

fn fast_config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        max_shrink_iters: 256,
        ..ProptestConfig::default()
    }
}

/// Keys that must be bracketed: at least one character outside [A-Za-z0-9_].
fn bracketed_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        r#"[a-z]{0,4}[\[\]"\\. \n-][a-z\[\]"\\]{0,6}"#,
        "\\PC{0,3}[é✈ü]\\PC{0,3}",
    ]
}

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn identifier_key_encodes_as_itself(key in "[A-Za-z0-9_]{1,24}") {
        let address = encode_path(&[PathSegment::from(key.as_str())]);
        prop_assert_eq!(address.as_str(), key.as_str());
    }

    #[test]
    fn identifier_after_first_segment_gets_a_dot(
        first in "[A-Za-z0-9_]{1,8}",
        second in "[A-Za-z0-9_]{1,8}",
    ) {
        let address = encode_path(&[PathSegment::from(first.as_str()), PathSegment::from(second.as_str())]);
        prop_assert_eq!(address.into_inner(), format!("{first}.{second}"));
    }

    #[test]
    fn bracketed_key_reads_back(key in bracketed_key_strategy()) {
        let address = encode_path(&[PathSegment::from(key.as_str())]);
        let inner = address
            .as_str()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .expect("bracketed");
        let decoded: String = serde_json::from_str(inner).unwrap();
        prop_assert_eq!(decoded, key);
    }

    #[test]
    fn index_encodes_in_decimal(index in any::<i64>()) {
        let address = encode_path(&[PathSegment::from(index)]);
        prop_assert_eq!(address.into_inner(), format!("[{index}]"));
    }

    #[test]
    fn chunk_bodies_rebuild_line(line in "\\PC{0,200}", chunk_size in 1usize..64) {
        let frames = frame_line(&line, chunk_size);

        match frames.key() {
            None => {
                prop_assert!(line.len() <= chunk_size);
                prop_assert_eq!(frames.lines()[0].clone(), format!("{line}\n").into_bytes());
            }
            Some(key) => {
                prop_assert!(line.len() > chunk_size);
                let prefix = format!("airplane_chunk:{key} ").into_bytes();
                let end = format!("airplane_chunk_end:{key}\n").into_bytes();
                let lines = frames.lines();
                prop_assert_eq!(lines.last().unwrap(), &end);
                prop_assert_eq!(lines.len() - 1, line.len().div_ceil(chunk_size));

                let mut rebuilt = Vec::new();
                for frame in &lines[..lines.len() - 1] {
                    prop_assert!(frame.starts_with(&prefix));
                    prop_assert_eq!(frame.last(), Some(&b'\n'));
                    let body = &frame[prefix.len()..frame.len() - 1];
                    prop_assert!(body.len() <= chunk_size);
                    rebuilt.extend_from_slice(body);
                }
                prop_assert_eq!(rebuilt, line.into_bytes());
            }
        }
    }
}
