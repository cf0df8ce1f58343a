// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Binary Canonical Serialization (BCS): the length-prefixed, little-endian,
//! deterministic wire format every hash and signature input in the Aptos
//! protocol is built on. `to_bytes`/`from_bytes` work on any type deriving
//! `serde::Serialize`/`Deserialize`, the same way the upstream `bcs` crate
//! is used throughout `aptos-types`.

mod de;
mod error;
mod ser;

pub use de::from_bytes;
pub use error::{Error, Result};
pub use ser::to_bytes;

/// Matches the real format's length-prefix ceiling: lengths and enum
/// variant indices are ULEB128 and must fit in a `u32`.
pub const MAX_SEQUENCE_LENGTH: u64 = u32::MAX as u64;

/// Recursion guard against maliciously deep nested containers on decode.
pub const MAX_CONTAINER_DEPTH: usize = 500;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Inner {
        a: u8,
        b: u64,
        name: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    enum Tagged {
        Unit,
        Newtype(u32),
        Tuple(u8, u8),
        Struct { x: u16, ys: Vec<u8> },
    }

    #[test]
    fn bool_round_trips_and_rejects_garbage() {
        assert_eq!(to_bytes(&true).unwrap(), vec![1]);
        assert_eq!(to_bytes(&false).unwrap(), vec![0]);
        assert!(from_bytes::<bool>(&[2]).is_err());
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(to_bytes(&0x0102_0304u32).unwrap(), vec![4, 3, 2, 1]);
        assert_eq!(from_bytes::<u32>(&[4, 3, 2, 1]).unwrap(), 0x0102_0304);
    }

    #[test]
    fn uleb128_length_prefixes_sequences_and_strings() {
        let v: Vec<u8> = (0..300).map(|i| (i % 256) as u8).collect();
        let encoded = to_bytes(&v).unwrap();
        // 300 as uleb128 is 0xAC 0x02.
        assert_eq!(&encoded[..2], &[0xAC, 0x02]);
        assert_eq!(from_bytes::<Vec<u8>>(&encoded).unwrap(), v);

        let s = "hello bcs".to_string();
        let encoded = to_bytes(&s).unwrap();
        assert_eq!(encoded[0] as usize, s.len());
        assert_eq!(from_bytes::<String>(&encoded).unwrap(), s);
    }

    #[test]
    fn option_encodes_presence_tag() {
        assert_eq!(to_bytes(&Some(7u8)).unwrap(), vec![1, 7]);
        assert_eq!(to_bytes(&(None::<u8>)).unwrap(), vec![0]);
    }

    #[test]
    fn struct_fields_are_concatenated_in_declared_order() {
        let inner = Inner {
            a: 9,
            b: 1,
            name: "x".to_string(),
        };
        let encoded = to_bytes(&inner).unwrap();
        assert_eq!(encoded[0], 9);
        assert_eq!(from_bytes::<Inner>(&encoded).unwrap(), inner);
    }

    #[test]
    fn enum_variants_round_trip() {
        for v in [
            Tagged::Unit,
            Tagged::Newtype(42),
            Tagged::Tuple(1, 2),
            Tagged::Struct {
                x: 9,
                ys: vec![1, 2, 3],
            },
        ] {
            let encoded = to_bytes(&v).unwrap();
            assert_eq!(from_bytes::<Tagged>(&encoded).unwrap(), v);
        }
    }

    #[test]
    fn unknown_variant_tag_is_rejected() {
        // Tagged only has 4 variants (0..=3); tag 9 must fail to decode.
        let bytes = vec![9];
        assert!(from_bytes::<Tagged>(&bytes).is_err());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = to_bytes(&1u8).unwrap();
        bytes.push(0xFF);
        assert!(from_bytes::<u8>(&bytes).is_err());
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(from_bytes::<u64>(&[1, 2, 3]).is_err());
    }

    #[test]
    fn maps_encode_sorted_by_key_bytes() {
        let mut m = BTreeMap::new();
        m.insert(5u8, "five".to_string());
        m.insert(1u8, "one".to_string());
        let encoded = to_bytes(&m).unwrap();
        let decoded: BTreeMap<u8, String> = from_bytes(&encoded).unwrap();
        assert_eq!(decoded, m);
    }

    proptest! {
        #[test]
        fn prop_u64_round_trips(v: u64) {
            prop_assert_eq!(from_bytes::<u64>(&to_bytes(&v).unwrap()).unwrap(), v);
        }

        #[test]
        fn prop_struct_round_trips(a: u8, b: u64, name in "[a-z]{0,16}") {
            let inner = Inner { a, b, name };
            prop_assert_eq!(from_bytes::<Inner>(&to_bytes(&inner).unwrap()).unwrap(), inner);
        }

        #[test]
        fn prop_vec_round_trips(v: Vec<u8>) {
            prop_assert_eq!(from_bytes::<Vec<u8>>(&to_bytes(&v).unwrap()).unwrap(), v);
        }
    }
}
