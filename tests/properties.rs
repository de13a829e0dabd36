//! Property tests for bit sequence conversions and table shape invariants.

use num_bigint::BigUint;
use proptest::prelude::*;
use serde_json::{json, Value};

use bittab::table::{FromDataConfig, Table, TextConfig};
use bittab::{BittabError, Bits};

/// A width and a value that fits in it.
fn width_and_value() -> impl Strategy<Value = (usize, u64)> {
    (1usize..=64).prop_flat_map(|len| {
        let max = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
        (Just(len), 0..=max)
    })
}

proptest! {
    #[test]
    fn prop_new_keeps_value_and_width((len, value) in width_and_value()) {
        let bits = Bits::new(value, Some(len)).unwrap();
        prop_assert_eq!(bits.as_int(), &BigUint::from(value));
        prop_assert_eq!(bits.len(), len);
    }

    #[test]
    fn prop_value_at_power_of_two_is_rejected(len in 0usize..64) {
        let result = Bits::new(1u64 << len, Some(len));
        let is_out_of_range = matches!(result, Err(BittabError::ValueOutOfRange { .. }));
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn prop_hex_round_trip((len, value) in width_and_value()) {
        let bits = Bits::new(value, Some(len)).unwrap();
        let back = Bits::from_hex(&bits.as_hex()).unwrap();
        prop_assert_eq!(back.as_int(), bits.as_int());
    }

    #[test]
    fn prop_bin_round_trip((len, value) in width_and_value()) {
        let bits = Bits::new(value, Some(len)).unwrap();
        prop_assert_eq!(Bits::from_bin(&bits.as_bin()).unwrap(), bits);
    }

    #[test]
    fn prop_bytes_round_trip((len, value) in width_and_value()) {
        let bits = Bits::new(value, Some(len)).unwrap();
        let back = Bits::from_bytes(&bits.as_bytes()).unwrap();
        prop_assert_eq!(back.as_int(), bits.as_int());
        prop_assert_eq!(back.len(), (len + 7) / 8 * 8);
    }

    #[test]
    fn prop_list_round_trip(list in prop::collection::vec(any::<bool>(), 0..100)) {
        let bits = Bits::from_list(&list);
        prop_assert_eq!(bits.as_list(), list);
    }

    #[test]
    fn prop_indexing_matches_bin((len, value) in width_and_value()) {
        let bits = Bits::new(value, Some(len)).unwrap();
        for (i, ch) in bits.as_bin().chars().enumerate() {
            prop_assert_eq!(bits[i], ch == '1');
        }
    }

    #[test]
    fn prop_shift_right_keeps_invariant((len, value) in width_and_value(), shift in 0usize..80) {
        let bits = Bits::new(value, Some(len)).unwrap();
        let shifted = &bits >> shift;
        prop_assert_eq!(shifted.len(), len.saturating_sub(shift));
        // Re-validating through the constructor must succeed.
        prop_assert!(Bits::new(shifted.as_int().clone(), Some(shifted.len())).is_ok());
    }

    #[test]
    fn prop_shift_left_then_right_is_identity(
        (len, value) in width_and_value(),
        shift in 0usize..80,
    ) {
        let bits = Bits::new(value, Some(len)).unwrap();
        prop_assert_eq!(&(&bits << shift) >> shift, bits);
    }

    #[test]
    fn prop_or_and_width_is_max(
        (la, va) in width_and_value(),
        (lb, vb) in width_and_value(),
    ) {
        let a = Bits::new(va, Some(la)).unwrap();
        let b = Bits::new(vb, Some(lb)).unwrap();
        prop_assert_eq!((&a | &b).len(), la.max(lb));
        prop_assert_eq!((&a & &b).to_u64(), Some(va & vb));
        prop_assert_eq!((&a | &b).to_u64(), Some(va | vb));
    }

    #[test]
    fn prop_rows_are_padded_to_width(
        rows in prop::collection::vec(prop::collection::vec(0i64..100, 1..6), 1..10)
    ) {
        let data = Value::Array(rows.iter().map(|r| json!(r)).collect());
        let table = Table::from_data(&data, FromDataConfig::default()).unwrap();
        let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
        prop_assert_eq!(table.width(), longest);
        prop_assert!(table.rows().all(|row| row.len() == longest));

        let text = table.to_text(&TextConfig { with_headers: false, maxlen: None });
        prop_assert_eq!(text.lines().count(), rows.len());
    }
}

#[test]
fn operator_and_rendering_examples() {
    let b = |v: u64, l: usize| Bits::new(v, Some(l)).unwrap();
    assert_eq!(b(0b1010, 4) | b(0b0101, 4), b(0b1111, 4));
    assert_eq!(b(0b1100, 4) & b(0b1010, 4), b(0b1000, 4));

    let shifted = b(0b1, 1) << 3;
    assert_eq!(shifted.to_u64(), Some(0b1000));
    assert_eq!(shifted.len(), 4);

    assert!(Bits::new(16u32, Some(4)).is_err());

    let table = Table::from_data(
        &json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]),
        FromDataConfig::default(),
    )
    .unwrap();
    assert_eq!(table.to_string(), "a | b\n--|--\n1 | 2\n3 | 4");
}
