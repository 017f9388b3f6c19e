//! Integration tests for hexadecimal float text

use ippcode_foundation::float::{parse, to_hex};
use proptest::prelude::*;

#[test]
fn formats_with_thirteen_digits() {
    assert_eq!(to_hex(1.5), "0x1.8000000000000p+0");
    assert_eq!(to_hex(-2.0), "-0x1.0000000000000p+1");
    assert_eq!(to_hex(0.25), "0x1.0000000000000p-2");
}

#[test]
fn special_values() {
    assert_eq!(to_hex(0.0), "0x0.0p+0");
    assert_eq!(to_hex(f64::INFINITY), "inf");
    assert_eq!(to_hex(f64::NEG_INFINITY), "-inf");
    assert_eq!(to_hex(f64::NAN), "nan");
}

#[test]
fn parses_hex_and_decimal() {
    assert_eq!(parse("0x1.8p+1"), Some(3.0));
    assert_eq!(parse("-0x1p-1"), Some(-0.5));
    assert_eq!(parse("2.25"), Some(2.25));
    assert_eq!(parse("twelve"), None);
}

proptest! {
    #[test]
    fn decimal_text_reads_like_std(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        prop_assert_eq!(parse(&value.to_string()).map(f64::to_bits), Some(value.to_bits()));
    }
}
