use std::io::Write;

/// Appends a number in canonical content-stream form: shortest decimal that
/// round-trips, `.` separator, no exponent, trailing zeros trimmed. Rust's
/// float `Display` already guarantees all of this.
pub(crate) fn put_num(buf: &mut Vec<u8>, value: f32) {
    debug_assert!(
        value.is_finite(),
        "content stream operand must be finite, got {value}"
    );
    let _ = write!(buf, "{}", value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f32) -> String {
        let mut buf = Vec::new();
        put_num(&mut buf, value);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(-3.0), "-3");
    }

    #[test]
    fn no_scientific_notation() {
        assert_eq!(fmt(0.0000001), "0.0000001");
        assert!(!fmt(1e10).contains('e'));
    }

    #[test]
    fn emitted_numbers_round_trip() {
        for value in [
            0.1f32,
            -0.25,
            595.2756,
            841.8898,
            1.0 / 3.0,
            f32::MAX,
            f32::MIN_POSITIVE,
        ] {
            let parsed: f32 = fmt(value).parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits(), "{value} did not round-trip");
        }
    }
}
