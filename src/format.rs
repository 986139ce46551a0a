//! Input masks for the client form.
//!
//! Both masks strip everything that is not an ASCII digit first, so they can
//! be applied on every keystroke and to already-masked values alike.

const MAX_DIGITS: usize = 11;

/// Keep only the ASCII digits of `value`.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn masked_digits(value: &str) -> String {
    let mut digits = digits_only(value);
    digits.truncate(MAX_DIGITS);
    digits
}

/// Mask a CPF as `000.000.000-00`, progressively for partial input.
pub fn format_tax_id(value: &str) -> String {
    let digits = masked_digits(value);
    let n = digits.len();

    match n {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// Mask a phone as `(DD) 98765-4321` (mobile) or `(DD) 3333-4444` (landline).
pub fn format_phone(value: &str) -> String {
    let digits = masked_digits(value);
    let n = digits.len();

    if n <= 2 {
        return digits;
    }

    let (area, local) = digits.split_at(2);
    // mobile numbers carry a fifth local digit before the hyphen
    let split = if n == MAX_DIGITS { 5 } else { 4 };

    if local.len() <= split {
        format!("({}) {}", area, local)
    } else {
        format!("({}) {}-{}", area, &local[..split], &local[split..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_id_full_mask() {
        assert_eq!(format_tax_id("11122233344"), "111.222.333-44");
    }

    #[test]
    fn tax_id_is_idempotent() {
        let once = format_tax_id("11122233344");
        assert_eq!(format_tax_id(&once), once);
    }

    #[test]
    fn tax_id_masks_partial_input() {
        assert_eq!(format_tax_id(""), "");
        assert_eq!(format_tax_id("123"), "123");
        assert_eq!(format_tax_id("1234"), "123.4");
        assert_eq!(format_tax_id("123456"), "123.456");
        assert_eq!(format_tax_id("1234567"), "123.456.7");
        assert_eq!(format_tax_id("1234567890"), "123.456.789-0");
    }

    #[test]
    fn tax_id_truncates_and_strips() {
        assert_eq!(format_tax_id("111.222.333-4455"), "111.222.333-44");
        assert_eq!(format_tax_id("abc111def222"), "111.222");
    }

    #[test]
    fn phone_mobile_and_landline() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn phone_is_idempotent() {
        for raw in ["11987654321", "1133334444"] {
            let once = format_phone(raw);
            assert_eq!(format_phone(&once), once);
        }
    }

    #[test]
    fn phone_masks_partial_input() {
        assert_eq!(format_phone("1"), "1");
        assert_eq!(format_phone("11"), "11");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("119876"), "(11) 9876");
        assert_eq!(format_phone("1198765"), "(11) 9876-5");
        assert_eq!(format_phone("119876543210000"), "(11) 98765-4321");
    }

    #[test]
    fn digits_only_drops_mask_characters() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only("111.222.333-44"), "11122233344");
    }
}
