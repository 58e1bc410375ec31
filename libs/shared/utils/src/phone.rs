/// Number of trailing digits used to match phone numbers.
pub const PHONE_SUFFIX_LEN: usize = 10;

/// Reduce a phone number to its last ten digits so that country codes and
/// punctuation do not affect matching. Shorter numbers keep all their digits.
pub fn normalize_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(PHONE_SUFFIX_LEN);
    digits[start..].iter().collect()
}
