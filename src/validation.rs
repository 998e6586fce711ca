use regex::Regex;

/// Validate email address format.
///
/// Checks for:
/// - Minimum length requirements
/// - Basic structure (contains @ and .)
/// - RFC 5322 simplified format
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    email_regex.is_match(email)
}

/// Validate a Brazilian CPF number.
///
/// Accepts bare digits ("52998224725") or the formatted form
/// ("529.982.247-25"). Checks both mod-11 verifier digits and rejects
/// same-digit sequences like "111.111.111-11", which pass the checksum but
/// are not assignable.
pub fn is_valid_cpf(cpf: &str) -> bool {
    if !cpf
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == ' ')
    {
        return false;
    }

    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.windows(2).all(|pair| pair[0] == pair[1]) {
        return false;
    }

    verifier_digit(&digits[..9]) == digits[9] && verifier_digit(&digits[..10]) == digits[10]
}

/// Mod-11 verifier over the leading digits, weights descending to 2.
fn verifier_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .zip((2..=len + 1).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    (sum * 10) % 11 % 10
}
