//! IBAN and BIC format validation.
//!
//! Both checks are pure: no I/O, no shared state. They accept the
//! machine format only, so lowercase letters, spaces and other
//! punctuation are rejected even where a human would read them the same.

use super::countries::iban_length;
use super::error::IdentifierError;

/// Verify that `iban` is a formally correct IBAN.
///
/// Checks, in order: only `A-Z` and `0-9`; a two-letter country code
/// followed by two check digits; the length registered for that country;
/// the ISO 7064 MOD 97-10 checksum.
///
/// ```
/// use lastschrift::core::verify_iban;
///
/// assert!(verify_iban("GB29NWBK60161331926819").is_ok());
/// assert!(verify_iban("GB29 NWBK 6016 1331 9268 19").is_err());
/// ```
pub fn verify_iban(iban: &str) -> Result<(), IdentifierError> {
    let bytes = iban.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return Err(IdentifierError::iban(iban));
    }
    if bytes.len() < 5
        || !bytes[..2].iter().all(u8::is_ascii_uppercase)
        || !bytes[2..4].iter().all(u8::is_ascii_digit)
    {
        return Err(IdentifierError::iban(iban));
    }
    if iban_length(&iban[..2]) != Some(bytes.len()) {
        return Err(IdentifierError::iban(iban));
    }
    if mod97(bytes) != 1 {
        return Err(IdentifierError::iban(iban));
    }
    Ok(())
}

/// Form-rule wrapper around [`verify_iban`].
pub fn is_valid_iban(iban: &str) -> bool {
    verify_iban(iban).is_ok()
}

/// Verify that `bic` matches the ISO 9362 structure.
///
/// Six letters (institution and country), a two-character location code
/// and an optional three-character branch code. The first location
/// character is a letter or `2-9`, the second a letter or digit.
///
/// Stricter than ISO 9362: the letter `O` is refused in both location
/// positions, so `DEUTDEOF` is rejected although the standard admits an
/// `O` as the first location character.
pub fn verify_bic(bic: &str) -> Result<(), IdentifierError> {
    let b = bic.as_bytes();
    if b.len() != 8 && b.len() != 11 {
        return Err(IdentifierError::bic(bic));
    }
    let institution_country = b[..6].iter().all(u8::is_ascii_uppercase);
    let location_1 =
        (b[6].is_ascii_uppercase() && b[6] != b'O') || (b'2'..=b'9').contains(&b[6]);
    let location_2 = (b[7].is_ascii_uppercase() && b[7] != b'O') || b[7].is_ascii_digit();
    let branch = b[8..]
        .iter()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

    if institution_country && location_1 && location_2 && branch {
        Ok(())
    } else {
        Err(IdentifierError::bic(bic))
    }
}

/// Form-rule wrapper around [`verify_bic`].
pub fn is_valid_bic(bic: &str) -> bool {
    verify_bic(bic).is_ok()
}

/// ISO 7064 MOD 97-10 remainder of an IBAN.
///
/// The first four characters are moved to the end and every letter is
/// expanded to two digits (A=10 .. Z=35). The remainder is folded in
/// digit by digit so arbitrary lengths never overflow.
fn mod97(iban: &[u8]) -> u32 {
    let (head, tail) = iban.split_at(4);
    tail.iter().chain(head).fold(0u32, |rem, &c| {
        if c.is_ascii_digit() {
            (rem * 10 + u32::from(c - b'0')) % 97
        } else {
            (rem * 100 + u32::from(c - b'A') + 10) % 97
        }
    })
}
