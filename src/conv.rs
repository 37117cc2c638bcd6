use num_bigint::BigUint;

use crate::Error;

/// The smallest radix a share value may be written in.
pub const MIN_RADIX: u32 = 2;

/// The largest radix a share value may be written in, digits `0-9` then `a-z`.
pub const MAX_RADIX: u32 = 36;

fn check_radix(base: u32) -> Result<u32, Error> {
    if (MIN_RADIX..=MAX_RADIX).contains(&base) {
        Ok(base)
    } else {
        Err(Error::InvalidBase(base.to_string()))
    }
}

/// Parses the decimal `base` field of a share entry.
pub fn parse_base(base: &str) -> Result<u32, Error> {
    match base.parse::<u32>() {
        Ok(radix) => check_radix(radix).map_err(|_| Error::InvalidBase(base.to_owned())),
        Err(_) => Err(Error::InvalidBase(base.to_owned())),
    }
}

/// Interprets `value` as a numeral in `base`.
///
/// Letters are case-insensitive. Signs, whitespace and separators are rejected,
/// the result is always non-negative and of unbounded magnitude.
pub fn decode(base: u32, value: &str) -> Result<BigUint, Error> {
    let base = check_radix(base)?;
    if value.is_empty() {
        return Err(Error::EmptyValue { base });
    }

    let mut digits = Vec::with_capacity(value.len());
    for (position, character) in value.chars().enumerate() {
        match character.to_digit(base) {
            Some(d) => digits.push(d as u8),
            None => {
                return Err(Error::InvalidDigit {
                    base,
                    character,
                    position,
                })
            }
        }
    }

    // every digit is below `base`, so this cannot fail
    BigUint::from_radix_be(&digits, base).ok_or_else(|| Error::InvalidBase(base.to_string()))
}

/// Writes `value` as a lowercase numeral in `base`, without leading zeros.
pub fn encode(base: u32, value: &BigUint) -> Result<String, Error> {
    let base = check_radix(base)?;
    Ok(value.to_str_radix(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_examples() {
        assert_eq!(decode(16, "1A").unwrap(), BigUint::from(26u32));
        assert_eq!(decode(16, "1a").unwrap(), BigUint::from(26u32));
        assert_eq!(decode(2, "101").unwrap(), BigUint::from(5u32));
        assert_eq!(decode(36, "Zz").unwrap(), BigUint::from(36u32 * 35 + 35));
        assert_eq!(decode(10, "000").unwrap(), BigUint::from(0u32));
    }

    #[test]
    fn test_decode_large() {
        let value = decode(10, "23600283241050447333").unwrap();
        assert_eq!(value.to_string(), "23600283241050447333");
        let value = decode(2, &"1".repeat(200)).unwrap();
        assert_eq!(value.bits(), 200);
    }

    #[test]
    fn test_decode_invalid_digit() {
        assert!(matches!(
            decode(2, "102"),
            Err(Error::InvalidDigit {
                base: 2,
                character: '2',
                position: 2
            })
        ));
        assert!(matches!(
            decode(10, "-5"),
            Err(Error::InvalidDigit { character: '-', .. })
        ));
        assert!(matches!(
            decode(10, " 5"),
            Err(Error::InvalidDigit { character: ' ', .. })
        ));
    }

    #[test]
    fn test_decode_invalid_base() {
        assert!(matches!(decode(1, "0"), Err(Error::InvalidBase(b)) if b == "1"));
        assert!(matches!(decode(37, "0"), Err(Error::InvalidBase(b)) if b == "37"));
        assert!(matches!(decode(10, ""), Err(Error::EmptyValue { base: 10 })));
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(parse_base("7").unwrap(), 7);
        assert_eq!(parse_base("36").unwrap(), 36);
        assert!(matches!(parse_base("0"), Err(Error::InvalidBase(b)) if b == "0"));
        assert!(matches!(parse_base("x"), Err(Error::InvalidBase(b)) if b == "x"));
        assert!(matches!(parse_base(""), Err(Error::InvalidBase(_))));
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(16, &BigUint::from(26u32)).unwrap(), "1a");
        assert_eq!(encode(7, &BigUint::from(0u32)).unwrap(), "0");
        assert!(matches!(
            encode(40, &BigUint::from(1u32)),
            Err(Error::InvalidBase(_))
        ));
    }
}
