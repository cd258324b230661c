use {
    alloy::primitives::U256,
    anyhow::{Context, Result, ensure},
    num::{BigInt, BigRational, BigUint, Zero, bigint::Sign},
    std::{ops::Neg, str::FromStr},
};

pub fn u256_to_big_uint(input: &U256) -> BigUint {
    BigUint::from_bytes_be(&input.to_be_bytes::<32>())
}

pub fn u256_to_big_int(input: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(input))
}

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_be_slice(&bytes))
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(input.sign() != Sign::Minus, "negative");
    big_uint_to_u256(input.magnitude())
}

/// Converts a decimal string (e.g. `"0.1"`) to an exact `BigRational`.
///
/// Going through floats instead would leak their inexact bytes
/// representation into the result, so the string is parsed directly.
pub fn big_rational_from_decimal_str(s: &str) -> Result<BigRational> {
    let s = s.trim();
    let (is_negative, s) = if let Some(stripped) = s.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, s)
    };

    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let numerator = BigInt::from_str(parts[0]).context("unable to parse integer part")?;
            Ok(BigRational::from_integer(numerator))
        }
        2 => {
            let integer_part = if parts[0].is_empty() {
                // Handle cases like ".5" as "0.5"
                BigInt::zero()
            } else {
                BigInt::from_str(parts[0]).context("unable to parse integer part")?
            };

            let fractional_part = if parts[1].is_empty() {
                // Handle cases like "1." as "1.0"
                BigInt::zero()
            } else {
                BigInt::from_str(parts[1]).context("unable to parse fractional part")?
            };

            let denominator = BigInt::from(10u32).pow(parts[1].len() as u32);
            let numerator = integer_part
                .checked_mul(&denominator)
                .context("rational overflow during multiplication")?
                .checked_add(&fractional_part)
                .context("rational overflow during addition")?;
            Ok(BigRational::new(numerator, denominator))
        }
        _ => Err(anyhow::anyhow!("invalid decimal number")),
    }
    .map(|ratio| if is_negative { ratio.neg() } else { ratio })
}

#[cfg(test)]
mod tests {
    use {super::*, num::One};

    #[test]
    fn u256_to_big_uint_() {
        assert_eq!(u256_to_big_uint(&U256::ZERO), BigUint::zero());
        assert_eq!(u256_to_big_uint(&U256::from(1)), BigUint::one());
        assert_eq!(
            u256_to_big_uint(&U256::MAX),
            BigUint::from_str(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )
            .unwrap()
        );
    }

    #[test]
    fn big_int_to_u256_() {
        assert_eq!(big_int_to_u256(&BigInt::zero()).unwrap(), U256::ZERO);
        assert_eq!(big_int_to_u256(&BigInt::one()).unwrap(), U256::from(1));
        let max_u256_as_big_int = BigInt::from_str(
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        )
        .unwrap();
        assert_eq!(big_int_to_u256(&max_u256_as_big_int).unwrap(), U256::MAX);
        assert!(big_int_to_u256(&(max_u256_as_big_int + BigInt::one())).is_err());
        assert!(big_int_to_u256(&BigInt::from(-1)).is_err());
    }

    #[test]
    fn round_trips_via_big_int() {
        for val in &[0u64, 42, 1337] {
            assert_eq!(
                big_int_to_u256(&u256_to_big_int(&U256::from(*val))).unwrap(),
                U256::from(*val),
            );
        }
    }

    #[test]
    fn big_rational_from_decimal_str_() {
        assert_eq!(
            big_rational_from_decimal_str("0").unwrap(),
            BigRational::zero()
        );
        assert_eq!(
            big_rational_from_decimal_str("1").unwrap(),
            BigRational::one()
        );
        assert_eq!(
            big_rational_from_decimal_str("-1").unwrap(),
            -BigRational::one()
        );
        assert_eq!(
            big_rational_from_decimal_str("1.").unwrap(),
            BigRational::one()
        );
        assert_eq!(
            big_rational_from_decimal_str("1.000").unwrap(),
            BigRational::one()
        );
        assert_eq!(
            big_rational_from_decimal_str("0.1").unwrap(),
            BigRational::new(1.into(), 10.into())
        );
        assert_eq!(
            big_rational_from_decimal_str(".1").unwrap(),
            BigRational::new(1.into(), 10.into())
        );
        assert_eq!(
            big_rational_from_decimal_str("0.125").unwrap(),
            BigRational::new(1.into(), 8.into())
        );
        assert_eq!(
            big_rational_from_decimal_str("-0.125").unwrap(),
            -BigRational::new(1.into(), 8.into())
        );

        assert!(big_rational_from_decimal_str("0.1.0").is_err());
        assert!(big_rational_from_decimal_str("a").is_err());
        assert!(big_rational_from_decimal_str("1 0").is_err());
    }
}
