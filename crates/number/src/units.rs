use {
    crate::conversions,
    alloy::primitives::U256,
    num::{BigInt, BigRational, Zero},
};

/// The token's fixed display scale. One display unit is 10^18 base units.
pub const TOKEN_DECIMALS: u32 = 18;

#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    #[error("amount is not a valid decimal number: {0}")]
    Invalid(String),
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount has more than {TOKEN_DECIMALS} decimal places and has no exact base unit representation")]
    TooPrecise,
    #[error("amount does not fit into a 256-bit token balance")]
    Overflow,
}

/// Scales a decimal amount in display units into the token's smallest
/// unit. The conversion is exact: amounts finer than [`TOKEN_DECIMALS`]
/// decimal places are rejected instead of being rounded or truncated.
pub fn token_base_units(amount: &str) -> Result<U256, AmountError> {
    let ratio = conversions::big_rational_from_decimal_str(amount)
        .map_err(|err| AmountError::Invalid(err.to_string()))?;
    if ratio <= BigRational::zero() {
        return Err(AmountError::NotPositive);
    }
    let scaled = ratio * BigRational::from_integer(BigInt::from(10u32).pow(TOKEN_DECIMALS));
    if !scaled.is_integer() {
        return Err(AmountError::TooPrecise);
    }
    conversions::big_int_to_u256(&scaled.to_integer()).map_err(|_| AmountError::Overflow)
}
