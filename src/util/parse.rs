use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from a stored identifier string
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed string to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}

/// Parses an optional stored identifier.
///
/// # Returns
/// - `Ok(None)` - Nothing stored
/// - `Ok(Some(u64))` - Stored identifier
/// - `Err(AppError::InternalErr(ParseStringId))` - Stored value is not a snowflake
pub fn parse_optional_id(value: Option<&String>) -> Result<Option<u64>, AppError> {
    value.map(|v| parse_u64_from_string(v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests parsing a stored snowflake.
    ///
    /// Expected: Ok with the numeric id
    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_u64_from_string("302050872383242240").unwrap(),
            302050872383242240
        );
    }

    /// Tests that a corrupt identifier is reported rather than ignored.
    ///
    /// Expected: Err(InternalErr) for non-numeric text, Ok(None) for nothing stored
    #[test]
    fn rejects_corrupt_identifier() {
        assert!(matches!(
            parse_optional_id(Some(&"general".to_string())),
            Err(AppError::InternalErr(_))
        ));
        assert_eq!(parse_optional_id(None).unwrap(), None);
    }
}
