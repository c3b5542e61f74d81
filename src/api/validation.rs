use super::ApiError;

pub fn validate_dealer_id(id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid dealer ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_catalog_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_state(state: &str) -> Result<&str, ApiError> {
    let trimmed = state.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("State cannot be empty"));
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ApiError::validation(
            "State can only contain letters and spaces",
        ));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dealer_id() {
        assert!(validate_dealer_id(1).is_ok());
        assert!(validate_dealer_id(0).is_err());
        assert!(validate_dealer_id(-3).is_err());
    }

    #[test]
    fn test_validate_catalog_id() {
        assert!(validate_catalog_id(42).is_ok());
        assert!(validate_catalog_id(0).is_err());
    }

    #[test]
    fn test_validate_state() {
        assert_eq!(validate_state(" TX ").unwrap(), "TX");
        assert!(validate_state("New Mexico").is_ok());
        assert!(validate_state("").is_err());
        assert!(validate_state("T;X").is_err());
    }
}
