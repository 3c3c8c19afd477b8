/// Client-side field validation. These rules run before any network call
/// and are the only errors surfaced as recoverable, field-level messages.
pub const SPECIAL_CHARACTERS: &str = "`~!@#$%^&*()-_=+'\",.?\":{}|";

pub fn username(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(2..=20).contains(&len) {
        return Err("Username must be 2-20 characters".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Username may only contain letters and digits".to_string());
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(8..=20).contains(&len) {
        return Err("Password must be 8-20 characters".to_string());
    }
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| SPECIAL_CHARACTERS.contains(c));
    if !(has_lower && has_upper && has_digit && has_special) {
        return Err(
            "Password must contain at least one uppercase letter, one lowercase letter, \
             one number, and one special character"
                .to_string(),
        );
    }
    Ok(())
}

pub fn search_term(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(2..=20).contains(&len) {
        return Err("Search term must be 2-20 characters".to_string());
    }
    Ok(())
}

pub fn review_title(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(2..=50).contains(&len) {
        return Err("Title must be 2-50 characters".to_string());
    }
    Ok(())
}

pub fn review_text(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(8..=300).contains(&len) {
        return Err("Review text must be 8-300 characters".to_string());
    }
    Ok(())
}

/// The rating field arrives as a string from a number input; it must be an
/// integer from 0 to 5.
pub fn rating(value: &str) -> Result<u8, String> {
    match value.trim().parse::<u8>() {
        Ok(parsed) if parsed <= 5 => Ok(parsed),
        _ => Err("Rating must be a whole number from 0 to 5".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_bounds_and_charset() {
        assert!(username("ab").is_ok());
        assert!(username(&"a".repeat(20)).is_ok());
        assert!(username("a").is_err());
        assert!(username(&"a".repeat(21)).is_err());
        assert!(username("harry9").is_ok());
        assert!(username("har ry").is_err());
        assert!(username("har_ry").is_err());
    }

    #[test]
    fn password_needs_all_four_classes() {
        assert!(password("*#123Abc").is_ok());
        assert!(password("*#123abc").is_err()); // no uppercase
        assert!(password("*#ABCABC1").is_err()); // no lowercase
        assert!(password("*#abcAbc").is_err()); // no digit
        assert!(password("aa123Abc").is_err()); // no special
        assert!(password("*#1Abc").is_err()); // too short
        assert!(password(&format!("*#123Abc{}", "a".repeat(13))).is_err()); // too long
    }

    #[test]
    fn search_term_length_window() {
        assert!(search_term("a").is_err());
        assert!(search_term("Chicago").is_ok());
        assert!(search_term(&"c".repeat(20)).is_ok());
        assert!(search_term(&"c".repeat(21)).is_err());
    }

    #[test]
    fn review_field_windows() {
        assert!(review_title("Great stay").is_ok());
        assert!(review_title("G").is_err());
        assert!(review_title(&"t".repeat(51)).is_err());

        assert!(review_text("Loved the rooftop pool and service.").is_ok());
        assert!(review_text("Fine.").is_err());
        assert!(review_text(&"x".repeat(300)).is_ok());
        assert!(review_text(&"x".repeat(301)).is_err());
    }

    #[test]
    fn rating_is_an_integer_from_zero_to_five() {
        assert_eq!(rating("0"), Ok(0));
        assert_eq!(rating("5"), Ok(5));
        assert!(rating("6").is_err());
        assert!(rating("-1").is_err());
        assert!(rating("4.5").is_err());
        assert!(rating("five").is_err());
        assert!(rating("").is_err());
    }
}
