//! 本地输入校验（发送请求前）

use crate::error::AuthError;
use regex::Regex;
use std::sync::OnceLock;

fn national_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").ok()).as_ref()
}

fn tracking_code_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9]{10}$").ok()).as_ref()
}

/// 伊朗国民身份证号：10 位数字，最后一位是校验位
pub fn is_valid_national_id(raw: &str) -> bool {
    if !national_id_pattern().map_or(false, |re| re.is_match(raw)) {
        return false;
    }
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    let check = digits[9];
    let sum: u32 = digits[..9]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (10 - i as u32))
        .sum();
    let rem = sum % 11;
    if rem < 2 {
        check == rem
    } else {
        check == 11 - rem
    }
}

pub fn validate_national_id(raw: &str) -> Result<String, AuthError> {
    let trimmed = raw.trim();
    if is_valid_national_id(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(AuthError::InvalidNationalId(trimmed.to_string()))
    }
}

/// 追踪码：10 位大写字母或数字（小写输入会先转大写）
pub fn validate_tracking_code(raw: &str) -> Result<String, AuthError> {
    let normalized = raw.trim().to_uppercase();
    if tracking_code_pattern().map_or(false, |re| re.is_match(&normalized)) {
        Ok(normalized)
    } else {
        Err(AuthError::InvalidTrackingCode(raw.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_national_ids() {
        // 校验位 = 11 - (sum % 11)
        assert!(is_valid_national_id("0012345679"));
        // sum % 11 < 2 时校验位等于余数
        assert!(is_valid_national_id("0000000000"));
        assert!(is_valid_national_id("1111111111"));
    }

    #[test]
    fn test_invalid_national_ids() {
        assert!(!is_valid_national_id("0012345678"));
        assert!(!is_valid_national_id("001234567"));
        assert!(!is_valid_national_id("00123456790"));
        assert!(!is_valid_national_id("00123a5679"));
        assert!(!is_valid_national_id("۰۰۱۲۳۴۵۶۷۹"));
    }

    #[test]
    fn test_validate_national_id_trims() {
        assert_eq!(validate_national_id(" 0012345679 ").unwrap(), "0012345679");
        assert!(matches!(
            validate_national_id("123"),
            Err(AuthError::InvalidNationalId(_))
        ));
    }

    #[test]
    fn test_tracking_code() {
        assert_eq!(validate_tracking_code("ab12cd34ef").unwrap(), "AB12CD34EF");
        assert!(validate_tracking_code("AB12CD34E").is_err());
        assert!(validate_tracking_code("AB12CD34E!").is_err());
    }
}
