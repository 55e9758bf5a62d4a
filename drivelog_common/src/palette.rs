//! Colors of BEV box outlines, keyed by annotation type.

use image::Rgb;

use crate::tables::TypeValue;

pub const VEHICLE_COLOR: Rgb<u8> = Rgb([31, 119, 180]);
pub const PEDESTRIAN_COLOR: Rgb<u8> = Rgb([255, 127, 14]);
pub const CYCLIST_COLOR: Rgb<u8> = Rgb([44, 160, 44]);
/// Shared by every type code without a palette entry.
pub const FALLBACK_COLOR: Rgb<u8> = Rgb([128, 128, 128]);

pub const EGO_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Resolves a stored type value to an integer code.
///
/// Floats truncate toward zero, text must hold an integer literal. Anything else has no
/// code.
pub fn parse_type_code(value: &TypeValue) -> Option<i64> {
    match value {
        TypeValue::Int(code) => Some(*code),
        TypeValue::Float(code) if code.is_finite() => Some(code.trunc() as i64),
        TypeValue::Float(_) => None,
        TypeValue::Bool(flag) => Some(i64::from(*flag)),
        TypeValue::Text(text) => text.trim().parse().ok(),
        TypeValue::Missing => None,
    }
}

/// Outline color for a stored type value. Total over all inputs.
pub fn color_for_type(value: &TypeValue) -> Rgb<u8> {
    color_for_code(parse_type_code(value))
}

pub fn color_for_code(code: Option<i64>) -> Rgb<u8> {
    match code {
        Some(1) => VEHICLE_COLOR,
        Some(2) => PEDESTRIAN_COLOR,
        Some(3) => CYCLIST_COLOR,
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(color_for_type(&TypeValue::Int(1)), VEHICLE_COLOR);
        assert_eq!(color_for_type(&TypeValue::Int(2)), PEDESTRIAN_COLOR);
        assert_eq!(color_for_type(&TypeValue::Int(3)), CYCLIST_COLOR);
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        for code in [i64::MIN, -1, 0, 4, 5, 99, i64::MAX] {
            assert_eq!(color_for_type(&TypeValue::Int(code)), FALLBACK_COLOR);
        }
    }

    #[test]
    fn test_non_numeric_values_fall_back() {
        let values = [
            TypeValue::Text("car".to_string()),
            TypeValue::Text(String::new()),
            TypeValue::Text("1.5".to_string()),
            TypeValue::Float(f64::NAN),
            TypeValue::Float(f64::INFINITY),
            TypeValue::Missing,
        ];
        for value in &values {
            assert_eq!(parse_type_code(value), None, "{value:?}");
            assert_eq!(color_for_type(value), FALLBACK_COLOR);
        }
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(parse_type_code(&TypeValue::Float(2.9)), Some(2));
        assert_eq!(parse_type_code(&TypeValue::Text(" 3 ".to_string())), Some(3));
        assert_eq!(parse_type_code(&TypeValue::Bool(true)), Some(1));
        assert_eq!(color_for_type(&TypeValue::Float(1.0)), VEHICLE_COLOR);
    }
}
