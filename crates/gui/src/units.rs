//! Unit conversion between the persisted model (inches/degrees) and the
//! render space (meters/radians).

const INCHES_PER_FOOT: f64 = 12.0;
const METERS_PER_INCH: f64 = 0.0254;

pub fn inches_to_feet(value: f64) -> f64 {
    value / INCHES_PER_FOOT
}

pub fn feet_to_inches(value: f64) -> f64 {
    value * INCHES_PER_FOOT
}

pub fn inches_to_meters(value: f64) -> f64 {
    value * METERS_PER_INCH
}

pub fn meters_to_inches(value: f64) -> f64 {
    value / METERS_PER_INCH
}

pub fn degrees_to_radians(value: f64) -> f64 {
    value.to_radians()
}

pub fn radians_to_degrees(value: f64) -> f64 {
    value.to_degrees()
}

/// Round to a fixed number of decimal places. Used as the precision floor
/// when converting gizmo output back into the model.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format an inch value as whole inches plus sixteenths, e.g. `3 8/16"`.
pub fn format_inches(value: f64) -> String {
    let whole = value.floor();
    let fraction = value - whole;
    let sixteenths = (fraction * 16.0).round() as i64;
    if sixteenths == 0 {
        format!("{}\"", whole as i64)
    } else if sixteenths == 16 {
        format!("{}\"", whole as i64 + 1)
    } else {
        format!("{} {}/16\"", whole as i64, sixteenths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_meters_roundtrip() {
        let inches = 96.0;
        let meters = inches_to_meters(inches);
        assert!((meters - 2.4384).abs() < 1e-9);
        assert!((meters_to_inches(meters) - inches).abs() < 1e-9);
    }

    #[test]
    fn test_inches_feet() {
        assert_eq!(inches_to_feet(96.0), 8.0);
        assert_eq!(feet_to_inches(8.0), 96.0);
    }

    #[test]
    fn test_degrees_radians() {
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((radians_to_degrees(std::f64::consts::PI) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(90.004999, 2), 90.0);
        assert_eq!(round_to(-0.0005, 3), -0.001);
    }

    #[test]
    fn test_format_inches() {
        assert_eq!(format_inches(3.0), "3\"");
        assert_eq!(format_inches(3.5), "3 8/16\"");
        assert_eq!(format_inches(0.25), "0 4/16\"");
        // Rounds up into the next whole inch
        assert_eq!(format_inches(2.999), "3\"");
    }
}
