use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for an [`Alea`](super::alea::Alea) generator.
///
/// Seeds are hashed as text, so numeric seeds are first rendered the way a
/// JSON document would print them: `12345`, `0.5`, `1e+21`. This keeps
/// `Seed::from(0.5)` and `Seed::from("0.5")` interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    /// The textual form that gets hashed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Seed> for Seed {
    fn from(value: &Seed) -> Self {
        value.clone()
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Self(format_seed_number(value))
    }
}

macro_rules! seed_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Seed {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

seed_from_integer!(i32, u32, i64, u64, usize);

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeedVisitor;

        impl Visitor<'_> for SeedVisitor {
            type Value = Seed;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or number seed")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Seed, E> {
                Ok(Seed::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Seed, E> {
                Ok(Seed::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Seed, E> {
                Ok(Seed::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Seed, E> {
                Ok(Seed::from(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Seed, E> {
                Ok(Seed::from(v))
            }
        }

        deserializer.deserialize_any(SeedVisitor)
    }
}

/// Renders a number using the shortest round-tripping decimal form.
///
/// Integers up to 21 digits print without an exponent, small fractions down
/// to `1e-6` print in positional notation, and everything else switches to
/// `d.ddde±x`.
#[must_use]
pub fn format_seed_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-tripping digits, e.g. `1.2345e4`.
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{sign}{scientific}");
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        let exp = (n - 1).abs();
        if k == 1 {
            format!("{digits}e{exp_sign}{exp}")
        } else {
            format!("{}.{}e{exp_sign}{exp}", &digits[..1], &digits[1..])
        }
    };

    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_render_plainly() {
        assert_eq!(format_seed_number(12345.0), "12345");
        assert_eq!(format_seed_number(-7.0), "-7");
        assert_eq!(format_seed_number(1e20), "100000000000000000000");
        assert_eq!(Seed::from(12345).as_str(), "12345");
    }

    #[test]
    fn fractions_render_positionally() {
        assert_eq!(format_seed_number(0.5), "0.5");
        assert_eq!(format_seed_number(123.456), "123.456");
        assert_eq!(format_seed_number(0.000_001), "0.000001");
        assert_eq!(format_seed_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn extremes_switch_to_exponent_form() {
        assert_eq!(format_seed_number(1e21), "1e+21");
        assert_eq!(format_seed_number(1.5e-7), "1.5e-7");
        assert_eq!(format_seed_number(-2.5e30), "-2.5e+30");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_seed_number(0.0), "0");
        assert_eq!(format_seed_number(-0.0), "0");
        assert_eq!(format_seed_number(f64::NAN), "NaN");
        assert_eq!(format_seed_number(f64::INFINITY), "Infinity");
        assert_eq!(format_seed_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn deserializes_from_string_or_number() {
        let text: Seed = serde_json::from_str("\"hello\"").expect("string seed");
        let int: Seed = serde_json::from_str("12345").expect("integer seed");
        let float: Seed = serde_json::from_str("0.5").expect("float seed");
        assert_eq!(text.as_str(), "hello");
        assert_eq!(int.as_str(), "12345");
        assert_eq!(float.as_str(), "0.5");
    }
}
