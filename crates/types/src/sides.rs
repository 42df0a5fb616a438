//! Four-sided box values (margins, border thicknesses) with CSS-style shorthands.

use crate::length::Length;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct FourSides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Clone> FourSides<T> {
    pub fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all(value: T) -> Self {
        Self {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }

    /// Two-value form: `vertical` for top/bottom, `horizontal` for left/right.
    pub fn symmetric(vertical: T, horizontal: T) -> Self {
        Self {
            top: vertical.clone(),
            right: horizontal.clone(),
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Builds from a 1, 2 or 4 element list using the CSS shorthand rules.
    pub fn from_values(values: &[T]) -> Result<Self, String> {
        match values {
            [all] => Ok(Self::all(all.clone())),
            [vertical, horizontal] => Ok(Self::symmetric(vertical.clone(), horizontal.clone())),
            [top, right, bottom, left] => Ok(Self::new(
                top.clone(),
                right.clone(),
                bottom.clone(),
                left.clone(),
            )),
            _ => Err(format!(
                "Invalid shorthand: expected 1, 2, or 4 values, got {}",
                values.len()
            )),
        }
    }

    pub fn map<U, F>(&self, mut f: F) -> FourSides<U>
    where
        F: FnMut(&T) -> U,
    {
        FourSides {
            top: f(&self.top),
            right: f(&self.right),
            bottom: f(&self.bottom),
            left: f(&self.left),
        }
    }
}

impl<T: Clone + PartialEq> FourSides<T> {
    /// Per side: a value still equal to the builtin default is replaced with the
    /// governing `outer` value, anything else is an explicit choice and is kept.
    pub fn override_defaults(&self, outer: &FourSides<T>, builtin: &FourSides<T>) -> FourSides<T> {
        fn pick<T: Clone + PartialEq>(own: &T, outer: &T, builtin: &T) -> T {
            if own == builtin {
                outer.clone()
            } else {
                own.clone()
            }
        }

        FourSides {
            top: pick(&self.top, &outer.top, &builtin.top),
            right: pick(&self.right, &outer.right, &builtin.right),
            bottom: pick(&self.bottom, &outer.bottom, &builtin.bottom),
            left: pick(&self.left, &outer.left, &builtin.left),
        }
    }
}

impl<T: Clone> From<T> for FourSides<T> {
    fn from(value: T) -> Self {
        Self::all(value)
    }
}

impl<T: Clone> From<(T, T)> for FourSides<T> {
    fn from((vertical, horizontal): (T, T)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}

impl<T: Clone> From<(T, T, T, T)> for FourSides<T> {
    fn from((top, right, bottom, left): (T, T, T, T)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl FourSides<Length> {
    /// Left plus right, in points.
    pub fn horizontal_pt(&self) -> f32 {
        self.left.pt() + self.right.pt()
    }

    /// Top plus bottom, in points.
    pub fn vertical_pt(&self) -> f32 {
        self.top.pt() + self.bottom.pt()
    }

    /// Parses a shorthand such as `"5"`, `"2mm 4pt"` or `"1 2 3 4"`.
    ///
    /// A lone `mm`/`pt` token binds to the number before it, so `"5 mm 10 mm"` is
    /// the two-value form.
    pub fn parse_shorthand(input: &str) -> Result<Self, String> {
        let mut literals: Vec<String> = Vec::new();
        for token in input.split_whitespace() {
            match (token, literals.last_mut()) {
                ("mm" | "pt", Some(previous)) => {
                    previous.push(' ');
                    previous.push_str(token);
                }
                _ => literals.push(token.to_string()),
            }
        }

        let values = literals
            .iter()
            .map(|literal| Length::parse(literal).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_values(&values)
    }
}

impl FromStr for FourSides<Length> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_shorthand(s)
    }
}

impl<'de> Deserialize<'de> for FourSides<Length> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SidesVisitor;
        impl<'de> de::Visitor<'de> for SidesVisitor {
            type Value = FourSides<Length>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a shorthand like '10pt' or '2mm 4mm', a list, a number or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                FourSides::parse_shorthand(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FourSides::all(Length::from_mm(value as f32)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FourSides::all(Length::from_mm(value as f32)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FourSides::all(Length::from_mm(value as f32)))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<Length>()? {
                    values.push(value);
                }
                FourSides::from_values(&values).map_err(de::Error::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut sides = FourSides::all(Length::ZERO);
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => sides.top = map.next_value()?,
                        "right" => sides.right = map.next_value()?,
                        "bottom" => sides.bottom = map.next_value()?,
                        "left" => sides.left = map.next_value()?,
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Ok(sides)
            }
        }
        deserializer.deserialize_any(SidesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_forms() {
        let one = FourSides::all(5);
        assert_eq!(one, FourSides::new(5, 5, 5, 5));

        let two = FourSides::symmetric(5, 10);
        assert_eq!(two.top, 5);
        assert_eq!(two.bottom, 5);
        assert_eq!(two.left, 10);
        assert_eq!(two.right, 10);

        let four: FourSides<i32> = (1, 2, 3, 4).into();
        assert_eq!(four.top, 1);
        assert_eq!(four.right, 2);
        assert_eq!(four.bottom, 3);
        assert_eq!(four.left, 4);
    }

    #[test]
    fn test_from_values_rejects_three() {
        assert!(FourSides::from_values(&[1, 2, 3]).is_err());
        assert!(FourSides::<i32>::from_values(&[]).is_err());
    }

    #[test]
    fn test_map_is_element_wise() {
        let doubled = FourSides::new(1, 2, 3, 4).map(|v| v * 2);
        assert_eq!(doubled, FourSides::new(2, 4, 6, 8));
    }

    #[test]
    fn test_override_defaults_keeps_explicit_values() {
        let builtin = FourSides::all(1.0);
        let outer = FourSides::all(3.0);
        // An explicit zero differs from the builtin default and must survive.
        let own = FourSides::new(0.0, 1.0, 2.0, 1.0);
        let merged = own.override_defaults(&outer, &builtin);
        assert_eq!(merged, FourSides::new(0.0, 3.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_shorthand_with_detached_units() {
        let sides = FourSides::parse_shorthand("5 mm 10 pt").unwrap();
        assert_eq!(sides.top.mm(), 5.0);
        assert_eq!(sides.bottom.mm(), 5.0);
        assert_eq!(sides.left.pt(), 10.0);
        assert_eq!(sides.right.pt(), 10.0);
    }

    #[test]
    fn test_deserialize_map_and_shorthand() {
        let from_map: FourSides<Length> =
            serde_json::from_str(r#"{ "top": "2pt", "left": 4 }"#).unwrap();
        assert_eq!(from_map.top.pt(), 2.0);
        assert_eq!(from_map.left.mm(), 4.0);
        assert_eq!(from_map.right, Length::ZERO);

        let from_str: FourSides<Length> = serde_json::from_str("\"1 2 3 4\"").unwrap();
        assert_eq!(from_str.right.mm(), 2.0);
    }
}
