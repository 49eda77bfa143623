//! Named, string-valued parameters used to configure markers uniformly,
//! whatever their concrete configuration type.
use std::fmt::Display;
use std::str::{self, FromStr};

use thiserror::Error;

/// Errors that arise while reading named parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Expected a `name=value` parameter, got {0:?}")]
    Malformed(String),
    #[error("Parameter {name:?} could not be parsed from {value:?}")]
    Unparsable { name: String, value: String },
    #[error("Unknown parameter {0:?}")]
    Unknown(String),
}

pub trait ParamLike {
    fn name(&self) -> &str;
    fn value(&self) -> &str;
    fn unit(&self) -> Unit;

    fn coerce<T: str::FromStr>(&self) -> Result<T, T::Err> {
        self.value().parse::<T>()
    }

    /// Like [`ParamLike::coerce`], but reports which parameter failed
    fn parse_value<T: str::FromStr>(&self) -> Result<T, ParamError> {
        self.coerce().map_err(|_| ParamError::Unparsable {
            name: self.name().to_string(),
            value: self.value().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub value: String,
    pub unit: Unit,
}

impl Param {
    pub fn new() -> Param {
        Param {
            ..Default::default()
        }
    }

    pub fn new_key_value<K: Into<String>, V: ToString>(name: K, value: V) -> Param {
        let mut inst = Self::new();
        inst.name = name.into();
        inst.value = value.to_string();
        inst
    }

    pub fn with_unit_t(mut self, unit: &Unit) -> Param {
        self.unit = *unit;
        self
    }
}

impl ParamLike for Param {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn unit(&self) -> Unit {
        self.unit
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl FromStr for Param {
    type Err = ParamError;

    /// Parse a `name=value` pair, trimming whitespace around both parts
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(Param::new_key_value(name.trim(), value.trim()))
            }
            _ => Err(ParamError::Malformed(s.to_string())),
        }
    }
}

pub type ParamList = Vec<Param>;

/// Units that a parameter's value might have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    MZ,
    Fraction,
    Count,
    #[default]
    Unknown,
}

impl Unit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MZ => "m/z",
            Self::Fraction => "fraction",
            Self::Count => "count",
            Self::Unknown => "",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_param() {
        let param: Param = " mz_variation = 0.25".parse().unwrap();
        assert_eq!(param.name(), "mz_variation");
        assert_eq!(param.value(), "0.25");
        assert_eq!(param.coerce::<f64>().unwrap(), 0.25);
        assert_eq!(param.to_string(), "mz_variation=0.25");

        assert_eq!(
            "marks".parse::<Param>(),
            Err(ParamError::Malformed("marks".to_string()))
        );
        assert!("=3".parse::<Param>().is_err());
    }

    #[test]
    fn test_parse_value_error() {
        let param = Param::new_key_value("marks", "many").with_unit_t(&Unit::Count);
        assert_eq!(param.unit().name(), "count");
        assert_eq!(
            param.parse_value::<u32>(),
            Err(ParamError::Unparsable {
                name: "marks".to_string(),
                value: "many".to_string()
            })
        );
    }
}
