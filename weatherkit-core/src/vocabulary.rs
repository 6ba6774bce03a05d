//! Closed vocabularies reported by WeatherKit (condition codes, trends, alert
//! severities, ...) and lookup of their variants by symbolic name.
//!
//! Upstream adds new symbols from time to time. Decoded payloads keep the
//! raw symbol in a [`Code`], so an unknown value never breaks decoding; the
//! caller picks [`Code::value`] (absent when unknown) or [`Code::strict`]
//! (an error when unknown).

use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{EnumMessage, IntoEnumIterator};

use crate::error::{Error, Result};

/// A closed set of named variants.
///
/// Implemented for enums deriving `strum::EnumIter`, `strum::IntoStaticStr`
/// and `strum::EnumMessage`; the static string is the upstream symbol and the
/// message, when present, the display label.
pub trait Vocabulary: Copy + IntoEnumIterator + EnumMessage + Into<&'static str> + 'static {
    /// Type name reported in lookup errors.
    const TYPE_NAME: &'static str;

    fn symbol(self) -> &'static str {
        self.into()
    }

    fn label(self) -> &'static str {
        self.get_message().unwrap_or_else(|| self.symbol())
    }
}

/// Strict lookup: the variant whose symbol equals `symbol` exactly.
pub fn from_name<E: Vocabulary>(symbol: &str) -> Result<E> {
    try_from_name(symbol).ok_or_else(|| Error::ValueNotFound {
        value: symbol.to_string(),
        enum_name: E::TYPE_NAME,
    })
}

/// Fallible lookup: `None` when no variant matches.
pub fn try_from_name<E: Vocabulary>(symbol: &str) -> Option<E> {
    E::iter().find(|variant| variant.symbol() == symbol)
}

/// Enumerated field as received from upstream.
pub struct Code<E> {
    raw: String,
    _vocabulary: PhantomData<fn() -> E>,
}

impl<E: Vocabulary> Code<E> {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _vocabulary: PhantomData,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<E> {
        try_from_name(&self.raw)
    }

    pub fn strict(&self) -> Result<E> {
        from_name(&self.raw)
    }

    pub fn is_known(&self) -> bool {
        self.value().is_some()
    }

    /// Display label of the known variant, or the raw symbol.
    pub fn label(&self) -> &str {
        match self.value() {
            Some(variant) => variant.label(),
            None => &self.raw,
        }
    }
}

impl<E: Vocabulary> From<E> for Code<E> {
    fn from(variant: E) -> Self {
        Self::new(variant.symbol())
    }
}

// Manual impls: derives would demand the bounds on `E` itself.
impl<E> Clone for Code<E> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _vocabulary: PhantomData,
        }
    }
}

impl<E> PartialEq for Code<E> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<E> Eq for Code<E> {}

impl<E> fmt::Debug for Code<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Code").field(&self.raw).finish()
    }
}

impl<E> fmt::Display for Code<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<E> Serialize for Code<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, E> Deserialize<'de> for Code<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self {
            raw: String::deserialize(deserializer)?,
            _vocabulary: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConditionCode, DataSet, MoonPhase, PressureTrend, Severity};

    #[test]
    fn strict_lookup_finds_exact_symbol() {
        let code: ConditionCode = from_name("MostlyClear").unwrap();
        assert_eq!(code, ConditionCode::MostlyClear);
        assert_eq!(code.symbol(), "MostlyClear");
        assert_eq!(code.label(), "Mostly Clear");
    }

    #[test]
    fn strict_lookup_fails_for_unknown_symbol() {
        let err = from_name::<ConditionCode>("MostlyNotClear").unwrap_err();
        match err {
            Error::ValueNotFound { value, enum_name } => {
                assert_eq!(value, "MostlyNotClear");
                assert_eq!(enum_name, "ConditionCode");
            }
            other => panic!("expected ValueNotFound, got {other:?}"),
        }
    }

    #[test]
    fn fallible_lookup_returns_none() {
        assert_eq!(try_from_name::<ConditionCode>("MostlyNotClear"), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(try_from_name::<ConditionCode>("mostlyclear"), None);
        assert_eq!(try_from_name::<PressureTrend>("Rising"), None);
        assert_eq!(try_from_name::<PressureTrend>("rising"), Some(PressureTrend::Rising));
    }

    #[test]
    fn every_variant_round_trips_through_its_symbol() {
        for code in ConditionCode::iter() {
            assert_eq!(from_name::<ConditionCode>(code.symbol()).unwrap(), code);
        }
        for phase in MoonPhase::iter() {
            assert_eq!(try_from_name::<MoonPhase>(phase.symbol()), Some(phase));
        }
        for set in DataSet::iter() {
            assert_eq!(try_from_name::<DataSet>(set.symbol()), Some(set));
        }
    }

    #[test]
    fn code_keeps_unknown_symbols() {
        let code: Code<Severity> = serde_json::from_str("\"catastrophic\"").unwrap();
        assert_eq!(code.raw(), "catastrophic");
        assert!(!code.is_known());
        assert_eq!(code.value(), None);
        assert_eq!(code.label(), "catastrophic");
        assert!(matches!(code.strict(), Err(Error::ValueNotFound { enum_name: "Severity", .. })));

        let code: Code<Severity> = serde_json::from_str("\"severe\"").unwrap();
        assert_eq!(code.strict().unwrap(), Severity::Severe);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"severe\"");
    }
}
