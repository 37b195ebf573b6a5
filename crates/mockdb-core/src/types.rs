//! Column types and generation modes.
//!
//! This module defines `DbType`, the closed set of column types a schema can
//! declare, and `GenerationMode`, the algorithm used to fill a column. The
//! compatibility matrix between the two lives in [`DbType::valid_modes`].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Column type of a concrete attribute.
///
/// # Document Format
///
/// Types are written in upper case in schema documents, but parsing is
/// case-insensitive:
/// ```json
/// { "name": "id", "type": "INTEGER" }
/// { "name": "born", "type": "date" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DbType {
    /// 64-bit signed integer
    Integer,
    /// Character string
    String,
    /// 64-bit floating point
    Real,
    /// Date and time without timezone
    Date,
}

impl DbType {
    /// All column types, in declaration order.
    pub const ALL: [DbType; 4] = [
        DbType::Integer,
        DbType::String,
        DbType::Real,
        DbType::Date,
    ];

    /// Generation modes allowed for this type.
    pub const fn valid_modes(self) -> ModeSet {
        match self {
            DbType::Integer | DbType::Real => ModeSet::of(&[
                GenerationMode::Random,
                GenerationMode::Increasing,
                GenerationMode::Decreasing,
                GenerationMode::Repeating,
            ]),
            DbType::Date => ModeSet::of(&[
                GenerationMode::Random,
                GenerationMode::Increasing,
                GenerationMode::Decreasing,
            ]),
            DbType::String => ModeSet::of(&[
                GenerationMode::Random,
                GenerationMode::Repeating,
                GenerationMode::NameSurname,
                GenerationMode::Email,
                GenerationMode::Phone,
                GenerationMode::NaturalText,
            ]),
        }
    }

    /// Fail with `InvalidGenerationMode` unless `mode` is allowed for this type.
    pub fn check_mode(self, mode: GenerationMode) -> Result<(), Error> {
        if self.valid_modes().contains(mode) {
            Ok(())
        } else {
            Err(Error::InvalidGenerationMode {
                db_type: self,
                mode,
            })
        }
    }

    /// Upper-case name as written in schema documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            DbType::Integer => "INTEGER",
            DbType::String => "STRING",
            DbType::Real => "REAL",
            DbType::Date => "DATE",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        DbType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| Error::invalid(format!("unknown attribute type '{s}'")))
    }
}

/// Algorithm used to produce a column's values.
///
/// Each mode is a distinct bit so that sets of modes can be stored in a
/// [`ModeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum GenerationMode {
    /// Uniform random values bounded by the pattern
    #[default]
    Random = 0x01,
    /// Start value, then repeatedly add the step
    Increasing = 0x02,
    /// Start value, then repeatedly subtract the step
    Decreasing = 0x04,
    /// Cyclic values with the pattern as modulus
    Repeating = 0x08,
    /// "Given Surname" drawn from the name lists
    NameSurname = 0x10,
    /// "given.surname@domain"
    Email = 0x20,
    /// Ten random digits
    Phone = 0x40,
    /// Words drawn from the natural-language corpus
    NaturalText = 0x80,
}

impl GenerationMode {
    /// All modes, in bit order.
    pub const ALL: [GenerationMode; 8] = [
        GenerationMode::Random,
        GenerationMode::Increasing,
        GenerationMode::Decreasing,
        GenerationMode::Repeating,
        GenerationMode::NameSurname,
        GenerationMode::Email,
        GenerationMode::Phone,
        GenerationMode::NaturalText,
    ];

    /// Bit of this mode inside a [`ModeSet`].
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Whether the mode produces realistic values whose length is only known
    /// after generation.
    pub const fn is_realistic(self) -> bool {
        matches!(
            self,
            GenerationMode::NameSurname
                | GenerationMode::Email
                | GenerationMode::Phone
                | GenerationMode::NaturalText
        )
    }

    /// Upper-case name as written in schema documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Random => "RANDOM",
            GenerationMode::Increasing => "INCREASING",
            GenerationMode::Decreasing => "DECREASING",
            GenerationMode::Repeating => "REPEATING",
            GenerationMode::NameSurname => "NAMESURNAME",
            GenerationMode::Email => "EMAIL",
            GenerationMode::Phone => "PHONE",
            GenerationMode::NaturalText => "NATURALTEXT",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        GenerationMode::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| Error::invalid(format!("unknown generation mode '{s}'")))
    }
}

/// Set of generation modes stored as bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeSet(u8);

impl ModeSet {
    /// The empty set.
    pub const EMPTY: ModeSet = ModeSet(0);

    /// Build a set from a list of modes.
    pub const fn of(modes: &[GenerationMode]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < modes.len() {
            bits |= modes[i].bit();
            i += 1;
        }
        ModeSet(bits)
    }

    /// Return a copy of this set with `mode` added.
    pub const fn with(self, mode: GenerationMode) -> Self {
        ModeSet(self.0 | mode.bit())
    }

    /// Whether `mode` is in the set.
    pub const fn contains(self, mode: GenerationMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the modes in the set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = GenerationMode> {
        GenerationMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }
}

impl BitOr for GenerationMode {
    type Output = ModeSet;

    fn bitor(self, rhs: GenerationMode) -> ModeSet {
        ModeSet(self.bit() | rhs.bit())
    }
}

impl BitOr<GenerationMode> for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: GenerationMode) -> ModeSet {
        self.with(rhs)
    }
}

impl From<GenerationMode> for ModeSet {
    fn from(mode: GenerationMode) -> Self {
        ModeSet(mode.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_modes_table() {
        let numeric = GenerationMode::Random
            | GenerationMode::Increasing
            | GenerationMode::Decreasing
            | GenerationMode::Repeating;
        assert_eq!(DbType::Integer.valid_modes(), numeric);
        assert_eq!(DbType::Real.valid_modes(), numeric);

        let date = GenerationMode::Random | GenerationMode::Increasing | GenerationMode::Decreasing;
        assert_eq!(DbType::Date.valid_modes(), date);

        let string: Vec<_> = DbType::String.valid_modes().iter().collect();
        assert_eq!(
            string,
            vec![
                GenerationMode::Random,
                GenerationMode::Repeating,
                GenerationMode::NameSurname,
                GenerationMode::Email,
                GenerationMode::Phone,
                GenerationMode::NaturalText,
            ]
        );
    }

    #[test]
    fn test_check_mode_rejects_invalid_combinations() {
        let err = DbType::Date
            .check_mode(GenerationMode::Repeating)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidGenerationMode {
                db_type: DbType::Date,
                mode: GenerationMode::Repeating
            }
        ));
        assert!(err.to_string().contains("DATE"));

        assert!(matches!(
            DbType::String.check_mode(GenerationMode::Increasing),
            Err(Error::InvalidGenerationMode { .. })
        ));
        assert!(matches!(
            DbType::Integer.check_mode(GenerationMode::Email),
            Err(Error::InvalidGenerationMode { .. })
        ));
    }

    #[test]
    fn test_check_mode_accepts_every_listed_mode() {
        for db_type in DbType::ALL {
            for mode in db_type.valid_modes().iter() {
                assert!(db_type.check_mode(mode).is_ok(), "{db_type} / {mode}");
            }
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("integer".parse::<DbType>().unwrap(), DbType::Integer);
        assert_eq!(" Real ".parse::<DbType>().unwrap(), DbType::Real);
        assert_eq!(
            "NameSurname".parse::<GenerationMode>().unwrap(),
            GenerationMode::NameSurname
        );
        assert_eq!(
            "naturaltext".parse::<GenerationMode>().unwrap(),
            GenerationMode::NaturalText
        );
    }

    #[test]
    fn test_parse_unknown_names() {
        assert!(matches!(
            "BLOB".parse::<DbType>(),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            "SHUFFLED".parse::<GenerationMode>(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_mode_set_operations() {
        let set = ModeSet::EMPTY.with(GenerationMode::Phone);
        assert!(set.contains(GenerationMode::Phone));
        assert!(!set.contains(GenerationMode::Email));
        assert!(ModeSet::EMPTY.is_empty());
        assert_eq!(ModeSet::from(GenerationMode::Email).iter().count(), 1);
    }

    #[test]
    fn test_realistic_modes() {
        let realistic: Vec<_> = GenerationMode::ALL
            .into_iter()
            .filter(|m| m.is_realistic())
            .collect();
        assert_eq!(
            realistic,
            vec![
                GenerationMode::NameSurname,
                GenerationMode::Email,
                GenerationMode::Phone,
                GenerationMode::NaturalText,
            ]
        );
    }
}
