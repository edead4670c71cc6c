//! Typed scalar field loading with defaults and validators.
//!
//! Every scalar setting is declared once as a [`ScalarField`] constant (key,
//! compiled-in default, optional validator) and resolved from a store with one
//! of two policies:
//!
//! - [`ScalarField::load`] (*defaulted*): an absent key yields the default, a
//!   malformed value is reported and replaced by the default.
//! - [`ScalarField::load_bare`] (*bare*): an absent or malformed value leaves the
//!   caller's current value untouched; malformed values are still reported.
//!
//! Under both policies a present, well-formed value is always passed to the
//! validator, and a rejected value is reported and replaced by the default.

use std::fmt;

use crate::config::diagnostics::Diagnostics;
use crate::error::ConfigIssue;
use crate::store::ConfigStore;

/// Range check applied to every present, well-formed value.
pub type Validator<T> = fn(&T) -> bool;

/// Outcome of looking a key up in a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField<T> {
    /// No entry for the key.
    Missing,
    /// An entry that does not decode as `T`; holds the raw text.
    Malformed(String),
    /// A decoded value.
    Present(T),
}

/// A type a scalar field can hold.
pub trait FieldValue: Copy + fmt::Display {
    /// Look `key` up in `store` and decode it.
    fn fetch(store: &dyn ConfigStore, key: &str) -> RawField<Self>;
}

impl FieldValue for bool {
    /// Only the exact strings `true` and `false` decode.
    fn fetch(store: &dyn ConfigStore, key: &str) -> RawField<Self> {
        match store.get_string(key) {
            None => RawField::Missing,
            Some(raw) => match raw.as_str() {
                "true" => RawField::Present(true),
                "false" => RawField::Present(false),
                _ => RawField::Malformed(raw),
            },
        }
    }
}

impl FieldValue for i64 {
    fn fetch(store: &dyn ConfigStore, key: &str) -> RawField<Self> {
        match store.get_string(key) {
            None => RawField::Missing,
            Some(raw) => match store.get_int(key) {
                Some(value) => RawField::Present(value),
                None => RawField::Malformed(raw),
            },
        }
    }
}

/// Compile-time declaration of one scalar setting.
#[derive(Debug, Clone, Copy)]
pub struct ScalarField<T: 'static> {
    /// Key in the configuration source.
    pub key: &'static str,
    /// Compiled-in default, also the reset target for rejected values.
    pub default: T,
    validator: Option<Validator<T>>,
}

impl<T: FieldValue> ScalarField<T> {
    /// A field that accepts any well-formed value.
    pub const fn new(key: &'static str, default: T) -> Self {
        Self {
            key,
            default,
            validator: None,
        }
    }

    /// A field whose values must pass `validator`.
    pub const fn validated(key: &'static str, default: T, validator: Validator<T>) -> Self {
        Self {
            key,
            default,
            validator: Some(validator),
        }
    }

    /// Defaulted load.
    pub fn load(&self, store: &dyn ConfigStore, diag: &mut Diagnostics) -> T {
        match T::fetch(store, self.key) {
            RawField::Missing => self.default,
            RawField::Malformed(raw) => {
                self.report_malformed(raw, diag);
                self.default
            }
            RawField::Present(value) => self.validate(value, diag),
        }
    }

    /// Bare load: `current` survives an absent or malformed value.
    pub fn load_bare(&self, store: &dyn ConfigStore, current: T, diag: &mut Diagnostics) -> T {
        match T::fetch(store, self.key) {
            RawField::Missing => current,
            RawField::Malformed(raw) => {
                self.report_malformed(raw, diag);
                current
            }
            RawField::Present(value) => self.validate(value, diag),
        }
    }

    fn validate(&self, value: T, diag: &mut Diagnostics) -> T {
        match self.validator {
            Some(is_valid) if !is_valid(&value) => {
                diag.report(ConfigIssue::FieldOutOfRange {
                    key: self.key.to_string(),
                    value: value.to_string(),
                    default: self.default.to_string(),
                });
                self.default
            }
            _ => value,
        }
    }

    fn report_malformed(&self, raw: String, diag: &mut Diagnostics) {
        diag.report(ConfigIssue::FieldMalformed {
            key: self.key.to_string(),
            value: raw,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OptionsFile;
    use std::cell::Cell;

    const FLAG: ScalarField<bool> = ScalarField::new("flag", true);
    const EVEN: ScalarField<i64> = ScalarField::validated("even", 4, |v| v % 2 == 0);

    fn store(text: &str) -> OptionsFile {
        text.parse().unwrap()
    }

    #[test]
    fn test_defaulted_bool() {
        let mut diag = Diagnostics::default();
        assert!(FLAG.load(&store(""), &mut diag));
        assert!(!FLAG.load(&store("flag=false"), &mut diag));
        assert!(diag.is_empty());

        assert!(FLAG.load(&store("flag=False"), &mut diag));
        assert_eq!(
            diag.issues(),
            &[ConfigIssue::FieldMalformed {
                key: "flag".into(),
                value: "False".into()
            }]
        );
    }

    #[test]
    fn test_bare_bool_keeps_current_value() {
        let mut diag = Diagnostics::default();
        assert!(!FLAG.load_bare(&store(""), false, &mut diag));
        assert!(diag.is_empty());

        // defaulted load would reset to `true` here
        assert!(!FLAG.load_bare(&store("flag=1"), false, &mut diag));
        assert_eq!(diag.issues().len(), 1);

        assert!(FLAG.load_bare(&store("flag=true"), false, &mut diag));
    }

    #[test]
    fn test_int_validator() {
        let mut diag = Diagnostics::default();
        assert_eq!(EVEN.load(&store("even=10"), &mut diag), 10);
        assert_eq!(EVEN.load(&store(""), &mut diag), 4);
        assert!(diag.is_empty());

        assert_eq!(EVEN.load(&store("even=7"), &mut diag), 4);
        assert_eq!(EVEN.load(&store("even=seven"), &mut diag), 4);
        assert!(matches!(
            diag.issues(),
            [
                ConfigIssue::FieldOutOfRange { .. },
                ConfigIssue::FieldMalformed { .. }
            ]
        ));
    }

    thread_local! {
        static CALLS: Cell<u32> = const { Cell::new(0) };
    }

    fn counting(_: &i64) -> bool {
        CALLS.with(|c| c.set(c.get() + 1));
        true
    }

    #[test]
    fn test_validator_runs_only_for_present_values() {
        let field: ScalarField<i64> = ScalarField::validated("n", 1, counting);
        let mut diag = Diagnostics::default();

        field.load(&store(""), &mut diag);
        field.load(&store("n=abc"), &mut diag);
        assert_eq!(CALLS.with(Cell::get), 0);

        field.load(&store("n=1"), &mut diag);
        field.load(&store("n=5"), &mut diag);
        assert_eq!(CALLS.with(Cell::get), 2);
    }
}
