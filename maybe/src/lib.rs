pub mod error;
pub mod serde;

use std::fmt;

use snafu::prelude::*;

use crate::error::{Error, NothingSnafu};

/// Optional value that is transparent in JSON.
///
/// `Maybe<T>` has exactly two states: `Just(T)` owns a value and `Nothing` owns none.  Unlike
/// `Option<T>` under `#[serde(skip_serializing_if = ...)]`, `Nothing` is never mapped to a missing
/// field; it is always serialized as `null` (see [`crate::serde`]).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Maybe<T> {
    Nothing,
    Just(T),
}

pub trait ToMaybe: Sized {
    fn to_maybe(self) -> Maybe<Self>;
}

impl<T> ToMaybe for T {
    fn to_maybe(self) -> Maybe<Self> {
        Maybe::Just(self)
    }
}

impl<T> Maybe<T> {
    pub fn just(value: T) -> Self {
        Self::Just(value)
    }

    pub fn nothing() -> Self {
        Self::Nothing
    }

    pub fn has_value(&self) -> bool {
        matches!(self, Self::Just(_))
    }

    /// Returns the inner value.
    ///
    /// Panics on `Nothing`; callers are expected to check `has_value` first.
    pub fn value(&self) -> &T {
        match self {
            Self::Just(value) => value,
            Self::Nothing => std::panic!("Maybe::value called on Nothing"),
        }
    }

    /// Same as `value`, but takes ownership.
    pub fn into_value(self) -> T {
        match self {
            Self::Just(value) => value,
            Self::Nothing => std::panic!("Maybe::into_value called on Nothing"),
        }
    }

    pub fn try_value(&self) -> Result<&T, Error> {
        self.as_ref().into_option().context(NothingSnafu)
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Just(value) => Maybe::Just(value),
            Self::Nothing => Maybe::Nothing,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Just(value) => Some(value),
            Self::Nothing => None,
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Just(value),
            None => Self::Nothing,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_option()
    }
}

// `Nothing` displays as an empty string.  This is for human consumption only; the serde impls do
// not go through `Display`.
impl<T> fmt::Display for Maybe<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Just(value) => fmt::Display::fmt(value, f),
            Self::Nothing => Ok(()),
        }
    }
}
