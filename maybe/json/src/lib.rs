pub mod factory;

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::Serializer;

pub use serde_json::Error;

pub use crate::factory::{ConverterFactory, CreateConverter, MaybeConverterFactory, TypeInfo};

/// JSON output options.
///
/// Naming policy is not an option here; records choose it with `#[serde(rename_all = "...")]`.
/// Strings are written as UTF-8 and escaped only where JSON requires it.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Writes indented output instead of compact output.
    pub pretty: bool,
}

pub fn to_string<T>(value: &T, options: &Options) -> Result<String, Error>
where
    T: ?Sized + Serialize,
{
    let vec = to_vec(value, options)?;
    // `serde_json` does not emit invalid UTF-8.
    Ok(unsafe { String::from_utf8_unchecked(vec) })
}

pub fn to_vec<T>(value: &T, options: &Options) -> Result<Vec<u8>, Error>
where
    T: ?Sized + Serialize,
{
    let mut writer = Vec::with_capacity(128);
    to_writer(&mut writer, value, options)?;
    Ok(writer)
}

pub fn to_writer<W, T>(writer: W, value: &T, options: &Options) -> Result<(), Error>
where
    W: Write,
    T: ?Sized + Serialize,
{
    if options.pretty {
        value.serialize(&mut Serializer::pretty(writer))
    } else {
        value.serialize(&mut Serializer::new(writer))
    }
}

pub fn from_str<'a, T>(json: &'a str) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    serde_json::from_str(json)
}

pub fn from_slice<'a, T>(json: &'a [u8]) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    serde_json::from_slice(json)
}
