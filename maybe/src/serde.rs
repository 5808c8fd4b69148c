//! Serde support for `Maybe<T>`.
//!
//! `Just(v)` is serialized exactly as `v` would be and `Nothing` is serialized as `null`.  Reading
//! is the reverse: `null` becomes `Nothing`, and anything else is handed to `T`'s deserializer at
//! the current position.  Errors from the underlying format pass through untouched.

use std::fmt;
use std::marker::PhantomData;

use ::serde::de::{self, Deserialize, DeserializeOwned, DeserializeSeed, Deserializer};
use ::serde::ser::{Serialize, Serializer};

use crate::Maybe;

/// Serde conversion for a value type, callable without a `Serialize`/`Deserialize` impl.
///
/// Implement it for a local marker type when `Value` is foreign.  Because the associated
/// functions are named `deserialize` and `serialize`, a `MaybeConverter<C>` can be handed to
/// `#[serde(with = "...")]`.
pub trait Converter {
    type Value;

    fn deserialize<'de, D>(deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>;

    fn serialize<S>(value: &Self::Value, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer;
}

/// Converter that defers to `T`'s own serde impls.
pub struct Native<T>(PhantomData<fn() -> T>);

/// Converter for `Maybe<C::Value>`, specialized to the inner converter `C`.
pub struct MaybeConverter<C>(PhantomData<fn() -> C>);

impl<T> Converter for Native<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn deserialize<'de, D>(deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer)
    }

    fn serialize<S>(value: &Self::Value, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }
}

impl<C> Converter for MaybeConverter<C>
where
    C: Converter,
{
    type Value = Maybe<C::Value>;

    fn deserialize<'de, D>(deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(Visitor::new(Seed::<C>(PhantomData)))
    }

    fn serialize<S>(value: &Self::Value, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Maybe::Just(value) => serializer.serialize_some(&Ref::<C>(value)),
            Maybe::Nothing => serializer.serialize_none(),
        }
    }
}

impl<C> MaybeConverter<C>
where
    C: Converter,
{
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub fn read<'de, D>(&self, deserializer: D) -> Result<Maybe<C::Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Self as Converter>::deserialize(deserializer)
    }

    pub fn write<S>(&self, value: &Maybe<C::Value>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <Self as Converter>::serialize(value, serializer)
    }

    // `#[serde(with = "...")]` resolves `deserialize` and `serialize` by path, which does not see
    // trait methods unless the caller imports `Converter`.

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Maybe<C::Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Self as Converter>::deserialize(deserializer)
    }

    pub fn serialize<S>(value: &Maybe<C::Value>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <Self as Converter>::serialize(value, serializer)
    }
}

impl<C> Default for MaybeConverter<C>
where
    C: Converter,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for MaybeConverter<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for MaybeConverter<C> {}

impl<C> fmt::Debug for MaybeConverter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MaybeConverter")
            .field(&std::any::type_name::<C>())
            .finish()
    }
}

impl<T> Serialize for Maybe<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Maybe::Just(value) => serializer.serialize_some(value),
            Maybe::Nothing => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Maybe<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(Visitor::new(PhantomData::<T>))
    }
}

struct Seed<C>(PhantomData<fn() -> C>);

impl<'de, C> DeserializeSeed<'de> for Seed<C>
where
    C: Converter,
{
    type Value = C::Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        C::deserialize(deserializer)
    }
}

struct Ref<'a, C: Converter>(&'a C::Value);

impl<C> Serialize for Ref<'_, C>
where
    C: Converter,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        C::serialize(self.0, serializer)
    }
}

struct Visitor<S>(S);

impl<S> Visitor<S> {
    fn new(seed: S) -> Self {
        Self(seed)
    }
}

impl<'de, S> de::Visitor<'de> for Visitor<S>
where
    S: DeserializeSeed<'de>,
{
    type Value = Maybe<S::Value>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null or a value")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Maybe::Nothing)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.0.deserialize(deserializer).map(Maybe::Just)
    }

    // Buffered content (`#[serde(flatten)]`, untagged enums) reports `null` as unit.
    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Maybe::Nothing)
    }
}
