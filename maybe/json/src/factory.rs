//! Converter factory for `Maybe<T>`.
//!
//! Serde dispatches on static types, so the usual path to a `Maybe<T>` converter is the
//! `Serialize`/`Deserialize` impls in `maybe::serde`.  The factory exposes the same dispatch as
//! explicit steps: deciding from type metadata whether a type is an instantiation of `Maybe`, and
//! producing the converter specialized to its inner type.

use std::any;

use serde::Serialize;
use serde::de::DeserializeOwned;

use maybe::Maybe;
use maybe::serde::{Converter, MaybeConverter, Native};

use crate::Options;

/// Type metadata that a factory inspects.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TypeInfo {
    pub name: &'static str,
}

impl TypeInfo {
    pub fn of<T>() -> Self
    where
        T: ?Sized,
    {
        Self {
            name: any::type_name::<T>(),
        }
    }

    /// Returns the path of the generic type this type instantiates (e.g., `alloc::vec::Vec` for
    /// `Vec<u8>`), or `None` for non-generic types.
    //
    // NOTE: `std::any::type_name` does not guarantee its output format.  This relies on the
    // current format, which writes the full path followed by `<...>` for generic arguments, and
    // prefixes references, tuples, slices, etc. with their own punctuation.
    pub fn generic_origin(&self) -> Option<&'static str> {
        self.name.split_once('<').map(|(origin, _)| origin)
    }
}

pub trait ConverterFactory {
    fn can_convert(&self, target: &TypeInfo) -> bool;
}

/// Produces a converter for `X`.
///
/// Implemented only for the targets a factory accepts; requesting a converter for any other type
/// does not compile.
pub trait CreateConverter<X>: ConverterFactory {
    type Converter: Converter<Value = X>;

    fn create_converter(&self, options: &Options) -> Self::Converter;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaybeConverterFactory;

impl MaybeConverterFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ConverterFactory for MaybeConverterFactory {
    fn can_convert(&self, target: &TypeInfo) -> bool {
        target.generic_origin().is_some()
            && target.generic_origin() == TypeInfo::of::<Maybe<()>>().generic_origin()
    }
}

impl<T> CreateConverter<Maybe<T>> for MaybeConverterFactory
where
    T: Serialize + DeserializeOwned,
{
    type Converter = MaybeConverter<Native<T>>;

    // `options` is not consulted: formatting is applied by the serializer that the converter
    // writes into, and naming by `T`'s own impls.
    fn create_converter(&self, _: &Options) -> Self::Converter {
        tracing::debug!(
            target_type = any::type_name::<Maybe<T>>(),
            inner_type = any::type_name::<T>(),
            "create converter",
        );
        MaybeConverter::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use maybe::ToMaybe;

    use super::*;

    #[test]
    fn generic_origin() {
        assert_eq!(TypeInfo::of::<u8>().generic_origin(), None);
        assert_eq!(TypeInfo::of::<str>().generic_origin(), None);
        assert_eq!(
            TypeInfo::of::<Maybe<u8>>().generic_origin(),
            TypeInfo::of::<Maybe<String>>().generic_origin(),
        );
        assert_ne!(
            TypeInfo::of::<Maybe<u8>>().generic_origin(),
            TypeInfo::of::<Option<u8>>().generic_origin(),
        );
    }

    #[test]
    fn can_convert() {
        fn test<T: ?Sized>(expect: bool) {
            assert_eq!(
                MaybeConverterFactory.can_convert(&TypeInfo::of::<T>()),
                expect,
                "{}",
                any::type_name::<T>(),
            );
        }

        test::<Maybe<i32>>(true);
        test::<Maybe<String>>(true);
        test::<Maybe<Maybe<bool>>>(true);
        test::<Maybe<Vec<Maybe<f64>>>>(true);
        test::<Maybe<HashMap<String, Maybe<u8>>>>(true);

        test::<i32>(false);
        test::<String>(false);
        test::<str>(false);
        test::<Option<i32>>(false);
        test::<Vec<Maybe<i32>>>(false);
        test::<&'static Maybe<i32>>(false);
        test::<Box<Maybe<i32>>>(false);
        test::<(Maybe<i32>, i32)>(false);
        test::<MaybeConverterFactory>(false);
    }

    #[test]
    fn create_converter() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let factory = MaybeConverterFactory::new();
        assert!(factory.can_convert(&TypeInfo::of::<Maybe<Vec<u32>>>()));
        let converter =
            CreateConverter::<Maybe<Vec<u32>>>::create_converter(&factory, &Options::default());

        for (value, json) in [
            (vec![1, 2].to_maybe(), "[1,2]"),
            (Vec::new().to_maybe(), "[]"),
            (Maybe::Nothing, "null"),
        ] {
            let mut output = Vec::new();
            converter
                .write(&value, &mut serde_json::Serializer::new(&mut output))
                .unwrap();
            assert_eq!(output, json.as_bytes());

            let mut deserializer = serde_json::Deserializer::from_str(json);
            assert_eq!(converter.read(&mut deserializer).unwrap(), value);
        }
    }

    #[test]
    fn create_converter_log() {
        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Buffer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().write(buf)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer({
                let buffer = buffer.clone();
                move || buffer.clone()
            })
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _ = CreateConverter::<Maybe<Vec<u32>>>::create_converter(
                &MaybeConverterFactory::new(),
                &Options::default(),
            );
        });

        let log = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("create converter"), "{log}");
        assert!(
            log.contains(&format!(
                "target_type={:?}",
                any::type_name::<Maybe<Vec<u32>>>(),
            )),
            "{log}",
        );
        assert!(
            log.contains(&format!("inner_type={:?}", any::type_name::<Vec<u32>>())),
            "{log}",
        );
    }

    #[test]
    fn create_nested_converter() {
        let factory = MaybeConverterFactory::new();
        let converter = CreateConverter::<Maybe<Maybe<String>>>::create_converter(
            &factory,
            &Options::default(),
        );

        let mut deserializer = serde_json::Deserializer::from_str(r#""x""#);
        assert_eq!(
            converter.read(&mut deserializer).unwrap(),
            "x".to_string().to_maybe().to_maybe(),
        );

        let mut deserializer = serde_json::Deserializer::from_str("null");
        assert_eq!(converter.read(&mut deserializer).unwrap(), Maybe::Nothing);
    }
}
