macro_rules! nutype_string {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            Deref,
            From,
            Display,
            Serialize,
            Deserialize
        ))]
        pub struct $ident(String);
    };
    ($ident:ident($($args:tt)*)) => {
        #[::nutype::nutype(
            $($args)*,
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                Deref,
                TryFrom,
                Display,
                Serialize,
                Deserialize
            )
        )]
        pub struct $ident(String);
    };
}

/// Defines a closed catalog of string identifiers.
///
/// Every variant has a wire value and a human readable label. An optional
/// per-variant extra value is exposed via an accessor with the given name.
macro_rules! catalog {
    (
        $(#[doc = $doc:literal])*
        $vis:vis enum $ident:ident { $extra_fn:ident: $extra_ty:ty } {
            $(
                $(#[doc = $variant_doc:literal])*
                $variant:ident($value:literal, $label:literal, $extra:expr)
            ),* $(,)?
        }
    ) => {
        $crate::macros::catalog! {
            $(#[doc = $doc])*
            $vis enum $ident {
                $($(#[doc = $variant_doc])* $variant($value, $label)),*
            }
        }

        impl $ident {
            pub fn $extra_fn(self) -> $extra_ty {
                match self {
                    $(Self::$variant => $extra),*
                }
            }
        }
    };
    (
        $(#[doc = $doc:literal])*
        $vis:vis enum $ident:ident {
            $($(#[doc = $variant_doc:literal])* $variant:ident($value:literal, $label:literal)),* $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $ident {
            $($(#[doc = $variant_doc])* $variant),*
        }

        impl $ident {
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// The identifier used on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),*
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }

        impl ::std::str::FromStr for $ident {
            type Err = $crate::catalog::UnknownCatalogValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)*
                    _ => Err($crate::catalog::UnknownCatalogValue(s.into())),
                }
            }
        }

        impl ::std::fmt::Display for $ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $ident {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ident {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let s = <::std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
                s.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use {catalog, nutype_string};
