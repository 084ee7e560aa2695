/// Defines a categorical label type over a small closed set of known values,
/// with an `Other` variant that carries any label outside that set, and generates:
/// - derives (Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)
/// - string (de)serialization through `From<String>` / `Into<String>`
/// - `Display`, `as_str`, `is_known` and `parse_known`
///
/// Usage:
///   define_label_type!(Terminal { T1 => "T1", T2 => "T2" });
#[macro_export]
macro_rules! define_label_type {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A label outside the known set, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Every known variant, in declaration order.
            pub const KNOWN: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(label) => label.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            /// Parses a label into a known variant, ignoring surrounding whitespace.
            pub fn parse_known(label: &str) -> Option<Self> {
                match label.trim() {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(label: String) -> Self {
                Self::parse_known(&label).unwrap_or(Self::Other(label))
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::parse_known(label).unwrap_or_else(|| Self::Other(label.to_string()))
            }
        }

        impl ::std::convert::From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Implements [`crate::models::Dated`] (and optionally [`crate::models::Record`])
/// for row structs that expose `date` and `terminal` fields.
#[macro_export]
macro_rules! impl_record {
    (dated: $($name:ident),+ $(,)?) => {
        $(
            impl $crate::models::Dated for $name {
                fn date(&self) -> ::chrono::NaiveDate {
                    self.date
                }
            }
        )+
    };
    ($($name:ident),+ $(,)?) => {
        $(
            impl $crate::models::Dated for $name {
                fn date(&self) -> ::chrono::NaiveDate {
                    self.date
                }
            }

            impl $crate::models::Record for $name {
                fn terminal(&self) -> &$crate::models::Terminal {
                    &self.terminal
                }
            }
        )+
    };
}
