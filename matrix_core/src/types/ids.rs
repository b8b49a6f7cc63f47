//! Identifier newtypes for regions, services, languages and products
//!
//! The four identifier sets are finite and caller-supplied. Each gets its own
//! type so a service can never be passed where a region is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_identifier!(
    /// Deployment region (e.g. "USA", "Europe")
    Region
);
define_identifier!(
    /// Underlying service (e.g. "ASR", "Redaction")
    Service
);
define_identifier!(
    /// Supported language (e.g. "English", "Arabic")
    Language
);
define_identifier!(
    /// Product composed from a set of services (e.g. "CRA")
    Product
);
