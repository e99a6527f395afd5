//! Identifier types for portfolio entities.
//!
//! Strongly-typed identifiers keep a commodity id from being passed where a
//! customer id belongs. All are thin string newtypes; the surrounding system
//! decides the actual id scheme (UUIDs in the original service).

use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id! {
    /// Unique identifier for a commodity.
    ///
    /// # Examples
    ///
    /// ```
    /// use granum_portfolio::ids::CommodityId;
    ///
    /// let id = CommodityId::new("sugar");
    /// assert_eq!(id.as_str(), "sugar");
    /// ```
    CommodityId
}

string_id! {
    /// Unique identifier for a customer (portfolio owner).
    CustomerId
}

string_id! {
    /// Unique identifier for a user acting on a customer's behalf.
    UserId
}

string_id! {
    /// Unique identifier for a purchase record.
    PurchaseId
}

string_id! {
    /// Unique identifier for a hedge session.
    HedgeSessionId
}
