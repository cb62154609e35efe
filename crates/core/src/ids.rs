//! Typed ids
//!
//! Zero-cost wrappers over the server's integer identifiers, so a farmer id
//! cannot be passed where a product id is expected.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Serialize};

/// A server-assigned identifier tagged with the entity it identifies.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct TypedId<T>(i64, #[serde(skip)] PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw server id.
    pub const fn from_raw(id: i64) -> Self {
        Self(id, PhantomData)
    }

    /// Unwrap to the raw server id.
    #[must_use]
    pub const fn into_raw(self) -> i64 {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<TypedId<T>> for i64 {
    fn from(value: TypedId<T>) -> Self {
        value.into_raw()
    }
}

/// Marker for user ids.
#[derive(Debug)]
pub struct User;

/// Marker for buyer ids.
#[derive(Debug)]
pub struct Buyer;

/// Marker for farmer ids.
#[derive(Debug)]
pub struct Farmer;

/// Marker for product ids.
#[derive(Debug)]
pub struct Product;

/// Marker for order ids.
#[derive(Debug)]
pub struct Order;

/// User id.
pub type UserId = TypedId<User>;

/// Buyer id.
pub type BuyerId = TypedId<Buyer>;

/// Farmer id.
pub type FarmerId = TypedId<Farmer>;

/// Product id.
pub type ProductId = TypedId<Product>;

/// Order id.
pub type OrderId = TypedId<Order>;
