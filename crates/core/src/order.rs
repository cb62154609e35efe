//! Order lifecycle
//!
//! Order statuses, the roles that act on them, and the single transition
//! policy every view consults. An order starts PENDING on the server and
//! ends in a terminal status; the server is authoritative and this module
//! only mirrors its rules so the client never offers an illegal action.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An order's lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created by the buyer, awaiting the farmer's decision.
    Pending,
    /// Accepted by the farmer.
    Confirmed,
    /// Declined by the farmer. Terminal.
    Rejected,
    /// Withdrawn by the buyer. Terminal.
    Cancelled,
    /// Fulfilled by the farmer. Terminal.
    Completed,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Rejected,
        Self::Cancelled,
        Self::Completed,
    ];

    /// The uppercase wire form used by the server.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Human-readable label for views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    /// Whether no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(UnknownStatusError(value.to_string())),
        }
    }
}

/// A status string the server's vocabulary does not contain.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatusError(pub String);

/// The role attempting an action on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The order's buyer.
    Buyer,
    /// The farmer whose products the order covers.
    Farmer,
}

impl Role {
    /// The uppercase wire form used by the server.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "BUYER",
            Self::Farmer => "FARMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "BUYER" => Ok(Self::Buyer),
            "FARMER" => Ok(Self::Farmer),
            _ => Err(UnknownRoleError(value.to_string())),
        }
    }
}

/// A role string the server's vocabulary does not contain.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role {0:?}")]
pub struct UnknownRoleError(pub String);

/// A transition an actor may request on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    /// Farmer accepts a pending order.
    Confirm,
    /// Farmer declines a pending order.
    Reject,
    /// Buyer withdraws a pending order.
    Cancel,
    /// Farmer fulfils a confirmed order.
    Complete,
}

impl OrderAction {
    /// The status a successful transition lands on.
    #[must_use]
    pub const fn target_status(self) -> OrderStatus {
        match self {
            Self::Confirm => OrderStatus::Confirmed,
            Self::Reject => OrderStatus::Rejected,
            Self::Cancel => OrderStatus::Cancelled,
            Self::Complete => OrderStatus::Completed,
        }
    }

    /// Lowercase verb for prompts and logs.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// An action that is not legal for the order's status and actor.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {action} a {status} order as {role}")]
pub struct InvalidTransitionError {
    /// The order's current status.
    pub status: OrderStatus,
    /// The requested action.
    pub action: OrderAction,
    /// The actor that requested it.
    pub role: Role,
}

/// The actions a role may invoke on an order in the given status.
///
/// This is the single policy deciding which controls any view surfaces.
#[must_use]
pub const fn available_actions(status: OrderStatus, role: Role) -> &'static [OrderAction] {
    match (status, role) {
        (OrderStatus::Pending, Role::Buyer) => &[OrderAction::Cancel],
        (OrderStatus::Pending, Role::Farmer) => &[OrderAction::Confirm, OrderAction::Reject],
        (OrderStatus::Confirmed, Role::Farmer) => &[OrderAction::Complete],
        _ => &[],
    }
}

/// Validate a transition and return the status it lands on.
///
/// Pure; the caller still submits the action to the server, which remains
/// authoritative and can reject a transition the client considered legal.
///
/// # Errors
///
/// Returns [`InvalidTransitionError`] when the action is not in
/// [`available_actions`] for the `(status, role)` pair.
pub fn check_transition(
    status: OrderStatus,
    action: OrderAction,
    role: Role,
) -> Result<OrderStatus, InvalidTransitionError> {
    if available_actions(status, role).contains(&action) {
        Ok(action.target_status())
    } else {
        Err(InvalidTransitionError {
            status,
            action,
            role,
        })
    }
}
