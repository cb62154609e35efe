//! Haat
//!
//! Haat is the domain engine of a two-sided farm marketplace client: cart
//! aggregation, per-farmer checkout partitioning, and the order status
//! state machine shared by the buyer and farmer views.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod money;
pub mod order;
