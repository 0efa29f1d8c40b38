//! Order-admission validation, kept outside the core matching path.
//!
//! The matching core itself is total (see `OrderQueue`, `OrderBook`,
//! `MatchingEngine`): it never returns a `Result`. This module is the thin
//! boundary a caller can run an `Order` through before handing it to
//! [`crate::MatchingEngine::tick`], to reject the admission mistakes the
//! core is not responsible for catching.

use super::order::Order;
use thiserror::Error;

/// Rejections a caller-facing admission check can raise before an `Order`
/// ever reaches the book.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderAdmissionError {
    /// `size` was not strictly positive.
    #[error("order {order_id} has non-positive size {size}")]
    NonPositiveSize {
        /// The offending order's id.
        order_id: String,
        /// The rejected size.
        size: f64,
    },

    /// `order_id` collides with one already live on the book.
    #[error("order id {order_id} is already live on the book")]
    DuplicateOrderId {
        /// The colliding id.
        order_id: String,
    },

    /// A limit order's `price` was not strictly positive.
    #[error("order {order_id} has invalid limit price {price}")]
    InvalidPrice {
        /// The offending order's id.
        order_id: String,
        /// The rejected price.
        price: f64,
    },
}

/// Validate a new (not-yet-admitted) order before it is handed to the
/// engine. Market orders are exempt from the price check since their price
/// is the engine's own sentinel, not caller-supplied.
///
/// `live_ids` should contain every `order_id` currently resting on the book,
/// so a duplicate admission can be rejected up front.
pub fn validate_new_order(
    order: &Order,
    live_ids: impl IntoIterator<Item = impl AsRef<str>>,
) -> Result<(), OrderAdmissionError> {
    if order.size <= 0.0 {
        return Err(OrderAdmissionError::NonPositiveSize {
            order_id: order.order_id.clone(),
            size: order.size,
        });
    }

    if order.execution == super::order::Execution::Limit && order.price <= 0.0 {
        return Err(OrderAdmissionError::InvalidPrice {
            order_id: order.order_id.clone(),
            price: order.price,
        });
    }

    if live_ids
        .into_iter()
        .any(|id| id.as_ref() == order.order_id)
    {
        return Err(OrderAdmissionError::DuplicateOrderId {
            order_id: order.order_id.clone(),
        });
    }

    Ok(())
}
