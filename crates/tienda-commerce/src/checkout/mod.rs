//! Checkout module.
//!
//! Contains the checkout form, orders, the order history, payment
//! processing and the flow that ties them to the cart.

mod flow;
mod form;
mod order;
mod orders;
mod payment;

pub use flow::Checkout;
pub use form::{CheckoutForm, Customer, PaymentMethod, MIN_CARD_DIGITS};
pub use order::{Order, OrderStatus, DECLINED_MESSAGE};
pub use orders::OrderRepository;
pub use payment::{PaymentProcessor, SimulatedPayment};
