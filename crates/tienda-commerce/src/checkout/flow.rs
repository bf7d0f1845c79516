//! Placing an order.

use crate::cart::CartProvider;
use crate::checkout::{CheckoutForm, Order, OrderRepository, PaymentProcessor};
use crate::error::CommerceError;
use tienda_store::{keys, Cache, Storage};

/// Turns a cart into an order.
///
/// Placing an order always bumps `orderCounter` and records the attempt under
/// `lastOrder`. A paid order is appended to the order history and the cart is
/// emptied without returning stock; a declined order leaves the cart as it
/// was so the shopper can retry.
pub struct Checkout<S, P> {
    cache: Cache<S>,
    orders: OrderRepository<S>,
    processor: P,
}

impl<S: Storage + Clone, P: PaymentProcessor> Checkout<S, P> {
    pub fn new(store: S, processor: P) -> Self {
        Self {
            cache: Cache::new(store.clone()),
            orders: OrderRepository::new(store),
            processor,
        }
    }

    /// The order history this checkout writes to.
    pub fn orders(&self) -> &OrderRepository<S> {
        &self.orders
    }

    /// Increment and return the persistent order counter.
    pub fn next_order_number(&self) -> Result<u64, CommerceError> {
        let last = self
            .cache
            .get_raw(keys::ORDER_COUNTER)?
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let number = last + 1;
        self.cache.set_raw(keys::ORDER_COUNTER, &number.to_string())?;
        Ok(number)
    }

    /// The most recent order attempt, paid or not.
    pub fn last_order(&self) -> Result<Option<Order>, CommerceError> {
        Ok(self.cache.get(keys::LAST_ORDER)?)
    }

    /// Validate the form, charge the cart and record the outcome.
    ///
    /// Returns the order with status `success` or `failed`. Errors are
    /// reserved for carts that can't be ordered (empty, invalid form) and
    /// for storage failures.
    pub async fn place_order<C: Storage>(
        &self,
        cart: &mut CartProvider<C>,
        form: &CheckoutForm,
        user_email: Option<&str>,
    ) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        form.validate()?;

        let number = self.next_order_number()?;
        let mut order = Order::new(
            number,
            form.customer(),
            cart.items().to_vec(),
            cart.total()?,
            user_email.map(str::to_string),
        );
        tracing::debug!(order = %order.id, total = order.total, "placing order");

        match self.processor.charge(&order).await {
            Ok(()) => {
                order.mark_success();
                self.cache.set(keys::LAST_ORDER, &order)?;
                self.orders.save_order(&order)?;
                cart.clear_cart_on_success()?;
            }
            Err(CommerceError::PaymentDeclined(reason)) => {
                tracing::warn!(order = %order.id, reason = reason.as_str(), "payment declined");
                order.mark_failed(reason);
                self.cache.set(keys::LAST_ORDER, &order)?;
            }
            Err(e) => return Err(e),
        }
        Ok(order)
    }
}
