//! Well-known store keys shared by every storefront service.

/// Cart item list.
pub const CART: &str = "cart";

/// Registered users (local auth).
pub const USERS: &str = "users";

/// The logged-in user, if any.
pub const CURRENT_USER: &str = "currentUser";

/// Products created or edited locally, merged over the seed catalog.
pub const PRODUCTS_LIST: &str = "products_list";

/// Last numeric suffix handed out for `p{n}` product ids.
pub const PRODUCT_COUNTER: &str = "product_counter";

/// Default order history key.
pub const BOLETAS: &str = "boletas";

/// Keys an order history may live under, in lookup order.
pub const ORDER_KEY_CANDIDATES: &[&str] = &[BOLETAS, "orders", "orderHistory", "ordenes", "orders_list"];

/// Most recently placed order, whatever its outcome.
pub const LAST_ORDER: &str = "lastOrder";

/// Last order number handed out.
pub const ORDER_COUNTER: &str = "orderCounter";

/// Bearer token returned by the remote auth endpoints.
pub const JWT_TOKEN: &str = "jwt_token";
