//! Presentation helpers shared by the storefront views.

use crate::cart::CartItem;
use crate::catalog::Product;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;

/// Directory product images are served from.
pub const IMAGE_BASE: &str = "/assets/img/";

/// Shown when a product has no image.
pub const PLACEHOLDER_IMAGE: &str = "/assets/img/placeholder.jpg";

/// Shown for blog dates that can't be read.
pub const INVALID_DATE: &str = "Fecha inválida";

/// Sale prices are 40% off the original.
const SALE_FACTOR: f64 = 0.6;

/// How many products the admin dashboard lists as recent.
const RECENT_LIMIT: usize = 5;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Resolve a product image reference to a URL.
///
/// Bundled image keys map through `images`; absolute paths pass through;
/// bare file names are looked up under [`IMAGE_BASE`].
pub fn product_image_src(imagen: Option<&str>, images: &HashMap<String, String>) -> String {
    match imagen {
        Some(key) if !key.is_empty() => {
            if let Some(mapped) = images.get(key) {
                mapped.clone()
            } else if key.starts_with('/') {
                key.to_string()
            } else {
                format!("{IMAGE_BASE}{key}")
            }
        }
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// The pre-sale price shown struck through on sale products.
pub fn original_price(product: &Product) -> f64 {
    if product.oferta {
        product.precio / SALE_FACTOR
    } else {
        product.precio
    }
}

/// Two-decimal price text; anything that isn't a number renders `0.00`.
pub fn format_price(value: &str) -> String {
    let trimmed = value.trim();
    let parsed = if trimmed.is_empty() {
        Some(0.0)
    } else {
        trimmed.parse::<f64>().ok()
    };
    match parsed {
        Some(n) if !n.is_nan() => format!("{n:.2}"),
        _ => "0.00".to_string(),
    }
}

/// `$<precio>` for listings, or `""` when there is no price.
pub fn price_label(precio: Option<f64>) -> String {
    precio.map(|p| format!("${p}")).unwrap_or_default()
}

/// Name for listings, with a stand-in for unnamed products.
pub fn product_name(product: &Product) -> &str {
    if product.nombre.is_empty() {
        "Sin nombre"
    } else {
        &product.nombre
    }
}

/// Confirmation text shown before deleting a product.
pub fn delete_confirmation_message(id: Option<&str>, nombre: Option<&str>) -> String {
    let name = nombre.filter(|n| !n.is_empty()).unwrap_or("producto seleccionado");
    let id = id.filter(|i| !i.is_empty()).unwrap_or("N/A");
    format!(
        "¿Eliminar \"{name}\" (id: {id})? Esta acción puede deshacerla borrando products_list en LocalStorage."
    )
}

/// `precio * qty` for one receipt line.
pub fn item_subtotal(item: &CartItem) -> f64 {
    item.product.precio * item.qty as f64
}

/// Parse the date formats stored records use: RFC 3339, a bare
/// `YYYY-MM-DD[THH:MM:SS]`, or epoch milliseconds.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|at| at.and_utc());
    }
    input
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Up to five of the newest products.
///
/// Products carrying a readable `createdAt` are ranked newest first. When no
/// product has one, the last five in list order are returned, last first.
pub fn recent_products(products: &[Product]) -> Vec<Product> {
    let mut dated: Vec<(DateTime<Utc>, &Product)> = products
        .iter()
        .filter_map(|p| {
            p.created_at
                .as_deref()
                .and_then(parse_date)
                .map(|at| (at, p))
        })
        .collect();

    if !dated.is_empty() {
        dated.sort_by(|a, b| b.0.cmp(&a.0));
        return dated
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|(_, p)| p.clone())
            .collect();
    }

    products.iter().rev().take(RECENT_LIMIT).cloned().collect()
}

/// Long Spanish date, e.g. `29 de octubre de 2025`.
pub fn format_blog_date(input: Option<&str>) -> String {
    input
        .and_then(parse_date)
        .map(|at| {
            let month = MONTHS[at.month0() as usize];
            format!("{} de {} de {}", at.day(), month, at.year())
        })
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> HashMap<String, String> {
        HashMap::from([("Starmie.jpg".to_string(), "/static/media/starmie.abc.jpg".to_string())])
    }

    #[test]
    fn test_image_src_resolution() {
        let images = images();
        assert_eq!(
            product_image_src(Some("Starmie.jpg"), &images),
            "/static/media/starmie.abc.jpg"
        );
        assert_eq!(
            product_image_src(Some("/assets/img/silla-pro.jpg"), &images),
            "/assets/img/silla-pro.jpg"
        );
        assert_eq!(product_image_src(Some("mouse.png"), &images), "/assets/img/mouse.png");
        assert_eq!(product_image_src(Some(""), &images), PLACEHOLDER_IMAGE);
        assert_eq!(product_image_src(None, &images), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_original_price() {
        let regular = Product::new("p1", "A", 60.0);
        assert_eq!(original_price(&regular), 60.0);
        let sale = Product::new("p2", "B", 60.0).on_sale();
        assert!((original_price(&sale) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("12.5"), "12.50");
        assert_eq!(format_price("7"), "7.00");
        assert_eq!(format_price("abc"), "0.00");
        assert_eq!(format_price(""), "0.00");
        assert_eq!(format_price("NaN"), "0.00");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(Some(59.99)), "$59.99");
        assert_eq!(price_label(Some(100.0)), "$100");
        assert_eq!(price_label(None), "");
    }

    #[test]
    fn test_delete_confirmation() {
        assert_eq!(
            delete_confirmation_message(Some("p1"), Some("Silla")),
            "¿Eliminar \"Silla\" (id: p1)? Esta acción puede deshacerla borrando products_list en LocalStorage."
        );
        let fallback = delete_confirmation_message(None, Some(""));
        assert!(fallback.starts_with("¿Eliminar \"producto seleccionado\" (id: N/A)?"));
    }

    #[test]
    fn test_product_name_fallback() {
        assert_eq!(product_name(&Product::new("p1", "", 1.0)), "Sin nombre");
        assert_eq!(product_name(&Product::new("p1", "Mouse", 1.0)), "Mouse");
    }

    #[test]
    fn test_item_subtotal() {
        let item = CartItem::new(Product::new("p1", "A", 2.5), 4);
        assert_eq!(item_subtotal(&item), 10.0);
    }

    #[test]
    fn test_recent_by_date() {
        let mut products: Vec<Product> = (1..=7)
            .map(|n| Product::new(format!("p{n}"), "x", 1.0))
            .collect();
        products[1].created_at = Some("2025-01-01".into());
        products[4].created_at = Some("2025-03-01T10:00:00Z".into());
        products[6].created_at = Some("garbage".into());

        let recent = recent_products(&products);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p5", "p2"]);
    }

    #[test]
    fn test_recent_without_dates() {
        let products: Vec<Product> = (1..=7)
            .map(|n| Product::new(format!("p{n}"), "x", 1.0))
            .collect();
        let ids: Vec<String> = recent_products(&products)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["p7", "p6", "p5", "p4", "p3"]);
        assert!(recent_products(&[]).is_empty());
    }

    #[test]
    fn test_format_blog_date() {
        assert_eq!(format_blog_date(Some("2025-10-29")), "29 de octubre de 2025");
        assert_eq!(format_blog_date(Some("2025-01-05T08:30:00Z")), "5 de enero de 2025");
        assert_eq!(format_blog_date(Some("mañana")), INVALID_DATE);
        assert_eq!(format_blog_date(None), INVALID_DATE);
    }

    #[test]
    fn test_parse_date_millis() {
        let at = parse_date("1761746400000").unwrap();
        assert_eq!(at.year(), 2025);
    }
}
