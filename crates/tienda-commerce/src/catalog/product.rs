//! Product types.

use crate::ids::ProductId;
use crate::lenient;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image used when a product is created without one.
pub const DEFAULT_IMAGE: &str = "Starmie.jpg";

/// Legacy field spellings and the canonical field each maps to.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("name", "nombre"),
    ("title", "nombre"),
    ("price", "precio"),
    ("image", "imagen"),
    ("img", "imagen"),
    ("fecha", "createdAt"),
];

/// A product in the catalog.
///
/// Field names follow the stored records; older spellings are accepted on
/// input and the canonical spelling is always written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier (`p1`, `p2`, ... for locally created products).
    pub id: ProductId,
    /// Display name.
    #[serde(default, alias = "name", alias = "title")]
    pub nombre: String,
    /// Unit price.
    #[serde(default, alias = "price", deserialize_with = "lenient::f64_or_zero")]
    pub precio: f64,
    /// Image key, file name or absolute path.
    #[serde(default, alias = "image", alias = "img", skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    /// Long description.
    #[serde(default)]
    pub descripcion: String,
    /// Category name.
    #[serde(default)]
    pub categoria: String,
    /// On-sale flag.
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub oferta: bool,
    /// Units available.
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub stock: i64,
    /// Creation date (ISO string or epoch millis as text).
    #[serde(
        rename = "createdAt",
        alias = "fecha",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

impl Product {
    /// Create a product with the given id, name and price.
    pub fn new(id: impl Into<ProductId>, nombre: impl Into<String>, precio: f64) -> Self {
        Self {
            id: id.into(),
            nombre: nombre.into(),
            precio,
            imagen: None,
            descripcion: String::new(),
            categoria: String::new(),
            oferta: false,
            stock: 0,
            created_at: None,
        }
    }

    /// Set the available stock.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Set the category.
    pub fn with_category(mut self, categoria: impl Into<String>) -> Self {
        self.categoria = categoria.into();
        self
    }

    /// Mark the product as on sale.
    pub fn on_sale(mut self) -> Self {
        self.oferta = true;
        self
    }

    /// Unit price in cents.
    pub fn price(&self) -> Money {
        Money::from_decimal(self.precio)
    }

    /// Whether at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Rewrite legacy field names in a raw product object to their canonical
/// spelling. When both spellings are present the canonical one wins.
pub fn normalize_fields(object: &mut Map<String, Value>) {
    for (alias, canonical) in FIELD_ALIASES {
        if let Some(value) = object.remove(*alias) {
            if !object.contains_key(*canonical) {
                object.insert((*canonical).to_string(), value);
            }
        }
    }
}

/// Fields for a new product. Anything left out gets a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oferta: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductDraft {
    /// Build the product, assigning `fallback_id` when the draft has no id.
    ///
    /// Empty strings count as missing, matching the old `value || default`
    /// normalization; a given stock of `0` is kept.
    pub fn into_product(self, fallback_id: impl FnOnce() -> ProductId) -> Product {
        let id = match self.id {
            Some(id) if !id.as_str().is_empty() => id,
            _ => fallback_id(),
        };
        Product {
            id,
            nombre: self.nombre.unwrap_or_default(),
            precio: self.precio.filter(|p| p.is_finite()).unwrap_or(0.0),
            imagen: Some(
                self.imagen
                    .filter(|i| !i.is_empty())
                    .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            ),
            descripcion: self.descripcion.unwrap_or_default(),
            categoria: self.categoria.unwrap_or_default(),
            oferta: self.oferta.unwrap_or(false),
            stock: self.stock.unwrap_or(0),
            created_at: None,
        }
    }

    /// Whether the draft carries no id.
    pub fn needs_id(&self) -> bool {
        self.id.as_ref().map(|id| id.as_str().is_empty()).unwrap_or(true)
    }
}

/// A partial update. Only the fields that are set overwrite the product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oferta: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields this patch sets.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(nombre) = &self.nombre {
            product.nombre = nombre.clone();
        }
        if let Some(precio) = self.precio {
            product.precio = precio;
        }
        if let Some(imagen) = &self.imagen {
            product.imagen = Some(imagen.clone());
        }
        if let Some(descripcion) = &self.descripcion {
            product.descripcion = descripcion.clone();
        }
        if let Some(categoria) = &self.categoria {
            product.categoria = categoria.clone();
        }
        if let Some(oferta) = self.oferta {
            product.oferta = oferta;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{"id": 7, "title": "Mouse", "price": "19.90", "img": "mouse.jpg", "fecha": "2025-01-02"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "7");
        assert_eq!(p.nombre, "Mouse");
        assert_eq!(p.precio, 19.9);
        assert_eq!(p.imagen.as_deref(), Some("mouse.jpg"));
        assert_eq!(p.created_at.as_deref(), Some("2025-01-02"));
        assert_eq!(p.stock, 0);
        assert!(!p.oferta);
    }

    #[test]
    fn test_canonical_output() {
        let p = Product::new("p1", "Teclado", 10.0).with_stock(3);
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["nombre"], "Teclado");
        assert_eq!(value["stock"], 3);
        assert!(value.get("imagen").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_normalize_fields_prefers_canonical() {
        let mut obj = serde_json::json!({"id": "p1", "name": "old", "nombre": "new", "price": 5})
            .as_object()
            .cloned()
            .unwrap();
        normalize_fields(&mut obj);
        assert_eq!(obj["nombre"], "new");
        assert_eq!(obj["precio"], 5);
        assert!(!obj.contains_key("name"));
        assert!(!obj.contains_key("price"));
    }

    #[test]
    fn test_draft_defaults() {
        let p = ProductDraft::default().into_product(|| ProductId::new("p9"));
        assert_eq!(p.id.as_str(), "p9");
        assert_eq!(p.nombre, "");
        assert_eq!(p.precio, 0.0);
        assert_eq!(p.imagen.as_deref(), Some(DEFAULT_IMAGE));
        assert!(!p.oferta);
        assert_eq!(p.stock, 0);
    }

    #[test]
    fn test_draft_keeps_given_id_and_zero_stock() {
        let draft = ProductDraft {
            id: Some(ProductId::new("x1")),
            stock: Some(0),
            imagen: Some(String::new()),
            ..Default::default()
        };
        assert!(!draft.needs_id());
        let p = draft.into_product(|| ProductId::new("unused"));
        assert_eq!(p.id.as_str(), "x1");
        assert_eq!(p.stock, 0);
        assert_eq!(p.imagen.as_deref(), Some(DEFAULT_IMAGE));
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut p = Product::new("p1", "Silla", 100.0).with_stock(2);
        let patch = ProductPatch {
            precio: Some(80.0),
            oferta: Some(true),
            ..Default::default()
        };
        patch.apply_to(&mut p);
        assert_eq!(p.nombre, "Silla");
        assert_eq!(p.precio, 80.0);
        assert!(p.oferta);
        assert_eq!(p.stock, 2);
        assert!(ProductPatch::default().is_empty());
    }
}
