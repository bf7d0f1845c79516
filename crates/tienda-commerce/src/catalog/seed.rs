//! Built-in catalog shipped with the storefront.

use crate::catalog::Product;

/// The bundled product catalog. Locally stored products are merged over it.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            imagen: Some("/assets/img/auriculares-x.jpg".into()),
            descripcion: "Auriculares con micrófono y sonido surround.".into(),
            ..Product::new("p1", "Auriculares Gamer X", 59.99)
                .with_category("Accesorios")
                .with_stock(15)
        },
        Product {
            imagen: Some("/assets/img/teclado-z.jpg".into()),
            descripcion: "Teclado mecánico RGB con switches azules.".into(),
            ..Product::new("p2", "Teclado Mecánico Z", 129.99)
                .with_category("Accesorios")
                .with_stock(8)
                .on_sale()
        },
        Product {
            imagen: Some("/assets/img/silla-pro.jpg".into()),
            descripcion: "Silla ergonómica con soporte lumbar ajustable.".into(),
            ..Product::new("p3", "Silla Gamer Pro", 249.95)
                .with_category("Sillas")
                .with_stock(4)
        },
        Product {
            imagen: Some("/assets/img/carrat-umamusume.jpg".into()),
            descripcion: "Moneda de juego para Umamusume Pretty Derby.".into(),
            ..Product::new("p4", "Carrat para Umamusume", 20.99)
                .with_category("Otros")
                .with_stock(100)
        },
    ]
}
