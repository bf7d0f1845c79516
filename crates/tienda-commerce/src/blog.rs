//! Blog posts.

use crate::display::format_blog_date;
use crate::ids::PostId;
use serde::{Deserialize, Serialize};

/// A blog post, normalized from the backend and bundled shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: Option<PostId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    /// Cover image path.
    #[serde(default, alias = "cover")]
    pub image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "published_date", alias = "date")]
    pub published_date: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<String>,
}

impl BlogPost {
    /// Publication date for the post card, e.g. `20 de octubre de 2025`.
    pub fn display_date(&self) -> String {
        format_blog_date(
            self.published_date
                .as_deref()
                .or(self.created_at.as_deref()),
        )
    }
}

/// Distinct non-empty categories, in first-seen order.
pub fn categories(posts: &[BlogPost]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for post in posts {
        if !post.category.is_empty() && !seen.contains(&post.category) {
            seen.push(post.category.clone());
        }
    }
    seen
}

/// Posts bundled with the storefront, shown when the backend is unavailable.
pub fn seed_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: Some(PostId::new("setup-economico-2025")),
            title: "Cico (2025)".into(),
            excerpt: "Componentes clave, periféricos y trucos para que rinda sin gastar de más.".into(),
            content: "En esta guía te muestro qué priorizar para un setup económico:\n\
                1) Monitor 1080p 144Hz (si juegas shooters).\n\
                2) SSD NVMe 500GB (Windows + juegos).\n\
                3) Mouse con buen sensor (no es necesario que sea caro).\n\
                Consejos extra:\n\
                - Mantén drivers y BIOS al día.\n\
                - Limpia el polvo para evitar throttling."
                .into(),
            category: "Guías".into(),
            image: "/blogsimg/xocas.jpg".into(),
            published_date: Some("2025-10-20".into()),
            ..Default::default()
        },
        BlogPost {
            id: Some(PostId::new("mejores-gratis-octubre")),
            title: "Top juegos gratuitos del mes (PC, PlayStation, Xbox)".into(),
            excerpt: "Nuestro resumen mensual de los mejores juegos free-to-play.".into(),
            content: "Este mes destacan:\n\
                - Fortnite (PC/Consolas): ritmo rápido, equipos, destructibilidad.\n\
                - Warframe (PC/Consolas): acción cooperativa, progreso profundo.\n\
                - Rocket League: ideal para jugar con amigos y progresar en mecánicas."
                .into(),
            category: "Noticias".into(),
            image: "/blogsimg/juegos.jpg".into(),
            published_date: Some("2025-10-05".into()),
            ..Default::default()
        },
        BlogPost {
            id: Some(PostId::new("comparativa-mouses-2025")),
            title: "Comparativa: 5 mouses gamer que valen la pena (2025)".into(),
            excerpt: "Sensor, peso, forma y switches: lo que realmente importa.".into(),
            content: "Probamos 5 modelos populares:\n\
                - Logitech G Pro: liviano, ideal claw grip.\n\
                - Razer DeathAdder: batería duradera, buen software.\n\
                - SteelSeries Rival 3: económicos y rendidores.\n\
                - Corsair M65: peso ajustable, precisión.\n\
                - HyperX Pulsefire: buena ergonomía, RGB personalizable.\n\
                Conclusión: compra por forma y peso, no por RGB."
                .into(),
            category: "Reseñas".into(),
            image: "/blogsimg/mouse.jpeg".into(),
            published_date: Some("2025-09-25".into()),
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_snake_case_fields() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id": 3, "title": "Hola", "published_date": "2025-10-29", "created_at": "2025-10-01"}"#,
        )
        .unwrap();
        assert_eq!(post.id, Some(PostId::new("3")));
        assert_eq!(post.published_date.as_deref(), Some("2025-10-29"));
        assert_eq!(post.created_at.as_deref(), Some("2025-10-01"));
        assert_eq!(post.display_date(), "29 de octubre de 2025");
    }

    #[test]
    fn test_bundled_shape() {
        let post: BlogPost =
            serde_json::from_str(r#"{"id":"x","date":"2025-09-25","cover":"/a.jpg"}"#).unwrap();
        assert_eq!(post.image, "/a.jpg");
        assert_eq!(post.display_date(), "25 de septiembre de 2025");
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(BlogPost::default().display_date(), "Fecha inválida");
    }

    #[test]
    fn test_seed_categories() {
        assert_eq!(categories(&seed_posts()), vec!["Guías", "Noticias", "Reseñas"]);
    }
}
