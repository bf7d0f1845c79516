//! The JSON product file the storefront ships with.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tienda_commerce::catalog::Product;

/// A pretty-printed JSON array of products on disk.
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the products. A missing file is an empty catalog.
    pub fn load(&self) -> Result<Vec<Product>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Error leyendo {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Error leyendo {}", self.path.display()))
    }

    pub fn save(&self, products: &[Product]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Error escribiendo {}", self.path.display()))?;
        }
        let content = serde_json::to_string_pretty(products)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Error escribiendo {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = CatalogFile::new(dir.path().join("data").join("products.json"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = CatalogFile::new(dir.path().join("data").join("products.json"));
        file.save(&[Product::new("p1", "Mouse", 9.5)]).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].nombre, "Mouse");
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, "{oops").unwrap();
        let err = CatalogFile::new(&path).load().unwrap_err();
        assert!(err.to_string().starts_with("Error leyendo"));
    }
}
