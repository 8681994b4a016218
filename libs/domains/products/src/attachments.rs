//! File storage for product images and manuals

use std::path::{Path, PathBuf};

use crate::error::{ProductError, ProductResult};

/// Kind of file that can accompany a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Manual,
}

impl AttachmentKind {
    /// Multipart field name carrying this attachment
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Image => "productImage",
            Self::Manual => "pdfManual",
        }
    }

    fn directory(&self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Manual => "pdfManuals",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Self::Image => "png",
            Self::Manual => "pdf",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Image => "Product image",
            Self::Manual => "Product manual",
        }
    }
}

/// Writes attachments under `<root>/images` and `<root>/pdfManuals`,
/// one file per product id
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the attachment of `kind` for `product_id` lives
    pub fn path_for(&self, kind: AttachmentKind, product_id: &str) -> PathBuf {
        self.root
            .join(kind.directory())
            .join(format!("{}.{}", product_id, kind.extension()))
    }

    /// Create both attachment directories
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for kind in [AttachmentKind::Image, AttachmentKind::Manual] {
            tokio::fs::create_dir_all(self.root.join(kind.directory())).await?;
        }
        Ok(())
    }

    /// Store `contents` for `product_id`. Empty uploads are skipped and yield `None`.
    pub async fn save(
        &self,
        kind: AttachmentKind,
        product_id: &str,
        contents: &[u8],
    ) -> ProductResult<Option<PathBuf>> {
        if contents.is_empty() {
            return Ok(None);
        }

        let path = self.path_for(kind, product_id);
        let write = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, contents).await
        };

        write.await.map_err(|e| {
            tracing::error!(
                product_id = %product_id,
                path = %path.display(),
                error = %e,
                "Failed to store attachment"
            );
            ProductError::Attachment(format!("{} saving failed", kind.label()))
        })?;

        tracing::info!(product_id = %product_id, path = %path.display(), "Stored attachment");
        Ok(Some(path))
    }

    /// Delete the attachment of `kind` for `product_id` if one was written
    pub async fn discard(&self, kind: AttachmentKind, product_id: &str) {
        let path = self.path_for(kind, product_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!(product_id = %product_id, path = %path.display(), "Discarded attachment"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                product_id = %product_id,
                path = %path.display(),
                error = %e,
                "Failed to discard attachment"
            ),
        }
    }
}
