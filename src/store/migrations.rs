//! Forward-only schema migrations for the durable document.
//!
//! Each [`Migration`] upgrades a document from `from` to `from + 1`. Steps are
//! total over any document shape and re-running a step on data it already
//! transformed leaves that data as it was.

use crate::models::{Document, Product};

use super::seed::CATALOG;

pub const CURRENT_VERSION: u32 = 6;

/// Version assumed for documents written before versioning existed.
pub const BASELINE_VERSION: u32 = 1;

pub struct Migration {
    pub from: u32,
    pub description: &'static str,
    apply: fn(&mut Document),
}

impl Migration {
    pub fn to(&self) -> u32 {
        self.from + 1
    }

    pub fn apply(&self, doc: &mut Document) {
        (self.apply)(doc);
        doc.version = self.to();
    }
}

pub static MIGRATIONS: [Migration; 5] = [
    Migration {
        from: 1,
        description: "replace non-http image references with seeded photos",
        apply: reliable_remote_images,
    },
    Migration {
        from: 2,
        description: "move product images to local assets",
        apply: local_asset_images,
    },
    Migration {
        from: 3,
        description: "repair local asset paths",
        apply: local_asset_images,
    },
    Migration {
        from: 4,
        description: "backfill local fallback image and prefer external photos",
        apply: external_with_local_fallback,
    },
    Migration {
        from: 5,
        description: "pin catalog photos for known demo products",
        apply: pin_catalog_photos,
    },
];

/// Steps still to run for a document at `version`, in ascending order.
pub fn pending(version: u32) -> impl Iterator<Item = &'static Migration> {
    let version = version.max(BASELINE_VERSION);
    MIGRATIONS.iter().filter(move |step| step.from >= version)
}

/// Runs every pending step, calling `persist` after each one.
///
/// Stops at the first persistence failure; the document then holds the
/// version of the last step that was applied, so a later run resumes there.
pub fn run<E>(
    doc: &mut Document,
    mut persist: impl FnMut(&Document, &Migration) -> Result<(), E>,
) -> Result<usize, E> {
    if doc.version < BASELINE_VERSION {
        doc.version = BASELINE_VERSION;
    }

    let mut applied = 0;
    for step in pending(doc.version) {
        step.apply(doc);
        persist(doc, step)?;
        applied += 1;
    }
    Ok(applied)
}

pub(crate) fn local_asset(index: usize) -> String {
    format!("assets/p{}.svg", (index % 8) + 1)
}

fn is_external(image: &str) -> bool {
    image.starts_with("http://") || image.starts_with("https://")
}

fn reliable_remote_images(doc: &mut Document) {
    for product in &mut doc.products {
        if !product.image.starts_with("http") {
            product.image = format!("https://picsum.photos/seed/p{}/800/600", product.id);
        }
    }
}

fn local_asset_images(doc: &mut Document) {
    for (index, product) in doc.products.iter_mut().enumerate() {
        product.image = local_asset(index);
    }
}

fn external_photo(product: &Product, index: usize) -> String {
    let title = if product.title.is_empty() {
        format!("product{index}")
    } else {
        product.title.clone()
    };
    let compact: String = title.chars().filter(|c| !c.is_whitespace()).collect();
    format!(
        "https://picsum.photos/seed/{}{index}/800/600",
        urlencoding::encode(&compact)
    )
}

fn external_with_local_fallback(doc: &mut Document) {
    for (index, product) in doc.products.iter_mut().enumerate() {
        if product.image_local.is_none() {
            product.image_local = Some(local_asset(index));
        }
        if !is_external(&product.image) {
            product.image = external_photo(product, index);
        }
    }
}

fn pin_catalog_photos(doc: &mut Document) {
    for product in &mut doc.products {
        let title = product.title.to_lowercase();
        if let Some(entry) = CATALOG.iter().find(|entry| title.contains(entry.keyword)) {
            product.image = entry.photo.to_string();
        }
    }
}
