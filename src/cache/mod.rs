use moka::future::Cache;
use std::time::Duration;

use crate::models::whatsapp_templates;

/// In-process cache of WhatsApp templates keyed by status label.
///
/// Misses are cached too (`None`), so a status without a stored template does
/// not hit the database on every preview.
#[derive(Clone)]
pub struct TemplateCache {
    cache: Cache<String, Option<whatsapp_templates::Model>>,
}

impl TemplateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder().time_to_live(ttl).max_capacity(64).build(),
        }
    }

    /// `Some(None)` is a cached miss; `None` means not cached.
    pub async fn get(&self, status_label: &str) -> Option<Option<whatsapp_templates::Model>> {
        self.cache.get(&keys::template(status_label)).await
    }

    pub async fn set(&self, status_label: &str, value: Option<whatsapp_templates::Model>) {
        self.cache.insert(keys::template(status_label), value).await;
    }

    pub async fn invalidate(&self, status_label: &str) {
        self.cache.invalidate(&keys::template(status_label)).await;
    }
}

/// Cache key generators
pub mod keys {
    /// Labels are matched case-insensitively.
    pub fn template(status_label: &str) -> String {
        format!("template:{}", status_label.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keys_ignore_case_and_padding() {
        let cache = TemplateCache::new(Duration::from_secs(60));
        cache.set("Picked Up", None).await;

        assert_eq!(cache.get(" picked up ").await, Some(None));

        cache.invalidate("PICKED UP").await;
        assert_eq!(cache.get("Picked Up").await, None);
    }
}
