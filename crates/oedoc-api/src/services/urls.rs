//! Public URLs the service hands out to clients.

use oedoc_core::Config;
use uuid::Uuid;

/// Builders for redirect targets and listing download links.
#[derive(Clone, Debug)]
pub struct PublicUrls {
    /// `PUBLIC_BASE_URL[/APP_VERSION]`
    versioned_base: String,
    service_name: String,
    thumbnail_base: String,
}

impl PublicUrls {
    pub fn new(
        public_base_url: &str,
        app_version: Option<&str>,
        service_name: &str,
        thumbnail_base: &str,
    ) -> Self {
        let mut versioned_base = public_base_url.trim_end_matches('/').to_string();
        if let Some(version) = app_version {
            versioned_base.push('/');
            versioned_base.push_str(version);
        }
        Self {
            versioned_base,
            service_name: service_name.to_string(),
            thumbnail_base: thumbnail_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.public_base_url(),
            config.app_version(),
            config.service_name(),
            config.thumbnail_redirect_base_url(),
        )
    }

    /// Target of the `display-image` redirect.
    pub fn thumbnail_redirect(&self, guid: &Uuid) -> String {
        format!("{}/{}?s=thumb", self.thumbnail_base, guid.as_hyphenated())
    }

    /// Listing link of a synthesized `display-image` entry.
    pub fn product_image(&self, guid: &Uuid) -> String {
        format!(
            "{}/product-images/{}?s=thumb",
            self.versioned_base,
            guid.as_hyphenated()
        )
    }

    /// Direct download by identifier.
    pub fn file_by_guid(&self, guid: &Uuid) -> String {
        format!(
            "{}/{}/file/{}",
            self.versioned_base,
            self.service_name,
            guid.as_hyphenated()
        )
    }

    /// Localized datasheet download, resolved again on every request.
    pub fn datasheet(
        &self,
        company: &str,
        object_type: &str,
        object_id: i64,
        culture: &str,
    ) -> String {
        format!(
            "{}/{}/file/{}/{}/datasheet/{}/{}",
            self.versioned_base, self.service_name, company, object_type, object_id, culture
        )
    }
}
