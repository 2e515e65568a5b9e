// # HTTP Contact Store
//
// ContactStore implementation for a REST-style contact collection.
//
// ## Wire Format
//
// - List:   `GET    <base>`       → JSON array of contacts
// - Create: `POST   <base>`       with the contact fields (no id)
// - Update: `PATCH  <base>/<id>`  with only the fields being changed
// - Delete: `DELETE <base>/<id>`
//
// Any 2xx status is success. Everything else, including transport errors
// and timeouts, is reported as `Error::Http` with no per-status handling.
//
// ## Boundaries
//
// - ✅ One request per call
// - ✅ HTTP timeout configured (default 30 seconds)
// - ❌ NO retries or backoff
// - ❌ NO caching of the collection (owned by ContactSync)
// - ❌ NO background tasks

use async_trait::async_trait;
use contacts_core::config::StoreConfig;
use contacts_core::traits::{ContactStore, ContactStoreFactory};
use contacts_core::{Contact, ContactFields, ContactPatch, Error, Result};
use reqwest::{Response, Url};
use std::time::Duration;

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Contact store backed by a REST collection
#[derive(Debug, Clone)]
pub struct HttpContactStore {
    /// Collection URL; records live at `<base_url>/<id>`
    base_url: Url,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl HttpContactStore {
    /// Create a store for the collection at `base_url`
    ///
    /// Fails if the URL does not parse or is not http(s), or if the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::config(format!("Invalid store URL {}: {}", base_url, e)))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Store URL must use http or https: {}",
                base_url
            )));
        }
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("Store URL cannot hold record paths: {}", base_url)));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// URL of one record
    fn record_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("Store URL cannot hold record paths: {}", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Contact store answered {}", status);
            return Err(Error::http(status.to_string()));
        }

        Ok(response)
    }
}

#[async_trait]
impl ContactStore for HttpContactStore {
    async fn list(&self) -> Result<Vec<Contact>> {
        tracing::debug!("GET {}", self.base_url);
        let response = self.send(self.client.get(self.base_url.clone())).await?;

        response
            .json::<Vec<Contact>>()
            .await
            .map_err(|e| Error::store(format!("Invalid contact list: {}", e)))
    }

    async fn create(&self, fields: &ContactFields) -> Result<()> {
        tracing::debug!("POST {}", self.base_url);
        self.send(self.client.post(self.base_url.clone()).json(fields))
            .await?;
        Ok(())
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<()> {
        let url = self.record_url(id)?;
        tracing::debug!("PATCH {}", url);
        self.send(self.client.patch(url).json(patch)).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.record_url(id)?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    fn endpoint(&self) -> String {
        self.base_url.to_string()
    }

    fn store_name(&self) -> &'static str {
        "http"
    }
}

/// Factory for creating HTTP stores
pub struct HttpContactStoreFactory;

impl ContactStoreFactory for HttpContactStoreFactory {
    fn create(&self, config: &StoreConfig) -> Result<Box<dyn ContactStore>> {
        match config {
            StoreConfig::Http {
                base_url,
                timeout_secs,
            } => {
                let store = HttpContactStore::new(base_url, Duration::from_secs(*timeout_secs))?;
                tracing::info!("Using HTTP contact store at {}", store.endpoint());
                Ok(Box::new(store))
            }
            _ => Err(Error::config("Invalid config for HTTP store")),
        }
    }
}

/// Register the HTTP store with a registry
///
/// # Example
///
/// ```rust
/// use contacts_core::StoreRegistry;
///
/// let registry = StoreRegistry::with_builtin();
/// contacts_store_http::register(&registry);
/// assert!(registry.has_store("http"));
/// ```
pub fn register(registry: &contacts_core::StoreRegistry) {
    registry.register_store("http", Box::new(HttpContactStoreFactory));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn store_for(server: &mockito::ServerGuard) -> HttpContactStore {
        HttpContactStore::new(&format!("{}/contacts", server.url()), DEFAULT_HTTP_TIMEOUT).unwrap()
    }

    fn ada() -> ContactFields {
        ContactFields {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+998 (99) 999-99-99".to_string(),
        }
    }

    #[tokio::test]
    async fn list_decodes_the_collection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/contacts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {
                        "id": "1",
                        "firstName": "Ada",
                        "lastName": "Lovelace",
                        "email": "ada@example.com",
                        "phone": "+998 (99) 999-99-99",
                        "createdAt": "2024-01-01T00:00:00Z"
                    }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let contacts = store_for(&server).list().await.unwrap();

        mock.assert_async().await;
        assert_eq!(contacts, vec![Contact::from_fields("1", ada())]);
    }

    #[tokio::test]
    async fn create_posts_fields_without_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/contacts")
            .match_body(Matcher::Json(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "+998 (99) 999-99-99"
            })))
            .with_status(201)
            .with_body(r#"{"id":"8"}"#)
            .create_async()
            .await;

        store_for(&server).create(&ada()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/contacts/7")
            .match_body(Matcher::Json(json!({ "lastName": "King" })))
            .with_status(200)
            .create_async()
            .await;

        let patch = ContactPatch {
            last_name: Some("King".to_string()),
            ..ContactPatch::default()
        };
        store_for(&server).update("7", &patch).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_addresses_the_record() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/contacts/7")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        store_for(&server).delete("7").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/contacts/404")
            .with_status(404)
            .create_async()
            .await;

        let err = store_for(&server).delete("404").await.unwrap_err();

        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.to_string(), "HTTP error: 404 Not Found");
    }

    #[tokio::test]
    async fn malformed_list_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/contacts")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        assert!(store_for(&server).list().await.is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        let store = HttpContactStore::new("http://127.0.0.1:9/contacts", Duration::from_secs(1))
            .unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn record_ids_are_path_escaped() {
        let store = HttpContactStore::new("https://api.example.com/contacts/", DEFAULT_HTTP_TIMEOUT)
            .unwrap();

        assert_eq!(
            store.record_url("a/b").unwrap().as_str(),
            "https://api.example.com/contacts/a%2Fb"
        );
        assert_eq!(store.endpoint(), "https://api.example.com/contacts");
    }

    #[test]
    fn bad_urls_are_config_errors() {
        assert!(matches!(
            HttpContactStore::new("not a url", DEFAULT_HTTP_TIMEOUT),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HttpContactStore::new("ftp://example.com/contacts", DEFAULT_HTTP_TIMEOUT),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn factory_rejects_other_configs() {
        let factory = HttpContactStoreFactory;
        assert!(factory.create(&StoreConfig::default()).is_err());

        let config = StoreConfig::Http {
            base_url: "https://api.example.com/contacts".to_string(),
            timeout_secs: 30,
        };
        assert_eq!(factory.create(&config).unwrap().store_name(), "http");
    }
}
