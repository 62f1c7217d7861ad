use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};

pub type SdkError = Box<dyn std::error::Error + Send + Sync>;

/// Product as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
}

pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (timeouts, proxies).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send an arbitrary request; the response is returned whatever its status.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: impl Into<reqwest::Body>,
    ) -> Result<Response, reqwest::Error> {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .body(body)
            .send()
            .await
    }

    /// POST `data` to `/` and return the echoed text.
    pub async fn echo(&self, data: &str) -> Result<String, SdkError> {
        let resp = self.send(Method::POST, "/", data.to_string()).await?;
        text_or_error(resp).await
    }

    /// POST `name` to `/helloworld` and return the greeting.
    pub async fn hello(&self, name: &str) -> Result<String, SdkError> {
        let resp = self.send(Method::POST, "/helloworld", name.to_string()).await?;
        text_or_error(resp).await
    }

    /// Fetch every product in catalog order.
    pub async fn list_products(&self) -> Result<Vec<Product>, SdkError> {
        let resp = self
            .client
            .get(format!("{}/products", self.base_url))
            .send()
            .await?;
        let text = text_or_error(resp).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POST a product. The raw response is returned so callers can inspect
    /// rejections (400, 409).
    pub async fn add_product(&self, product: &Product) -> Result<Response, reqwest::Error> {
        self.client
            .post(format!("{}/products", self.base_url))
            .json(product)
            .send()
            .await
    }

    /// PUT a product, replacing the entry with the same id.
    pub async fn update_product(&self, product: &Product) -> Result<Response, reqwest::Error> {
        self.client
            .put(format!("{}/products", self.base_url))
            .json(product)
            .send()
            .await
    }
}

async fn text_or_error(resp: Response) -> Result<String, SdkError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(format!("Catalog returned error status {}: {}", status, text).into());
    }
    Ok(text)
}
