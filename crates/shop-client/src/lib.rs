use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use shop_types::domain::cart::{CartItem, CartItemPatch, NewCartItem};
use shop_types::domain::order::{Order, OrderStatus, PaymentMethod, ShippingAddress};
use shop_types::domain::product::{NewProduct, Product, ProductFilter, ProductPatch};
use shop_types::domain::user::{AuthSession, User};
use uuid::Uuid;

#[derive(Clone)]
pub struct ShopClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    token: Option<String>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct ShopClient {
    base: Url,
    client: reqwest::Client,
    token: Option<String>,
}

impl ShopClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<ShopClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(ShopClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            token: None,
            client: None,
        })
    }

    /// Same connection pool, authenticated as `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    fn request(&self, method: reqwest::Method, path: &str) -> anyhow::Result<reqwest::RequestBuilder> {
        let req = self.client.request(method, self.url(path)?);
        Ok(match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        req: reqwest::RequestBuilder,
    ) -> anyhow::Result<T> {
        let res = req.send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<AuthSession> {
        let req = self
            .request(reqwest::Method::POST, "auth/login")?
            .json(&LoginRequest { email, password });
        Self::send_json(req).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<AuthSession> {
        let req = self
            .request(reqwest::Method::POST, "auth/register")?
            .json(&RegisterRequest {
                name,
                email,
                password,
            });
        Self::send_json(req).await
    }

    pub async fn logout(&self) -> anyhow::Result<()> {
        self.request(reqwest::Method::POST, "auth/logout")?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn me(&self) -> anyhow::Result<User> {
        Self::send_json(self.request(reqwest::Method::GET, "auth/me")?).await
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>> {
        let req = self
            .request(reqwest::Method::GET, "products")?
            .query(filter);
        Self::send_json(req).await
    }

    pub async fn featured_products(&self) -> anyhow::Result<Vec<Product>> {
        Self::send_json(self.request(reqwest::Method::GET, "products/featured")?).await
    }

    pub async fn get_product(&self, id: &str) -> anyhow::Result<Product> {
        Self::send_json(self.request(reqwest::Method::GET, &format!("products/{id}"))?).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> anyhow::Result<Product> {
        let req = self
            .request(reqwest::Method::POST, "products")?
            .json(product);
        Self::send_json(req).await
    }

    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> anyhow::Result<Product> {
        let req = self
            .request(reqwest::Method::PUT, &format!("products/{id}"))?
            .json(patch);
        Self::send_json(req).await
    }

    pub async fn delete_product(&self, id: &str) -> anyhow::Result<Product> {
        Self::send_json(self.request(reqwest::Method::DELETE, &format!("products/{id}"))?).await
    }

    pub async fn get_cart(&self, user_id: &str) -> anyhow::Result<Vec<CartItem>> {
        let req = self
            .request(reqwest::Method::GET, "carts")?
            .query(&[("userId", user_id)]);
        Self::send_json(req).await
    }

    pub async fn add_to_cart(&self, user_id: &str, item: &NewCartItem) -> anyhow::Result<CartItem> {
        let req = self
            .request(reqwest::Method::POST, "carts")?
            .json(&AddToCartRequest { user_id, item });
        Self::send_json(req).await
    }

    /// `None` when the patch removed the line.
    pub async fn update_cart_item(
        &self,
        id: Uuid,
        patch: &CartItemPatch,
    ) -> anyhow::Result<Option<CartItem>> {
        let res = self
            .request(reqwest::Method::PUT, &format!("carts/{id}"))?
            .json(patch)
            .send()
            .await?
            .error_for_status()?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(res.json().await?))
    }

    pub async fn remove_from_cart(&self, id: Uuid) -> anyhow::Result<CartItem> {
        Self::send_json(self.request(reqwest::Method::DELETE, &format!("carts/{id}"))?).await
    }

    pub async fn clear_cart(&self, user_id: &str) -> anyhow::Result<()> {
        self.request(reqwest::Method::DELETE, "carts")?
            .query(&[("userId", user_id)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn create_order(&self, req: &CreateOrderRequest) -> anyhow::Result<Order> {
        let req = self.request(reqwest::Method::POST, "orders")?.json(req);
        Self::send_json(req).await
    }

    pub async fn get_order(&self, id: Uuid) -> anyhow::Result<Order> {
        Self::send_json(self.request(reqwest::Method::GET, &format!("orders/{id}"))?).await
    }

    pub async fn list_user_orders(&self, user_id: &str) -> anyhow::Result<Vec<Order>> {
        let req = self
            .request(reqwest::Method::GET, "orders/user")?
            .query(&[("userId", user_id)]);
        Self::send_json(req).await
    }

    pub async fn list_all_orders(&self) -> anyhow::Result<Vec<Order>> {
        Self::send_json(self.request(reqwest::Method::GET, "orders/admin/all")?).await
    }

    pub async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> anyhow::Result<Order> {
        let req = self
            .request(reqwest::Method::PUT, &format!("orders/{id}/status"))?
            .json(&UpdateStatusRequest { status });
        Self::send_json(req).await
    }
}

impl ShopClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<ShopClient> {
        if let Some(client) = self.client {
            return Ok(ShopClient {
                base: self.base,
                client,
                token: self.token,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        tracing::debug!(base = %self.base, "shop client ready");
        Ok(ShopClient {
            base: self.base,
            client,
            token: self.token,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    item: &'a NewCartItem,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UpdateStatusRequest {
    status: OrderStatus,
}
