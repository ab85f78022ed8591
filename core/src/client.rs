//! A Brainstem client bound to one transport, base URL and token.
//!
//! # Design
//! `BrainstemClient` holds a `Transport` and a `ClientConfig` and carries no
//! mutable state between calls. Paths are resolved against the configured
//! base URL; every method delegates to the free functions in
//! [`request`](crate::request), so the two surfaces behave identically.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::request;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct BrainstemClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> BrainstemClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch(&self, path: &str, params: &QueryParams) -> Result<Value, ApiError> {
        request::fetch(&self.transport, &self.config.auth_token, &self.config.url(path), params).await
    }

    pub async fn create<A>(
        &self,
        path: &str,
        model_name: &str,
        attributes: &A,
        additional: Option<&Map<String, Value>>,
    ) -> Result<Value, ApiError>
    where
        A: Serialize + ?Sized,
    {
        let uri = self.config.url(path);
        request::create(&self.transport, &self.config.auth_token, &uri, model_name, attributes, additional)
            .await
    }

    pub async fn update<A>(
        &self,
        path: &str,
        model_name: &str,
        attributes: &A,
        additional: Option<&Map<String, Value>>,
    ) -> Result<Value, ApiError>
    where
        A: Serialize + ?Sized,
    {
        let uri = self.config.url(path);
        request::update(&self.transport, &self.config.auth_token, &uri, model_name, attributes, additional)
            .await
    }

    pub async fn destroy(&self, path: &str) -> Result<Value, ApiError> {
        request::destroy(&self.transport, &self.config.auth_token, &self.config.url(path)).await
    }
}
