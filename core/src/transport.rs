//! The network capability injected into every request operation.

use std::future::Future;

use crate::http::{HttpRequest, HttpResponse};

/// Failure raised by a transport before a response exists.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes one HTTP round-trip.
///
/// Implementations decide everything about the wire: connection reuse,
/// timeouts, cancellation, cookies. A non-2xx status is a successful
/// round-trip and must be returned as an `HttpResponse`, not an error.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

/// A [`Transport`] backed by an async closure. See [`transport_fn`].
#[derive(Clone)]
pub struct TransportFn<F> {
    f: F,
}

/// Wrap `f` as a [`Transport`].
///
/// ```
/// use brainstem_core::{transport_fn, HttpResponse, TransportError};
///
/// let transport = transport_fn(|_request| async {
///     Ok::<_, TransportError>(HttpResponse::new(200, "{}"))
/// });
/// # let _ = transport;
/// ```
pub fn transport_fn<F, Fut>(f: F) -> TransportFn<F>
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, TransportError>> + Send,
{
    TransportFn { f }
}

impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, TransportError>> + Send,
{
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (self.f)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Credentials, HttpMethod};

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: Vec::new(),
            credentials: Credentials::Include,
            body: None,
        }
    }

    async fn send_via<T: Transport>(transport: T, url: &str) -> HttpResponse {
        transport.send(request(url)).await.unwrap()
    }

    #[tokio::test]
    async fn closure_receives_the_request() {
        let echo = transport_fn(|request: HttpRequest| async move {
            Ok::<_, TransportError>(HttpResponse::new(200, request.url))
        });
        assert_eq!(send_via(&echo, "/echo").await.body, "/echo");
        assert_eq!(send_via(echo, "/owned").await.body, "/owned");
    }
}
