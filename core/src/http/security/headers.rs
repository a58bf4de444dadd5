//! Default security response headers.
//!
//! Added to every response (successes and 401/403 alike) unless the handler
//! already set the header:
//!
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY`
//! - `X-XSS-Protection: 0`
//! - `Cache-Control: no-cache, no-store, max-age=0, must-revalidate`
//! - `Pragma: no-cache`
//! - `Expires: 0`
//!
//! `Strict-Transport-Security` is opt-in through [`SecurityHeaders::hsts`].

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{
    HeaderName, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA, STRICT_TRANSPORT_SECURITY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

/// Value of `X-Frame-Options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
    Disabled,
}

/// Security headers middleware factory.
///
/// # Example
/// ```ignore
/// App::new().wrap(SecurityHeaders::default().hsts(31_536_000, true))
/// ```
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    content_type_options: bool,
    frame_options: FrameOptions,
    xss_protection: bool,
    cache_control: bool,
    hsts: Option<(u64, bool)>,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        SecurityHeaders {
            content_type_options: true,
            frame_options: FrameOptions::Deny,
            xss_protection: true,
            cache_control: true,
            hsts: None,
        }
    }
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_options(mut self, options: FrameOptions) -> Self {
        self.frame_options = options;
        self
    }

    /// Drops `Cache-Control`, `Pragma` and `Expires`.
    pub fn disable_cache_control(mut self) -> Self {
        self.cache_control = false;
        self
    }

    pub fn disable_content_type_options(mut self) -> Self {
        self.content_type_options = false;
        self
    }

    pub fn disable_xss_protection(mut self) -> Self {
        self.xss_protection = false;
        self
    }

    /// Enables `Strict-Transport-Security` with `max-age` in seconds.
    pub fn hsts(mut self, max_age: u64, include_subdomains: bool) -> Self {
        self.hsts = Some((max_age, include_subdomains));
        self
    }

    /// Resolves the configuration into the list of headers to write.
    pub fn header_list(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = Vec::new();
        if self.content_type_options {
            headers.push((X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")));
        }
        match self.frame_options {
            FrameOptions::Deny => headers.push((X_FRAME_OPTIONS, HeaderValue::from_static("DENY"))),
            FrameOptions::SameOrigin => {
                headers.push((X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")))
            }
            FrameOptions::Disabled => {}
        }
        if self.xss_protection {
            headers.push((X_XSS_PROTECTION, HeaderValue::from_static("0")));
        }
        if self.cache_control {
            headers.push((
                CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, max-age=0, must-revalidate"),
            ));
            headers.push((PRAGMA, HeaderValue::from_static("no-cache")));
            headers.push((EXPIRES, HeaderValue::from_static("0")));
        }
        if let Some((max_age, include_subdomains)) = self.hsts {
            let mut value = format!("max-age={}", max_age);
            if include_subdomains {
                value.push_str(" ; includeSubDomains");
            }
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.push((STRICT_TRANSPORT_SECURITY, value));
            }
        }
        headers
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SecurityHeadersMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service: Rc::new(service),
            headers: self.header_list().into(),
        }))
    }
}

/// Security headers middleware service.
pub struct SecurityHeadersMiddleware<S> {
    service: Rc<S>,
    headers: Rc<[(HeaderName, HeaderValue)]>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let headers = Rc::clone(&self.headers);
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let response_headers = res.headers_mut();
            for (name, value) in headers.iter() {
                if !response_headers.contains_key(name) {
                    response_headers.insert(name.clone(), value.clone());
                }
            }
            Ok(res)
        })
    }
}
