//! Security filter chain for Actix Web.
//!
//! For every request, in this order:
//! 1. authenticate (invalid credentials go straight to the entry point),
//! 2. store the user in the request extensions,
//! 3. authorize against the request rules,
//! 4. call the protected service,
//! 5. translate an [`AuthError`] returned by the service (extractors,
//!    handler-level role checks) through the same failure hooks.
//!
//! No session is created or consulted and no cookie is written.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::http::error::AuthError;
use crate::http::security::config::{AuthorizationDecision, Authenticator, Authorizer};
use crate::http::security::handler::{
    AccessDeniedHandler, AuthenticationEntryPoint, JsonAccessDeniedHandler,
    JsonAuthenticationEntryPoint,
};

/// Routes an [`AuthError`] to the entry point or the access-denied handler.
#[derive(Clone)]
struct FailureHandlers {
    entry_point: Rc<dyn AuthenticationEntryPoint>,
    access_denied_handler: Rc<dyn AccessDeniedHandler>,
}

impl FailureHandlers {
    fn respond(&self, req: &HttpRequest, error: AuthError) -> Result<HttpResponse, Error> {
        if error.is_authentication_failure() {
            self.entry_point.commence(req, &error)
        } else {
            self.access_denied_handler.handle(req, &error)
        }
    }
}

/// Security middleware factory.
///
/// # Example
/// ```ignore
/// App::new().wrap(
///     SecurityTransform::new(authenticator, authorizer)
///         .authentication_entry_point(JsonAuthenticationEntryPoint::new())
///         .access_denied_handler(JsonAccessDeniedHandler)
/// )
/// ```
pub struct SecurityTransform<Auth, Autho> {
    authenticator: Rc<Auth>,
    authorizer: Rc<Autho>,
    handlers: FailureHandlers,
}

impl<Auth, Autho> SecurityTransform<Auth, Autho> {
    /// Creates the chain with the JSON entry point and access-denied handler.
    pub fn new(authenticator: Auth, authorizer: Autho) -> Self {
        SecurityTransform {
            authenticator: Rc::new(authenticator),
            authorizer: Rc::new(authorizer),
            handlers: FailureHandlers {
                entry_point: Rc::new(JsonAuthenticationEntryPoint::new()),
                access_denied_handler: Rc::new(JsonAccessDeniedHandler),
            },
        }
    }

    pub fn authentication_entry_point<E>(mut self, entry_point: E) -> Self
    where
        E: AuthenticationEntryPoint + 'static,
    {
        self.handlers.entry_point = Rc::new(entry_point);
        self
    }

    pub fn access_denied_handler<H>(mut self, handler: H) -> Self
    where
        H: AccessDeniedHandler + 'static,
    {
        self.handlers.access_denied_handler = Rc::new(handler);
        self
    }
}

impl<S, B, Auth, Autho> Transform<S, ServiceRequest> for SecurityTransform<Auth, Autho>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + 'static,
    Autho: Authorizer + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecurityService<Auth, Autho, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityService {
            authenticator: Rc::clone(&self.authenticator),
            authorizer: Rc::clone(&self.authorizer),
            handlers: self.handlers.clone(),
            service: Rc::new(service),
        }))
    }
}

/// Security middleware service.
pub struct SecurityService<Auth, Autho, S> {
    authenticator: Rc<Auth>,
    authorizer: Rc<Autho>,
    handlers: FailureHandlers,
    service: Rc<S>,
}

impl<Auth, Autho, S> SecurityService<Auth, Autho, S> {
    fn reject<B: 'static>(
        &self,
        req: ServiceRequest,
        error: AuthError,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let resp = self.handlers.respond(req.request(), error);
        Box::pin(async move { Ok(req.into_response(resp?.map_into_right_body())) })
    }
}

impl<Auth, Autho, S, B> Service<ServiceRequest> for SecurityService<Auth, Autho, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
    Autho: Authorizer,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user = match self.authenticator.authenticate(&req) {
            Ok(user) => user,
            Err(error) => return self.reject(req, error),
        };

        match self.authorizer.decide(&req, user.as_ref()) {
            AuthorizationDecision::Granted => {}
            AuthorizationDecision::AuthenticationRequired => {
                return self.reject(req, AuthError::Unauthorized)
            }
            AuthorizationDecision::Denied => return self.reject(req, AuthError::Forbidden),
        }

        if let Some(user) = user {
            req.extensions_mut().insert(user);
        }

        let handlers = self.handlers.clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let error = res
                .response()
                .error()
                .and_then(|e| e.as_error::<AuthError>())
                .copied();

            match error {
                Some(error) => {
                    let resp = handlers.respond(res.request(), error)?;
                    Ok(res.into_response(resp.map_into_right_body()))
                }
                None => Ok(res.map_into_left_body()),
            }
        })
    }
}
