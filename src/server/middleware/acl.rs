//! Access-control middleware
//!
//! Runs the guard before the handler and projects successful JSON
//! responses onto the attributes the caller's roles grant afterwards.

use crate::auth::{AuthorizedCall, GuardOutcome};
use crate::server::AppState;
use crate::server::middleware::helpers::{credential_header, is_json, operation_id};
use crate::server::middleware::request_id::REQUEST_ID_HEADER;
use crate::utils::error::HubError;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};

/// ACL middleware for Actix-web
pub struct AclMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AclMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AclMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AclMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for ACL middleware
pub struct AclMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AclMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                warn!("Application state missing, refusing request");
                return Ok(req.error_response(HubError::internal("Application state missing")));
            };

            let operation = operation_id(&req);
            let guard = state.auth.guard();
            let header = credential_header(req.headers(), guard.token_header()).map(str::to_string);

            let call = match guard.authorize(&operation, header.as_deref()).await {
                Ok(GuardOutcome::Unrestricted) => None,
                Ok(GuardOutcome::Authorized(call)) => Some(call),
                Err(e) => {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string);
                    let response = e.response_with_request_id(request_id);
                    return Ok(req.into_response(response));
                }
            };

            let Some(call) = call else {
                return Ok(service.call(req).await?.map_into_boxed_body());
            };

            req.extensions_mut().insert(call.user.clone());
            req.extensions_mut().insert(call.clone());

            let res = service.call(req).await?;
            if !call.filter_response || !res.status().is_success() || !is_json(res.headers()) {
                return Ok(res.map_into_boxed_body());
            }

            let attributes = guard.response_attributes(&call);
            filter_response(res, &call, &attributes).await
        })
    }
}

/// Replace a JSON response body with its projection onto `attributes`
async fn filter_response<B>(
    res: ServiceResponse<B>,
    call: &AuthorizedCall,
    attributes: &[String],
) -> Result<ServiceResponse<BoxBody>, actix_web::Error>
where
    B: MessageBody + 'static,
{
    let (req, res) = res.into_parts();
    let (res, body) = res.into_parts();

    let bytes = match actix_web::body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!("Could not read response body of {}", call.operation);
            return Ok(ServiceResponse::new(
                req,
                HubError::internal("Unreadable response body").error_response(),
            ));
        }
    };

    let filtered = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) => {
            debug!("Filtering response of {} by {:?}", call.operation, attributes);
            serde_json::to_vec(&crate::auth::rbac::filter::filter(&value, attributes))
                .map_err(HubError::from)?
        }
        Err(_) => bytes.to_vec(),
    };

    let res = res.set_body(BoxBody::new(filtered));
    Ok(ServiceResponse::new(req, res))
}
