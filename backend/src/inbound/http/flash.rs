//! One-shot status messages carried in the cookie session.
//!
//! A handler pushes a [`FlashMessage`] before redirecting; the next page
//! render takes every pending message, which removes them from the session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Error;

pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Most messages kept between renders; older ones are dropped first.
///
/// The session lives in a cookie of roughly 4 KB, so the queue must stay
/// small however many actions happen before the next page view.
pub const MAX_PENDING_FLASHES: usize = 3;

/// Presentation category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    /// The previous action succeeded.
    Success,
    /// The previous action was rejected.
    Error,
}

impl FlashCategory {
    /// CSS-friendly name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Status message shown once on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    category: FlashCategory,
    message: String,
}

impl FlashMessage {
    /// Message reporting success.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    /// Message reporting a rejected action.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }

    /// Message category.
    #[must_use]
    pub fn category(&self) -> FlashCategory {
        self.category
    }

    /// Message text, unescaped.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Session wrapper exposing flash operations to handlers.
#[derive(Clone)]
pub struct Flashes(Session);

impl Flashes {
    /// Wrap an Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue a message for the next render, keeping only the newest
    /// [`MAX_PENDING_FLASHES`] messages.
    pub fn push(&self, message: FlashMessage) -> Result<(), Error> {
        let mut pending = self.pending();
        pending.push(message);
        if pending.len() > MAX_PENDING_FLASHES {
            pending.drain(..pending.len() - MAX_PENDING_FLASHES);
        }
        self.0
            .insert(FLASHES_KEY, pending)
            .map_err(|err| Error::internal(format!("failed to store flash message: {err}")))
    }

    /// Remove and return every pending message, oldest first.
    #[must_use]
    pub fn take(&self) -> Vec<FlashMessage> {
        let pending = self.pending();
        self.0.remove(FLASHES_KEY);
        pending
    }

    fn pending(&self) -> Vec<FlashMessage> {
        match self.0.get::<Vec<FlashMessage>>(FLASHES_KEY) {
            Ok(messages) => messages.unwrap_or_default(),
            Err(err) => {
                // A tampered or stale cookie shape only loses status text.
                warn!(error = %err, "discarding unreadable flash messages");
                Vec::new()
            }
        }
    }
}

impl FromRequest for Flashes {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Flashes::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn messages_are_shown_once_in_order() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/push",
                    web::get().to(|flashes: Flashes| async move {
                        flashes.push(FlashMessage::success("first"))?;
                        flashes.push(FlashMessage::error("second"))?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|flashes: Flashes| async move {
                        let taken: Vec<String> = flashes
                            .take()
                            .iter()
                            .map(|m| format!("{}:{}", m.category().as_str(), m.message()))
                            .collect();
                        HttpResponse::Ok().body(taken.join(","))
                    }),
                ),
        )
        .await;

        let pushed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/push").to_request(),
        )
        .await;
        let cookie = session_cookie(&pushed);

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/take")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let cleared = session_cookie(&first);
        let body = actix_test::read_body(first).await;
        assert_eq!(body.as_ref(), b"success:first,error:second");

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/take")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        let body = actix_test::read_body(second).await;
        assert!(body.is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn queue_keeps_only_the_newest_messages() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/push",
                    web::get().to(|flashes: Flashes| async move {
                        for n in 0..MAX_PENDING_FLASHES + 2 {
                            flashes.push(FlashMessage::success(format!("m{n}")))?;
                        }
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|flashes: Flashes| async move {
                        let taken: Vec<String> = flashes
                            .take()
                            .iter()
                            .map(|m| m.message().to_owned())
                            .collect();
                        HttpResponse::Ok().body(taken.join(","))
                    }),
                ),
        )
        .await;

        let pushed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/push").to_request(),
        )
        .await;
        let cookie = session_cookie(&pushed);
        let taken = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/take")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = actix_test::read_body(taken).await;
        assert_eq!(body.as_ref(), b"m2,m3,m4");
    }

    #[rstest]
    fn categories_serialise_lowercase() {
        let value = serde_json::to_value(FlashMessage::error("nope")).expect("serialise");
        assert_eq!(value["category"], "error");
        assert_eq!(value["message"], "nope");
    }
}
