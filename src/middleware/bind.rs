use axum::{
    async_trait,
    body::HttpBody,
    extract::{FromRequest, FromRequestParts, Query},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    BoxError, Form, Json,
};
use serde::de::DeserializeOwned;

///
/// Binds a request model from whichever source the client used. A
/// request without a body is bound from the query string, so a bare
/// request yields a model with every field unset. A JSON or
/// form-encoded body is bound from the body. Anything that fails to
/// bind is rejected instead of being replaced by defaults.
///
#[derive(Debug)]
pub struct Bind<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for Bind<T>
where
    T: DeserializeOwned + Send,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        if body.size_hint().exact() == Some(0) {
            let Query(model) = Query::<T>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            return Ok(Bind(model));
        }

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_default();
        let req = Request::from_parts(parts, body);

        if content_type.starts_with("application/json") {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(model)| Bind(model))
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(model)| Bind(model))
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
        } else {
            Err((StatusCode::UNSUPPORTED_MEDIA_TYPE, format!("Cannot bind a `{content_type}` body")))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Model {
        trials: Option<i64>,
    }

    async fn bind(uri: &str, content_type: Option<&str>, body: &'static str) -> Result<Model, StatusCode> {
        let mut req = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            req = req.header(CONTENT_TYPE, content_type);
        }
        let req = req.body(Body::from(body)).unwrap();
        Bind::<Model>::from_request(req, &()).await.map(|Bind(m)| m).map_err(|(status, _)| status)
    }

    #[tokio::test]
    async fn test_empty_body_binds_unset_model() {
        assert_eq!(bind("/", None, "").await, Ok(Model { trials: None }));
    }

    #[tokio::test]
    async fn test_empty_body_binds_query() {
        assert_eq!(bind("/?trials=5", None, "").await, Ok(Model { trials: Some(5) }));
        assert_eq!(bind("/?trials=five", None, "").await, Err(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_json_body_binds() {
        assert_eq!(bind("/", Some("application/json"), r#"{"trials": 5}"#).await, Ok(Model { trials: Some(5) }));
    }

    #[tokio::test]
    async fn test_mistyped_json_is_rejected() {
        assert_eq!(bind("/", Some("application/json"), r#"{"trials": "5"}"#).await, Err(StatusCode::BAD_REQUEST));
        assert_eq!(bind("/", Some("application/json"), "{ nope").await, Err(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_form_body_binds() {
        assert_eq!(
            bind("/", Some("application/x-www-form-urlencoded"), "trials=5").await,
            Ok(Model { trials: Some(5) })
        );
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_rejected() {
        assert_eq!(bind("/", Some("text/plain"), "trials=5").await, Err(StatusCode::UNSUPPORTED_MEDIA_TYPE));
        assert_eq!(bind("/", None, "trials=5").await, Err(StatusCode::UNSUPPORTED_MEDIA_TYPE));
    }
}
