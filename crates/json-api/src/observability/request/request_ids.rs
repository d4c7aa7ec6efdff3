//! `x-request-id` propagation.

use salvo::{
    http::header::HeaderValue,
    prelude::{Request, Response},
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse a well-formed incoming id or mint a UUIDv7, and echo it back.
pub(super) fn assign(req: &Request, res: &mut Response) -> String {
    let request_id = req
        .header::<String>(REQUEST_ID_HEADER)
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    match HeaderValue::from_str(&request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "request id is not a valid header value: {source}"),
    }

    request_id
}

/// Short, printable and free of whitespace, so it is safe to log and echo.
fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(id: &str) -> Request {
        let mut req = Request::new();

        if let Ok(value) = HeaderValue::from_str(id) {
            req.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        req
    }

    #[test]
    fn incoming_id_is_echoed() {
        let mut res = Response::new();

        let id = assign(&request_with("abc-123"), &mut res);

        assert_eq!(id, "abc-123");
        assert_eq!(
            res.headers().get(REQUEST_ID_HEADER).and_then(|value| value.to_str().ok()),
            Some("abc-123")
        );
    }

    #[test]
    fn unusable_ids_are_replaced() {
        let too_long = "x".repeat(MAX_REQUEST_ID_LEN + 1);

        for incoming in ["", "has space", too_long.as_str()] {
            let id = assign(&request_with(incoming), &mut Response::new());

            assert!(Uuid::parse_str(&id).is_ok(), "{incoming:?} should be replaced");
        }
    }
}
