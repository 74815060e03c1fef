use gloo_net::http::Request;
use serde_json::Value;

use crate::lead::error::LeadError;
use crate::lead::payload::LeadPayload;

/// Shown as the lead id when the endpoint accepted the lead without
/// returning one.
pub const PLACEHOLDER_LEAD_ID: &str = "Generated";

/// Plain text keeps the POST a "simple" CORS request, so no preflight.
pub const LEAD_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

const MAX_RAW_MESSAGE_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A response body that either parsed as a JSON object or did not.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Structured(Value),
    Raw(String),
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl ResponseBody {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => ResponseBody::Structured(value),
            _ => ResponseBody::Raw(text.to_string()),
        }
    }

    /// `leadId`, falling back to `id`. Backends in the wild use both.
    pub fn lead_id(&self) -> Option<String> {
        match self {
            ResponseBody::Structured(value) => string_field(value, &["leadId", "id"]),
            ResponseBody::Raw(_) => None,
        }
    }

    /// `message`, falling back to `error`; raw text is used as-is.
    pub fn message(&self) -> Option<String> {
        match self {
            ResponseBody::Structured(value) => string_field(value, &["message", "error"]),
            ResponseBody::Raw(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.chars().take(MAX_RAW_MESSAGE_LEN).collect())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeadAccepted {
    pub lead_id: String,
}

pub fn interpret_response(response: RawResponse) -> Result<LeadAccepted, LeadError> {
    let body = ResponseBody::parse(&response.body);
    if !response.is_success() {
        let message = body
            .message()
            .unwrap_or_else(|| format!("Request failed ({}).", response.status));
        return Err(LeadError::RemoteRejection {
            status: response.status,
            message,
        });
    }
    Ok(LeadAccepted {
        lead_id: body.lead_id().unwrap_or_else(|| PLACEHOLDER_LEAD_ID.to_string()),
    })
}

/// One POST of a text body, returning status and full body text. `Err` is a
/// transport failure; any HTTP status is `Ok`.
#[allow(async_fn_in_trait)]
pub trait LeadTransport {
    async fn post_text(&self, url: &str, content_type: &str, body: String) -> Result<RawResponse, String>;
}

pub struct BrowserTransport;

impl LeadTransport for BrowserTransport {
    async fn post_text(&self, url: &str, content_type: &str, body: String) -> Result<RawResponse, String> {
        let response = Request::post(url)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }
}

/// Sends exactly one request for `payload`. No retries.
pub async fn send_lead<T: LeadTransport>(
    transport: &T,
    endpoint: &str,
    payload: &LeadPayload,
) -> Result<LeadAccepted, LeadError> {
    let body = payload.to_body()?;
    let response = transport
        .post_text(endpoint, LEAD_CONTENT_TYPE, body)
        .await
        .map_err(|e| {
            log::error!("Lead request failed in transport: {}", e);
            LeadError::Network(e)
        })?;
    if !response.is_success() {
        log::warn!("Lead endpoint rejected submission with status {}", response.status);
    }
    interpret_response(response)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Replays a canned response and records what was sent.
    pub(crate) struct FakeTransport {
        pub reply: Result<RawResponse, String>,
        pub calls: Cell<usize>,
        pub last_request: RefCell<Option<(String, String, String)>>,
    }

    impl FakeTransport {
        pub fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Self {
                reply: Err(reason.to_string()),
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    impl LeadTransport for FakeTransport {
        async fn post_text(&self, url: &str, content_type: &str, body: String) -> Result<RawResponse, String> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some((url.to_string(), content_type.to_string(), body));
            self.reply.clone()
        }
    }

    fn respond(status: u16, body: &str) -> Result<LeadAccepted, LeadError> {
        interpret_response(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn parse_keeps_non_objects_raw() {
        assert!(matches!(ResponseBody::parse(r#"{"ok":true}"#), ResponseBody::Structured(_)));
        assert_eq!(ResponseBody::parse("OK"), ResponseBody::Raw("OK".into()));
        assert_eq!(ResponseBody::parse("[1,2]"), ResponseBody::Raw("[1,2]".into()));
    }

    #[test]
    fn success_reads_lead_id_then_id() {
        assert_eq!(respond(200, r#"{"leadId":"L123"}"#).unwrap().lead_id, "L123");
        assert_eq!(respond(201, r#"{"id":"R9"}"#).unwrap().lead_id, "R9");
        assert_eq!(respond(200, r#"{"id":42}"#).unwrap().lead_id, "42");
        assert_eq!(respond(200, r#"{"leadId":"A","id":"B"}"#).unwrap().lead_id, "A");
    }

    #[test]
    fn success_without_id_uses_placeholder() {
        assert_eq!(respond(200, "").unwrap().lead_id, PLACEHOLDER_LEAD_ID);
        assert_eq!(respond(200, "saved").unwrap().lead_id, PLACEHOLDER_LEAD_ID);
        assert_eq!(respond(204, r#"{"leadId":""}"#).unwrap().lead_id, PLACEHOLDER_LEAD_ID);
    }

    #[test]
    fn rejection_reads_message_then_error() {
        match respond(500, r#"{"message":"server busy"}"#) {
            Err(LeadError::RemoteRejection { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "server busy");
            }
            other => panic!("unexpected {:?}", other),
        }
        let err = respond(422, r#"{"error":"phone invalid"}"#).unwrap_err();
        assert_eq!(err.to_string(), "phone invalid");
    }

    #[test]
    fn rejection_falls_back_to_raw_text_then_status() {
        assert_eq!(respond(502, "Bad Gateway").unwrap_err().to_string(), "Bad Gateway");
        assert_eq!(respond(503, "  ").unwrap_err().to_string(), "Request failed (503).");
        assert_eq!(respond(400, "{}").unwrap_err().to_string(), "Request failed (400).");
    }

    #[test]
    fn send_posts_plain_text_once() {
        let transport = FakeTransport::replying(200, r#"{"leadId":"L1"}"#);
        let payload = crate::lead::payload::LeadPayload::build(
            &crate::lead::payload::tests::valid_draft(),
            &crate::lead::payload::tests::context(None),
        )
        .unwrap();
        let accepted =
            futures::executor::block_on(send_lead(&transport, "https://leads.example/exec", &payload)).unwrap();
        assert_eq!(accepted.lead_id, "L1");
        assert_eq!(transport.calls.get(), 1);
        let (url, content_type, body) = transport.last_request.borrow().clone().unwrap();
        assert_eq!(url, "https://leads.example/exec");
        assert_eq!(content_type, LEAD_CONTENT_TYPE);
        assert!(body.contains(r#""phone":"9876543210""#));
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let transport = FakeTransport::failing("TypeError: Failed to fetch");
        let payload = crate::lead::payload::LeadPayload::build(
            &crate::lead::payload::tests::valid_draft(),
            &crate::lead::payload::tests::context(None),
        )
        .unwrap();
        let err = futures::executor::block_on(send_lead(&transport, "https://leads.example/exec", &payload))
            .unwrap_err();
        assert!(matches!(err, LeadError::Network(_)));
        assert_eq!(err.to_string(), "Network error. Please try again.");
    }
}
