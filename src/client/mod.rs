//! Client layer: orchestrates the two-step time/command flow and maps
//! transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    AuthHash, Balance, Credentials, MessageId, SendReceipt, SendSms, ServerTime, ValidationError,
};
use crate::transport;

const DEFAULT_ENDPOINT: &str =
    "http://storage.freenet.de/sync/remoteaccess/service/xml_emo_connector.php";

/// The connector reads responses into a fixed buffer; anything past this cap
/// is dropped before extraction.
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header("content-type", "text/xml")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EmoClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-200 status or transport failures),
/// - protocol-level failures (empty body, unusable server time),
/// - provider-level failures (non-OK status text),
/// - validation/parse failures.
pub enum EmoError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-200 HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },

    /// The server returned an empty response body.
    #[error("no XML from server")]
    EmptyResponse,

    /// The server-time response carried no usable timestamp, so no auth hash
    /// can be derived.
    #[error("server did not return a usable timestamp")]
    MissingServerTime,

    /// The provider rejected the command with a non-OK status text.
    #[error("provider rejected the command: {status_text}")]
    Provider { status_text: String },

    /// A response field could not be parsed as the expected type.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`EmoClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct EmoClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl EmoClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent
    /// override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the connector endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`EmoClient`].
    pub fn build(self) -> Result<EmoClient, EmoError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| EmoError::Transport(Box::new(err)))?;

        Ok(EmoClient {
            credentials: self.credentials,
            endpoint: self.endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Email Office client.
///
/// Every authenticated operation is two wire round-trips: fetch the server
/// time, derive the time-salted auth hash, then issue the actual command.
/// Calls are single-attempt; there is no retry or backoff.
pub struct EmoClient {
    credentials: Credentials,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl EmoClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`EmoClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> EmoClientBuilder {
        EmoClientBuilder::new(credentials)
    }

    #[cfg(test)]
    pub(crate) fn with_transport(
        credentials: Credentials,
        endpoint: impl Into<String>,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            credentials,
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Fetch the server timestamp used to salt authentication.
    ///
    /// Errors:
    /// - [`EmoError::MissingServerTime`] when the response carries no usable
    ///   `<SMS_time>` value; proceeding would only produce a garbage hash.
    pub async fn server_time(&self) -> Result<ServerTime, EmoError> {
        let body = self
            .post("SMS_TIME", transport::encode_server_time_request())
            .await?;
        transport::decode_server_time_response(&body).ok_or(EmoError::MissingServerTime)
    }

    /// Fetch the remaining message credits.
    ///
    /// A response without an `<SMS_quota>` tag counts as a zero balance, not
    /// an error; a non-numeric quota value maps to [`EmoError::Parse`].
    pub async fn fetch_quota(&self) -> Result<Balance, EmoError> {
        let time = self.server_time().await?;
        let auth = AuthHash::derive(&time, &self.credentials);

        let body = self
            .post(
                "SMS_QUOTA",
                transport::encode_quota_request(self.credentials.username(), &auth),
            )
            .await?;
        let quota = transport::decode_quota_response(&body).unwrap_or_else(|| "0".to_owned());
        let value = quota
            .trim()
            .parse::<u32>()
            .map_err(|err| EmoError::Parse(Box::new(err)))?;

        tracing::debug!(balance = value, "quota fetched");
        Ok(Balance::new(value))
    }

    /// Send an SMS message.
    ///
    /// Success iff the response's `<StatusText>` equals `OK` (any case); any
    /// other value, including a missing tag, maps to [`EmoError::Provider`]
    /// carrying the status text.
    pub async fn send_sms(&self, request: &SendSms) -> Result<SendReceipt, EmoError> {
        let time = self.server_time().await?;
        let auth = AuthHash::derive(&time, &self.credentials);
        let message_id = request
            .options()
            .message_id
            .unwrap_or_else(MessageId::random);

        let body = self
            .post(
                "SMS",
                transport::encode_send_sms_request(
                    self.credentials.username(),
                    &auth,
                    message_id,
                    request,
                ),
            )
            .await?;

        let status_text =
            transport::decode_send_status(&body).unwrap_or_else(|| "Unknown".to_owned());
        if !status_text.eq_ignore_ascii_case("OK") {
            tracing::error!(%status_text, %message_id, "provider rejected send");
            return Err(EmoError::Provider { status_text });
        }

        tracing::debug!(%message_id, units = request.units(), "message accepted");
        Ok(SendReceipt {
            message_id,
            units: request.units(),
        })
    }

    async fn post(&self, command: &'static str, body: String) -> Result<String, EmoError> {
        tracing::debug!(command, bytes = body.len(), "posting XML command");
        let response = self
            .http
            .post_xml(&self.endpoint, body)
            .await
            .map_err(EmoError::Transport)?;

        if response.status != 200 {
            tracing::warn!(command, status = response.status, "non-200 response");
            return Err(EmoError::HttpStatus {
                status: response.status,
            });
        }

        let mut body = response.body;
        if body.len() > MAX_RESPONSE_BYTES {
            let mut cut = MAX_RESPONSE_BYTES;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        if body.trim().is_empty() {
            return Err(EmoError::EmptyResponse);
        }
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeTransport, TIME_RESPONSE, make_client};
    use super::*;
    use crate::domain::{MessageText, Recipient, SendOptions};

    fn credentials() -> Credentials {
        Credentials::new("alice", "secret").unwrap()
    }

    fn send_request() -> SendSms {
        SendSms::new(
            vec![Recipient::new("+491701234567").unwrap()],
            MessageText::new("hello").unwrap(),
            SendOptions {
                message_id: Some(MessageId::new(17).unwrap()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn server_time_posts_fixed_command_and_parses_token() {
        let transport = FakeTransport::new([(200, TIME_RESPONSE.to_owned())]);
        let client = make_client(credentials(), transport.clone());

        let time = client.server_time().await.unwrap();
        assert_eq!(time.as_str(), "1283337953");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://example.invalid/emo.php");
        assert_eq!(
            requests[0].1,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><SMS_TIME>GetServerTime</SMS_TIME>"
        );
    }

    #[tokio::test]
    async fn server_time_without_token_is_an_error() {
        let transport = FakeTransport::new([(200, "<SMS_TIME></SMS_TIME>".to_owned())]);
        let client = make_client(credentials(), transport);

        let err = client.server_time().await.unwrap_err();
        assert!(matches!(err, EmoError::MissingServerTime));
    }

    #[tokio::test]
    async fn fetch_quota_issues_authenticated_command() {
        let quota = "<SMS_QUOTA><SMS_quota>120</SMS_quota>\
                     <SMS_maxlength>160</SMS_maxlength></SMS_QUOTA>";
        let transport =
            FakeTransport::new([(200, TIME_RESPONSE.to_owned()), (200, quota.to_owned())]);
        let client = make_client(credentials(), transport.clone());

        let balance = client.fetch_quota().await.unwrap();
        assert_eq!(balance, Balance::new(120));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        // Auth hash for time=1283337953, user=alice, password=secret.
        assert_eq!(
            requests[1].1,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><SMS_QUOTA>\
             <Login><UserName>alice</UserName>\
             <AuthHash>1283337953ab75bd5a28262551f1895a76b7cee8ae</AuthHash></Login>\
             </SMS_QUOTA>"
        );
    }

    #[tokio::test]
    async fn fetch_quota_defaults_to_zero_when_tag_is_absent() {
        let transport = FakeTransport::new([
            (200, TIME_RESPONSE.to_owned()),
            (200, "<SMS_QUOTA></SMS_QUOTA>".to_owned()),
        ]);
        let client = make_client(credentials(), transport);

        let balance = client.fetch_quota().await.unwrap();
        assert_eq!(balance, Balance::new(0));
    }

    #[tokio::test]
    async fn fetch_quota_maps_non_numeric_value_to_parse_error() {
        let transport = FakeTransport::new([
            (200, TIME_RESPONSE.to_owned()),
            (200, "<SMS_QUOTA><SMS_quota>lots</SMS_quota></SMS_QUOTA>".to_owned()),
        ]);
        let client = make_client(credentials(), transport);

        let err = client.fetch_quota().await.unwrap_err();
        assert!(matches!(err, EmoError::Parse(_)));
    }

    #[tokio::test]
    async fn send_sms_accepts_ok_status_in_any_case() {
        let transport = FakeTransport::new([
            (200, TIME_RESPONSE.to_owned()),
            (200, "<SMS><StatusText>ok</StatusText></SMS>".to_owned()),
        ]);
        let client = make_client(credentials(), transport.clone());

        let receipt = client.send_sms(&send_request()).await.unwrap();
        assert_eq!(receipt.message_id, MessageId::new(17).unwrap());
        assert_eq!(receipt.units, 1);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].1.contains("<SMS_ID>17</SMS_ID>"));
        assert!(
            requests[1]
                .1
                .contains("<AuthHash>1283337953ab75bd5a28262551f1895a76b7cee8ae</AuthHash>")
        );
        assert!(
            requests[1]
                .1
                .contains("<Recipient><Id>0</Id><Phone>+491701234567</Phone></Recipient>")
        );
    }

    #[tokio::test]
    async fn send_sms_maps_non_ok_status_to_provider_error() {
        let transport = FakeTransport::new([
            (200, TIME_RESPONSE.to_owned()),
            (200, "<SMS><StatusText>Error</StatusText></SMS>".to_owned()),
        ]);
        let client = make_client(credentials(), transport);

        let err = client.send_sms(&send_request()).await.unwrap_err();
        match err {
            EmoError::Provider { status_text } => assert_eq!(status_text, "Error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_sms_without_status_text_reports_unknown() {
        let transport = FakeTransport::new([
            (200, TIME_RESPONSE.to_owned()),
            (200, "<SMS></SMS>".to_owned()),
        ]);
        let client = make_client(credentials(), transport);

        let err = client.send_sms(&send_request()).await.unwrap_err();
        match err {
            EmoError::Provider { status_text } => assert_eq!(status_text, "Unknown"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_200_status_maps_to_http_error() {
        let transport = FakeTransport::new([(500, "oops".to_owned())]);
        let client = make_client(credentials(), transport);

        let err = client.fetch_quota().await.unwrap_err();
        assert!(matches!(err, EmoError::HttpStatus { status: 500 }));
    }

    #[tokio::test]
    async fn empty_body_maps_to_empty_response_error() {
        let transport = FakeTransport::new([(200, "   ".to_owned())]);
        let client = make_client(credentials(), transport);

        let err = client.server_time().await.unwrap_err();
        assert!(matches!(err, EmoError::EmptyResponse));
    }

    #[tokio::test]
    async fn oversized_body_is_truncated_before_extraction() {
        // The quota tag only appears past the 64 KiB cap, so it must be
        // dropped with the truncated tail.
        let oversized = format!(
            "<SMS_QUOTA>{}<SMS_quota>42</SMS_quota></SMS_QUOTA>",
            " ".repeat(70 * 1024)
        );
        let transport =
            FakeTransport::new([(200, TIME_RESPONSE.to_owned()), (200, oversized)]);
        let client = make_client(credentials(), transport);

        let balance = client.fetch_quota().await.unwrap();
        assert_eq!(balance, Balance::new(0));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_transport_error() {
        // An exhausted script queue doubles as a transport-level failure.
        let transport = FakeTransport::new([]);
        let client = make_client(credentials(), transport);

        let err = client.server_time().await.unwrap_err();
        assert!(matches!(err, EmoError::Transport(_)));
    }

    #[test]
    fn builder_endpoint_override_is_applied() {
        let client = EmoClient::builder(credentials())
            .endpoint("http://example.invalid/other.php")
            .build()
            .unwrap();
        assert_eq!(client.endpoint, "http://example.invalid/other.php");
    }
}
