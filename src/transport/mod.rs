//! Transport layer: the connector's XML wire format (encoding/extraction).

mod quota;
mod send_sms;
mod server_time;
mod xml;

pub use quota::{decode_quota_response, encode_quota_request};
pub use send_sms::{decode_send_status, encode_send_sms_request};
pub use server_time::{decode_server_time_response, encode_server_time_request};
