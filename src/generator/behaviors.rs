use serde_json::{Value, json};
use uuid::Uuid;

/// One complete request-issuing operation, selectable by weighted random
/// choice in the simulated-user loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Stress,
    WriteUser,
    ReadUser,
    ReadUserEmailError,
    ReadProduct,
    WriteProduct,
}

impl Behavior {
    pub const ALL: [Behavior; 6] = [
        Behavior::Stress,
        Behavior::WriteUser,
        Behavior::ReadUser,
        Behavior::ReadUserEmailError,
        Behavior::ReadProduct,
        Behavior::WriteProduct,
    ];

    /// Relative selection frequency, not a percentage.
    pub fn weight(self) -> u32 {
        match self {
            Behavior::ReadUserEmailError => 1,
            _ => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Behavior::Stress => "stress",
            Behavior::WriteUser => "write_user",
            Behavior::ReadUser => "read_user",
            Behavior::ReadUserEmailError => "read_user_email_error",
            Behavior::ReadProduct => "read_product",
            Behavior::WriteProduct => "write_product",
        }
    }
}

// The stress endpoint takes fixed filler ids; only `length` matters to it.
pub const STRESS_REQUEST_ID: &str = "world";
pub const STRESS_UUID: &str = "skills";

/// Substring up to the first `.`; the whole input when it has none.
/// Deliberately malformed lookups are built from this to exercise the
/// target's error path.
pub fn truncate_at_dot(email: &str) -> &str {
    match email.find('.') {
        Some(dot) => &email[..dot],
        None => email,
    }
}

pub fn stress_body(length: usize) -> Value {
    json!({
        "length": length,
        "requestid": STRESS_REQUEST_ID,
        "uuid": STRESS_UUID,
    })
}

pub fn user_create_body(
    requestid: u64,
    correlation: &Uuid,
    username: &str,
    email: &str,
    status_message: &str,
) -> Value {
    json!({
        "requestid": requestid,
        "uuid": correlation.to_string(),
        "username": username,
        "email": email,
        "status_message": status_message,
    })
}

pub fn user_lookup_url(host: &str, email: &str, requestid: u64, correlation: &Uuid) -> String {
    format!("{host}/v1/user?email={email}&requestid={requestid}&uuid={correlation}")
}

pub fn product_create_body(requestid: u64, correlation: &Uuid, name: &str, price: u32) -> Value {
    json!({
        "requestid": requestid,
        "uuid": correlation.to_string(),
        "id": requestid,
        "name": name,
        "price": price,
    })
}

pub fn product_lookup_url(host: &str, id: u64, correlation: &Uuid) -> String {
    format!("{host}/v1/product?id={id}&requestid={id}&uuid={correlation}")
}
