use crate::generator::behaviors::{
    Behavior, product_create_body, product_lookup_url, stress_body, truncate_at_dot,
    user_create_body, user_lookup_url,
};
use uuid::Uuid;

#[test]
fn truncates_at_first_dot() {
    assert_eq!(truncate_at_dot("alice.smith@example.com"), "alice");
    assert_eq!(truncate_at_dot("a@x.com"), "a@x");
    assert_eq!(truncate_at_dot("nodotatall"), "nodotatall");
    assert_eq!(truncate_at_dot(""), "");
}

#[test]
fn truncation_is_idempotent() {
    for email in ["carla.novak7@example.net", "a@x.com", "plain"] {
        let once = truncate_at_dot(email);
        assert_eq!(truncate_at_dot(once), once);
    }
}

#[test]
fn stress_body_carries_fixed_ids() {
    let body = stress_body(256);
    assert_eq!(body["length"], 256);
    assert_eq!(body["requestid"], "world");
    assert_eq!(body["uuid"], "skills");
}

#[test]
fn user_create_body_has_all_fields() {
    let correlation = Uuid::now_v7();
    let body = user_create_body(500_123, &correlation, "june_okafor4", "june.okafor4@example.org", "Quiet harbor.");
    assert_eq!(body["requestid"], 500_123);
    assert_eq!(body["uuid"], correlation.to_string());
    assert_eq!(body["username"], "june_okafor4");
    assert_eq!(body["email"], "june.okafor4@example.org");
    assert_eq!(body["status_message"], "Quiet harbor.");
}

#[test]
fn user_lookup_url_orders_query_params() {
    let correlation = Uuid::now_v7();
    let url = user_lookup_url("http://h:8080", "a@x.com", 7, &correlation);
    assert_eq!(
        url,
        format!("http://h:8080/v1/user?email=a@x.com&requestid=7&uuid={correlation}")
    );
}

#[test]
fn product_create_body_repeats_index_as_id() {
    let correlation = Uuid::now_v7();
    let body = product_create_body(500_777, &correlation, "Sleek Walnut Lamp", 23_500);
    assert_eq!(body["requestid"], 500_777);
    assert_eq!(body["id"], 500_777);
    assert_eq!(body["name"], "Sleek Walnut Lamp");
    assert_eq!(body["price"], 23_500);
}

#[test]
fn product_lookup_url_uses_picked_id_as_requestid() {
    let correlation = Uuid::now_v7();
    let url = product_lookup_url("http://h", 42_000, &correlation);
    assert_eq!(
        url,
        format!("http://h/v1/product?id=42000&requestid=42000&uuid={correlation}")
    );
}

#[test]
fn behavior_weights_match_the_profile() {
    let total: u32 = Behavior::ALL.iter().map(|b| b.weight()).sum();
    assert_eq!(total, 11);
    assert_eq!(Behavior::ReadUserEmailError.weight(), 1);
    for b in [
        Behavior::Stress,
        Behavior::WriteUser,
        Behavior::ReadUser,
        Behavior::ReadProduct,
        Behavior::WriteProduct,
    ] {
        assert_eq!(b.weight(), 2);
    }
}
