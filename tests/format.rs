// ABOUTME: Tests for the leveled identity rendering.
// ABOUTME: Level 0 never shows connection data; higher levels show only what is set.

use chrono::{TimeZone, Utc};
use corral::identity::{ContainerIdentity, render};

fn identity() -> ContainerIdentity {
    ContainerIdentity {
        uuid: "3f0c8a4e-0000-4000-8000-000000000001".to_string(),
        hostname: "web1".to_string(),
        parent_hostname: "hv-07".to_string(),
        mac_address: "00:16:3e:aa:bb:01".to_string(),
        ip_addresses: vec!["10.0.3.15".to_string(), "192.168.50.4".to_string()],
        connection_url: "amqp://broker.internal".to_string(),
        connection_port: "5672".to_string(),
        connection_options: String::new(),
        resolved_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
    }
}

#[test]
fn level_zero_is_a_single_identity_line() {
    let text = render(&identity(), 0);

    assert_eq!(
        text,
        "uuid=3f0c8a4e-0000-4000-8000-000000000001 hostname=web1 parent=hv-07 \
         mac=00:16:3e:aa:bb:01 ip=10.0.3.15,192.168.50.4"
    );
    assert!(!text.contains("amqp"));
    assert!(!text.contains("5672"));
}

#[test]
fn level_one_adds_only_set_connection_parameters() {
    let text = render(&identity(), 1);

    assert!(text.contains("\nconnection.url=amqp://broker.internal"));
    assert!(text.contains("\nconnection.port=5672"));
    assert!(!text.contains("connection.options"));
    assert!(!text.contains("resolved_at"));
}

#[test]
fn level_one_without_connection_equals_level_zero() {
    let mut id = identity();
    id.connection_url.clear();
    id.connection_port.clear();

    assert_eq!(render(&id, 1), render(&id, 0));
}

#[test]
fn level_two_adds_resolution_time() {
    let text = render(&identity(), 2);
    assert!(text.ends_with("\nresolved_at=2026-03-01T12:00:00+00:00"));
}

#[test]
fn unresolved_fields_render_as_dash() {
    let text = render(&ContainerIdentity::default(), 2);
    assert_eq!(text, "uuid=- hostname=- parent=- mac=- ip=-");
}

#[test]
fn display_matches_level_zero() {
    let id = identity();
    assert_eq!(id.to_string(), render(&id, 0));
}

#[test]
fn json_serialisation_names_every_field() {
    let json = serde_json::to_value(identity()).unwrap();
    assert_eq!(json["hostname"], "web1");
    assert_eq!(json["ip_addresses"][1], "192.168.50.4");
    assert_eq!(json["connection_options"], "");

    let unresolved = serde_json::to_value(ContainerIdentity::default()).unwrap();
    assert!(unresolved.get("resolved_at").is_none());
}
