// End-to-end tests for `Provisioner` against a mocked vCenter endpoint.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vnscale_core::{ConnectConfig, CoreError, ProvisionConfig, Provisioner, TlsVerification};

// ── Helpers ─────────────────────────────────────────────────────────

fn connect_config(server: &MockServer) -> ConnectConfig {
    ConnectConfig {
        url: server.uri().parse().unwrap(),
        username: "administrator@vsphere.local".into(),
        password: SecretString::from("hunter2"),
        tls: TlsVerification::SystemDefaults,
        timeout: Duration::from_secs(5),
    }
}

fn provision_config(count: u32) -> ProvisionConfig {
    ProvisionConfig {
        datacenter: "scale-dc".into(),
        switch: "guest-dvs".into(),
        name_prefix: "testvn1".into(),
        cidr: "2.0.0.0/8".parse().unwrap(),
        subnet_prefix_len: 27,
        count,
        max_ports: None,
        poll_interval: Duration::from_millis(5),
        task_timeout: Duration::from_secs(2),
    }
}

async fn mock_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!("sess-token")))
        .mount(server)
        .await;
}

async fn mock_inventory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/vcenter/datacenter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "datacenter": "datacenter-3", "name": "scale-dc" },
            { "datacenter": "datacenter-9", "name": "other-dc" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/distributed-switch"))
        .and(query_param("datacenters", "datacenter-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "switch": "dvs-21", "name": "guest-dvs" }
        ])))
        .mount(server)
        .await;
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_provisions_portgroups_and_pools() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/distributed-switch/dvs-21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "guest-dvs",
            "config_version": "7",
            "max_ports": 8192,
            "pvlan_config": [
                { "primary_vlan_id": 100, "secondary_vlan_id": 100, "pvlan_type": "PROMISCUOUS" },
                { "primary_vlan_id": 100, "secondary_vlan_id": 101, "pvlan_type": "ISOLATED" },
                { "primary_vlan_id": 100, "secondary_vlan_id": 103, "pvlan_type": "ISOLATED" },
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/vcenter/distributed-switch/dvs-21/portgroups"))
        .and(query_param("vmw-task", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("task-pg")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cis/tasks/task-pg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCEEDED" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/network"))
        .and(query_param("datacenters", "datacenter-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "network": "dvportgroup-1", "name": "testvn1-1" },
            { "network": "dvportgroup-2", "name": "testvn1-2" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/vcenter/datacenter/datacenter-3/ip-pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(17)))
        .mount(&server)
        .await;

    let provisioner = Provisioner::connect(&connect_config(&server), provision_config(2))
        .await
        .unwrap();
    let created = provisioner.create().await.unwrap();

    assert_eq!(created.len(), 2);

    // First network: highest-index isolated pair, first subnet.
    assert_eq!(created[0].name, "testvn1-1");
    assert_eq!(created[0].portgroup, "dvportgroup-1");
    assert_eq!(created[0].vlan.secondary, 103);
    assert_eq!(created[0].subnet.to_string(), "2.0.0.0/27");
    assert_eq!(created[0].pool_id, 17);

    assert_eq!(created[1].name, "testvn1-2");
    assert_eq!(created[1].vlan.secondary, 101);
    assert_eq!(created[1].subnet.to_string(), "2.0.0.32/27");
}

#[tokio::test]
async fn create_fails_up_front_when_vlans_are_short() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_inventory(&server).await;

    // One isolated pair only; nothing else should be touched.
    Mock::given(method("GET"))
        .and(path("/api/vcenter/distributed-switch/dvs-21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "guest-dvs",
            "config_version": "7",
            "max_ports": 8192,
            "pvlan_config": [
                { "primary_vlan_id": 100, "secondary_vlan_id": 101, "pvlan_type": "ISOLATED" },
            ]
        })))
        .mount(&server)
        .await;

    let provisioner = Provisioner::connect(&connect_config(&server), provision_config(3))
        .await
        .unwrap();
    let err = provisioner.create().await.unwrap_err();

    match err {
        CoreError::VlanPoolExhausted { needed, available } => {
            assert_eq!(needed, 3);
            assert_eq!(available, 1);
        }
        other => panic!("expected VlanPoolExhausted, got: {other:?}"),
    }
}

#[tokio::test]
async fn create_raises_switch_port_cap_when_below_target() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/distributed-switch/dvs-21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "guest-dvs",
            "config_version": "7",
            "max_ports": 4096,
            "pvlan_config": [
                { "primary_vlan_id": 100, "secondary_vlan_id": 101, "pvlan_type": "ISOLATED" },
            ]
        })))
        .mount(&server)
        .await;

    let reconfig = Mock::given(method("PATCH"))
        .and(path("/api/vcenter/distributed-switch/dvs-21"))
        .and(query_param("vmw-task", "true"))
        .and(body_partial_json(json!({ "config_version": "7", "max_ports": 60000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("task-reconfig")))
        .expect(1);
    reconfig.mount(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/cis/tasks/task-reconfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCEEDED" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/vcenter/distributed-switch/dvs-21/portgroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("task-pg")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cis/tasks/task-pg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCEEDED" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vcenter/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "network": "dvportgroup-1", "name": "testvn1-1" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/vcenter/datacenter/datacenter-3/ip-pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(5)))
        .mount(&server)
        .await;

    let mut config = provision_config(1);
    config.max_ports = Some(60_000);

    let provisioner = Provisioner::connect(&connect_config(&server), config)
        .await
        .unwrap();
    let created = provisioner.create().await.unwrap();
    assert_eq!(created.len(), 1);

    // The .expect(1) on the PATCH mock verifies the reconfigure ran once.
}

#[tokio::test]
async fn hung_task_surfaces_as_a_timeout() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/distributed-switch/dvs-21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "guest-dvs",
            "config_version": "7",
            "max_ports": 8192,
            "pvlan_config": [
                { "primary_vlan_id": 100, "secondary_vlan_id": 101, "pvlan_type": "ISOLATED" },
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/vcenter/distributed-switch/dvs-21/portgroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("task-pg")))
        .mount(&server)
        .await;

    // The task never leaves RUNNING.
    Mock::given(method("GET"))
        .and(path("/api/cis/tasks/task-pg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "RUNNING" })))
        .mount(&server)
        .await;

    let mut config = provision_config(1);
    config.task_timeout = Duration::from_millis(20);

    let provisioner = Provisioner::connect(&connect_config(&server), config)
        .await
        .unwrap();
    let err = provisioner.create().await.unwrap_err();

    match err {
        CoreError::Timeout { ref message } => assert!(message.contains("task-pg")),
        other => panic!("expected Timeout, got: {other:?}"),
    }
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_destroys_only_matching_objects() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/datacenter/datacenter-3/ip-pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 17, "name": "ip-pool-for-testvn1-1" },
            { "id": 18, "name": "prod-pool" },
        ])))
        .mount(&server)
        .await;

    let destroy_pool = Mock::given(method("DELETE"))
        .and(path("/api/vcenter/datacenter/datacenter-3/ip-pools/17"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1);
    destroy_pool.mount(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/network"))
        .and(query_param("datacenters", "datacenter-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "network": "dvportgroup-1", "name": "testvn1-1" },
            { "network": "dvportgroup-9", "name": "mgmt-pg" },
        ])))
        .mount(&server)
        .await;

    let destroy_pg = Mock::given(method("DELETE"))
        .and(path("/api/vcenter/network/dvportgroup-1"))
        .and(query_param("vmw-task", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("task-del")))
        .expect(1);
    destroy_pg.mount(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/cis/tasks/task-del"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCEEDED" })))
        .mount(&server)
        .await;

    let provisioner = Provisioner::connect(&connect_config(&server), provision_config(1))
        .await
        .unwrap();
    let report = provisioner.delete().await.unwrap();

    assert_eq!(report.pools_destroyed, 1);
    assert_eq!(report.pools_skipped, 1);
    assert_eq!(report.portgroups_destroyed, 1);
    assert_eq!(report.portgroups_skipped, 1);
}

// ── Scan ────────────────────────────────────────────────────────────

#[tokio::test]
async fn scan_reports_without_destroying() {
    let server = MockServer::start().await;
    mock_login(&server).await;
    mock_inventory(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "network": "dvportgroup-1", "name": "testvn1-1" },
            { "network": "dvportgroup-9", "name": "mgmt-pg" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/datacenter/datacenter-3/ip-pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 17, "name": "ip-pool-for-testvn1-1",
              "ipv4_config": { "subnet_address": "2.0.0.0",
                               "netmask": "255.255.255.224",
                               "gateway": "2.0.0.1" } },
            { "id": 18, "name": "prod-pool" },
        ])))
        .mount(&server)
        .await;

    let provisioner = Provisioner::connect(&connect_config(&server), provision_config(1))
        .await
        .unwrap();
    let report = provisioner.scan().await.unwrap();

    assert_eq!(report.portgroups.len(), 1);
    assert_eq!(report.portgroups[0].name, "testvn1-1");
    assert_eq!(report.pools.len(), 1);
    assert_eq!(report.pools[0].subnet.as_deref(), Some("2.0.0.0/255.255.255.224"));
}

// ── Inventory resolution ────────────────────────────────────────────

#[tokio::test]
async fn missing_datacenter_is_reported_by_name() {
    let server = MockServer::start().await;
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/vcenter/datacenter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "datacenter": "datacenter-9", "name": "other-dc" },
        ])))
        .mount(&server)
        .await;

    let provisioner = Provisioner::connect(&connect_config(&server), provision_config(1))
        .await
        .unwrap();
    let err = provisioner.create().await.unwrap_err();

    assert!(
        matches!(err, CoreError::DatacenterNotFound { ref name } if name == "scale-dc"),
        "got: {err:?}"
    );
}
