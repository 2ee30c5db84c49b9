//! End-to-end tests against a running server

mod common;

use common::GrimoireTest;
use serde_json::json;

#[tokio::test]
async fn test_server_starts_and_stops() {
    let grimoire = GrimoireTest::start().await.expect("Failed to start server");
    // Server shuts down automatically when dropped
    drop(grimoire);
}

#[tokio::test]
async fn test_health_endpoint() {
    let grimoire = GrimoireTest::start().await.expect("Failed to start server");

    let resp = grimoire.get("/health").await.expect("Failed to get health");
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog"]["characters"], 12);
    assert_eq!(body["catalog"]["monsters"], 8);
    assert_eq!(body["catalog"]["items"], 12);
}

#[tokio::test]
async fn test_root_endpoint() {
    let grimoire = GrimoireTest::start().await.expect("Failed to start server");

    let resp = grimoire.get("/").await.expect("Failed to get root");
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["name"], "grimoire");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_parallel_servers() {
    let first = GrimoireTest::start().await.expect("Failed to start server 1");
    let second = GrimoireTest::start().await.expect("Failed to start server 2");

    assert_ne!(first.addr, second.addr);

    let resp1 = first.get("/health").await.expect("Failed to get health 1");
    let resp2 = second.get("/health").await.expect("Failed to get health 2");

    assert_eq!(resp1.status(), 200);
    assert_eq!(resp2.status(), 200);
}

#[tokio::test]
async fn test_full_combat_over_http() {
    // d20 = 20, then four damage dice for the doubled 2d6
    let grimoire = GrimoireTest::start_scripted(vec![20, 3, 4, 5, 6])
        .await
        .expect("Failed to start server");

    let resp = grimoire
        .post(
            "/api/v1/combat/combat",
            &json!({
                "attack_bonus": 5,
                "armor_class": 25,
                "damage_dice": "2d6+3",
                "damage_type": "slashing"
            }),
        )
        .await
        .expect("Failed to post combat");
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["attack"]["hit"], true);
    assert_eq!(body["attack"]["critical_hit"], true);
    assert_eq!(body["damage"]["rolls"], json!([3, 4, 5, 6]));
    assert_eq!(body["damage"]["total"], 21);
}

#[tokio::test]
async fn test_random_endpoints_with_real_dice() {
    let grimoire = GrimoireTest::start().await.expect("Failed to start server");

    let resp = grimoire
        .post(
            "/api/v1/combat/damage-roll",
            &json!({"damage_dice": "3d6+2", "damage_type": "fire"}),
        )
        .await
        .expect("Failed to post damage");
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    let total = body["total"].as_i64().unwrap();
    assert!((5..=20).contains(&total));

    let resp = grimoire
        .get("/api/v1/monsters/random?min_cr=1&max_cr=3")
        .await
        .expect("Failed to get random monster");
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    let cr = body["challenge_rating"].as_f64().unwrap();
    assert!((1.0..=3.0).contains(&cr));
}

#[tokio::test]
async fn test_cors_preflight() {
    let grimoire = GrimoireTest::start().await.expect("Failed to start server");

    let resp = grimoire
        .client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/v1/combat/attack-roll", grimoire.base_url()),
        )
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to send preflight");

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}
