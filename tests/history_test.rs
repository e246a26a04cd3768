mod common;

use common::*;
use reqwest::StatusCode;
use serde_json::{Value, json};

const PIN: &str = "40585";

async fn history(client: &reqwest::Client, base_url: &str, token: &str) -> Vec<Value> {
    let res = client
        .get(format!("{}/history", base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn history_is_most_recent_first() {
    let (base_url, pool, _container) = setup_test_app().await;
    seed_admin(&pool).await;
    let client = reqwest::Client::new();
    let (admin_token, _) = login(&client, &base_url, ADMIN_EMAIL, ADMIN_PIN).await;

    let (_, sender_token) = onboard_account(
        &client, &base_url, &admin_token,
        "Rahim", "rahim@example.com", "01711111111", "customer", PIN, 1000,
    )
    .await;
    onboard_account(
        &client, &base_url, &admin_token,
        "Karim", "karim@example.com", "01722222222", "customer", PIN, 0,
    )
    .await;

    for amount in [10, 20, 30] {
        let res = client
            .post(format!("{}/transfer", base_url))
            .bearer_auth(&sender_token)
            .json(&json!({ "receiver": "01722222222", "amount": amount, "pin": PIN }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let records = history(&client, &base_url, &sender_token).await;
    let amounts: Vec<i64> = records.iter().map(|r| r["amount"].as_i64().unwrap()).collect();
    assert_eq!(amounts, vec![30, 20, 10]);
}

#[tokio::test]
async fn page_size_depends_on_role() {
    let (base_url, pool, _container) = setup_test_app().await;
    seed_admin(&pool).await;
    let client = reqwest::Client::new();
    let (admin_token, _) = login(&client, &base_url, ADMIN_EMAIL, ADMIN_PIN).await;

    // An agent sender and a customer receiver, 12 transfers between them.
    let (_, agent_token) = onboard_account(
        &client, &base_url, &admin_token,
        "Agent Babu", "babu@example.com", "01733333333", "agent", PIN, 100000,
    )
    .await;
    let (_, customer_token) = onboard_account(
        &client, &base_url, &admin_token,
        "Karim", "karim@example.com", "01722222222", "customer", PIN, 0,
    )
    .await;

    for _ in 0..12 {
        let res = client
            .post(format!("{}/transfer", base_url))
            .bearer_auth(&agent_token)
            .json(&json!({ "receiver": "01722222222", "amount": 10, "pin": PIN }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Agents page at 10, everyone else at 20.
    let agent_view = history(&client, &base_url, &agent_token).await;
    assert_eq!(agent_view.len(), 10);

    let customer_view = history(&client, &base_url, &customer_token).await;
    assert_eq!(customer_view.len(), 12);
}

#[tokio::test]
async fn history_only_shows_the_callers_transfers() {
    let (base_url, pool, _container) = setup_test_app().await;
    seed_admin(&pool).await;
    let client = reqwest::Client::new();
    let (admin_token, _) = login(&client, &base_url, ADMIN_EMAIL, ADMIN_PIN).await;

    let (_, rahim_token) = onboard_account(
        &client, &base_url, &admin_token,
        "Rahim", "rahim@example.com", "01711111111", "customer", PIN, 500,
    )
    .await;
    onboard_account(
        &client, &base_url, &admin_token,
        "Karim", "karim@example.com", "01722222222", "customer", PIN, 0,
    )
    .await;
    let (_, salma_token) = onboard_account(
        &client, &base_url, &admin_token,
        "Salma", "salma@example.com", "01755555555", "customer", PIN, 500,
    )
    .await;

    let res = client
        .post(format!("{}/transfer", base_url))
        .bearer_auth(&rahim_token)
        .json(&json!({ "receiver": "01722222222", "amount": 50, "pin": PIN }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(history(&client, &base_url, &rahim_token).await.len(), 1);
    assert!(history(&client, &base_url, &salma_token).await.is_empty());
}

#[tokio::test]
async fn unknown_transaction_id_is_not_found() {
    let (base_url, pool, _container) = setup_test_app().await;
    seed_admin(&pool).await;
    let client = reqwest::Client::new();
    let (admin_token, _) = login(&client, &base_url, ADMIN_EMAIL, ADMIN_PIN).await;

    let (_, token) = onboard_account(
        &client, &base_url, &admin_token,
        "Rahim", "rahim@example.com", "01711111111", "customer", PIN, 0,
    )
    .await;

    let res = client
        .get(format!("{}/transactions/0000000000", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
