//! End-to-end tests against a served catalog over real sockets.

use catalog_sdk::{CatalogClient, Product};
use product_catalog::config::CatalogConfig;
use reqwest::{header, Method, StatusCode};

mod common;

fn cappuccino() -> Product {
    Product {
        id: 3,
        name: "Cappuccino".into(),
        description: "Espresso with steamed milk foam".into(),
        price: 11.99,
        sku: "cap001".into(),
    }
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn initial_catalog_is_espresso_then_latte() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    let products = client.list_products().await.unwrap();
    assert_eq!(
        products,
        vec![
            Product {
                id: 1,
                name: "Espresso".into(),
                description: "Bitter Coffee".into(),
                price: 9.99,
                sku: "esp001".into(),
            },
            Product {
                id: 2,
                name: "Latte".into(),
                description: "Frothy Coffee".into(),
                price: 12.99,
                sku: "lat001".into(),
            },
        ]
    );

    server.shutdown.trigger();
}

#[tokio::test]
async fn list_is_json_with_trailing_newline() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    let resp = client.send(Method::GET, "/products", "").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    let body = resp.text().await.unwrap();
    assert!(body.starts_with('['));
    assert!(body.ends_with("]\n"));
    assert!(!body.contains("created_on"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn post_then_get_appends_in_order() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    let resp = client.add_product(&cappuccino()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let echoed: Product = resp.json().await.unwrap();
    assert_eq!(echoed, cappuccino());

    let products = client.list_products().await.unwrap();
    assert_eq!(names(&products), ["Espresso", "Latte", "Cappuccino"]);
    assert_eq!(products[2], cappuccino());

    server.shutdown.trigger();
}

#[tokio::test]
async fn put_replaces_only_the_matching_position() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    let updated = Product {
        id: 1,
        name: "Espresso Updated".into(),
        description: "Short and strong".into(),
        price: 10.99,
        sku: "esp001".into(),
    };
    let resp = client.update_product(&updated).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let products = client.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0], updated);
    assert_eq!(products[1].name, "Latte");

    server.shutdown.trigger();
}

#[tokio::test]
async fn put_with_unknown_id_is_rejected() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());
    let before = client.list_products().await.unwrap();

    let mut ghost = cappuccino();
    ghost.id = 42;
    let resp = client.update_product(&ghost).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.unwrap().contains("ID not found"));

    assert_eq!(client.list_products().await.unwrap(), before);

    server.shutdown.trigger();
}

#[tokio::test]
async fn malformed_json_leaves_catalog_unchanged() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    for method in [Method::POST, Method::PUT] {
        let resp = client
            .send(method, "/products", "{\"id\": 3, \"name\":")
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp
            .text()
            .await
            .unwrap()
            .contains("Unable to unmarshal request body JSON"));
    }

    assert_eq!(server.store.len(), 2);

    server.shutdown.trigger();
}

#[tokio::test]
async fn other_methods_get_405_with_allow() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    for method in [Method::DELETE, Method::PATCH] {
        let resp = client.send(method, "/products", "").await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[header::ALLOW], "GET, POST, PUT");
        assert!(resp.text().await.unwrap().is_empty());
    }

    assert_eq!(server.store.len(), 2);

    server.shutdown.trigger();
}

#[tokio::test]
async fn duplicate_ids_follow_the_uniqueness_setting() {
    let lenient = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&lenient.url());
    let mut dup = cappuccino();
    dup.id = 1;
    let resp = client.add_product(&dup).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(lenient.store.len(), 3);
    lenient.shutdown.trigger();

    let mut config = CatalogConfig::default();
    config.catalog.unique_ids = true;
    let strict = common::start_server(config).await;
    let client = CatalogClient::new(&strict.url());
    let resp = client.add_product(&dup).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(resp.text().await.unwrap().contains("ID already exists"));
    assert_eq!(strict.store.len(), 2);
    strict.shutdown.trigger();
}

#[tokio::test]
async fn echo_handlers_reflect_the_body() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    assert_eq!(client.echo("ping").await.unwrap(), "\n(/) Data: ping");
    assert_eq!(client.hello("World").await.unwrap(), "Hello World");
    assert_eq!(client.hello("").await.unwrap(), "Hello ");

    let resp = client.send(Method::POST, "/no/such/path", "x").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "\n(/) Data: x");

    assert_eq!(server.store.len(), 2);

    server.shutdown.trigger();
}

#[tokio::test]
async fn oversized_body_is_a_bad_request() {
    let mut config = CatalogConfig::default();
    config.limits.max_body_size = 16;
    let server = common::start_server(config).await;
    let client = CatalogClient::new(&server.url());

    let resp = client.add_product(&cappuccino()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(server.store.len(), 2);

    server.shutdown.trigger();
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());

    let resp = client.send(Method::GET, "/products", "").await.unwrap();
    let id = resp.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);

    let resp = reqwest::Client::new()
        .get(format!("{}/products", server.url()))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "client-chosen");

    server.shutdown.trigger();
}

#[tokio::test]
async fn server_stops_after_shutdown_signal() {
    let server = common::start_server(CatalogConfig::default()).await;
    let client = CatalogClient::new(&server.url());
    assert!(client.list_products().await.is_ok());

    server.shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let fresh = reqwest::Client::new();
    assert!(fresh
        .get(format!("{}/products", server.url()))
        .send()
        .await
        .is_err());
}
