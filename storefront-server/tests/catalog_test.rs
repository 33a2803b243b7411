// storefront-server/tests/catalog_test.rs
// 商品: 上传校验、所有权、删除级联

mod common;

use common::{TestApp, sample_png};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_upload_stores_image_and_lists_mine() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;

    let res = alice
        .upload_product("Tea", "300", "drink", Some(("tea.png", sample_png())))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let product = res.json()["product"].clone();
    assert_eq!(product["price"], 300);
    assert_eq!(product["labels"], "drink");
    let image = product["image"].as_str().unwrap().to_string();
    assert!(image.starts_with("/uploads/") && image.ends_with(".jpg"));

    let res = alice.get(&image).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers["content-type"], "image/jpeg");

    let mine = alice.get("/api/products/mine").await.json();
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let mut bob = app.logged_in("bob", "pw").await;
    let theirs = bob.get("/api/products/mine").await;
    assert_eq!(theirs.status, StatusCode::OK);
    assert!(theirs.json().as_array().unwrap().is_empty());

    // product detail is public
    let id = product["id"].as_i64().unwrap();
    let res = app.client().get(&format!("/api/products/{id}")).await;
    assert_eq!(res.json()["name"], "Tea");
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;

    let res = alice
        .upload_product("Tea", "abc", "", Some(("tea.png", sample_png())))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 6002);

    let res = alice
        .upload_product("Tea", "-5", "", Some(("tea.png", sample_png())))
        .await;
    assert_eq!(res.code(), 6002);

    let res = alice.upload_product("Tea", "300", "", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 6504);

    let res = alice
        .upload_product("Tea", "300", "", Some(("tea.bmp", sample_png())))
        .await;
    assert_eq!(res.code(), 6502);

    let res = alice
        .upload_product("Tea", "300", "", Some(("tea.png", b"plain text".to_vec())))
        .await;
    assert_eq!(res.code(), 6503);

    let res = alice
        .upload_product("", "300", "", Some(("tea.png", sample_png())))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let mut guest = app.client();
    let res = guest
        .upload_product("Tea", "300", "", Some(("tea.png", sample_png())))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    assert!(alice.get("/api/products/mine").await.json().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_other_users_cannot_modify_product() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;
    let mut bob = app.logged_in("bob", "pw").await;
    let tea = alice.create_product("Tea", 300).await;

    let res = bob
        .put_json(&format!("/api/products/{tea}"), json!({"name": "Stolen"}))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.code(), 2001);

    let res = bob.delete(&format!("/api/products/{tea}")).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    // absent product is NotFound before any ownership question
    let res = bob.delete("/api/products/999999").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), 6001);

    let res = alice
        .put_json(&format!("/api/products/{tea}"), json!({"name": "Green Tea", "price": 350}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["product"]["name"], "Green Tea");
    assert_eq!(res.json()["product"]["price"], 350);

    let res = alice
        .put_json(&format!("/api/products/{tea}"), json!({"price": -1}))
        .await;
    assert_eq!(res.code(), 6002);
}

#[tokio::test]
async fn test_delete_product_removes_cart_lines_and_keeps_orders() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;
    let tea = alice.create_product("Tea", 300).await;
    let cake = alice.create_product("Cake", 450).await;

    let mut buyer = app.client();
    buyer
        .post_json("/api/cart", json!({"product_id": cake, "quantity": 1}))
        .await;
    buyer.post_empty("/api/cart/checkout").await;

    let mut guest = app.client();
    guest
        .post_json("/api/cart", json!({"product_id": tea, "quantity": 2}))
        .await;

    assert_eq!(alice.delete(&format!("/api/products/{tea}")).await.status, StatusCode::OK);
    assert_eq!(alice.delete(&format!("/api/products/{cake}")).await.status, StatusCode::OK);

    let cart = guest.get("/api/cart").await.json();
    assert_eq!(cart["item_count"], 0);

    let orders = alice.get("/api/orders").await.json();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["total_price"], 450);

    let res = alice.get(&format!("/api/products/{tea}")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serving_images_rejects_traversal() {
    let app = TestApp::new().await;
    let mut client = app.client();

    let res = client.get("/uploads/..secret").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = client.get("/uploads/missing.jpg").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
