// storefront-server/tests/common/mod.rs
// 集成测试公共工具: 内存数据库 + 临时工作目录 + oneshot 请求

#![allow(dead_code)]

use std::io::Cursor;

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use storefront_server::db::DbService;
use storefront_server::{Config, ServerState, build_app};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "storefront-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _work_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let work_dir = TempDir::new().unwrap();
        let mut config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
        config.environment = "development".into();
        config.session_cookie_secure = false;
        customize(&mut config);

        let db = DbService::in_memory().await.unwrap();
        let state = ServerState::new(config, db.pool).unwrap();
        Self {
            app: build_app(state.clone()),
            state,
            _work_dir: work_dir,
        }
    }

    /// A browser-like client with its own cookie jar
    pub fn client(&self) -> TestClient {
        TestClient {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Register and log in a fresh client
    pub async fn logged_in(&self, username: &str, password: &str) -> TestClient {
        let mut client = self.client();
        let res = client
            .post_json(
                "/api/register",
                serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "register {username}: {:?}", res.json());
        let res = client
            .post_json(
                "/api/login",
                serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login {username}: {:?}", res.json());
        client
    }
}

pub struct TestClient {
    app: Router,
    pub cookie: Option<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Error code from an error body
    pub fn code(&self) -> u64 {
        self.json()["code"].as_u64().unwrap_or_default()
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

impl TestClient {
    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<String>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie.as_str());
        }
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        let res = TestResponse {
            status,
            headers,
            body,
        };
        self.store_cookie(&res);
        res
    }

    fn store_cookie(&mut self, res: &TestResponse) {
        let Some(header) = res.set_cookie() else {
            return;
        };
        let pair = header.split(';').next().unwrap_or_default().trim().to_string();
        if header.contains("Max-Age=0") {
            self.cookie = None;
        } else {
            self.cookie = Some(pair);
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, Body::empty()).await
    }

    pub async fn post_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.json_request(Method::POST, uri, body).await
    }

    pub async fn put_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.json_request(Method::PUT, uri, body).await
    }

    pub async fn patch_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.json_request(Method::PATCH, uri, body).await
    }

    pub async fn post_empty(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None, Body::empty()).await
    }

    pub async fn put_text(&mut self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Method::PUT,
            uri,
            Some("text/html".into()),
            Body::from(body.to_string()),
        )
        .await
    }

    async fn json_request(&mut self, method: Method, uri: &str, body: Value) -> TestResponse {
        self.send(
            method,
            uri,
            Some("application/json".into()),
            Body::from(body.to_string()),
        )
        .await
    }

    /// Multipart product upload; `image` is `(filename, bytes)`
    pub async fn upload_product(
        &mut self,
        name: &str,
        price: &str,
        labels: &str,
        image: Option<(&str, Vec<u8>)>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (field, value) in [("name", name), ("price", price), ("labels", labels)] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, data)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(&data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        self.send(
            Method::POST,
            "/api/products/upload",
            Some(format!("multipart/form-data; boundary={BOUNDARY}")),
            Body::from(body),
        )
        .await
    }

    /// Upload a product with a valid PNG and return its id
    pub async fn create_product(&mut self, name: &str, price: i64) -> i64 {
        let res = self
            .upload_product(name, &price.to_string(), "", Some(("item.png", sample_png())))
            .await;
        assert_eq!(res.status, StatusCode::OK, "upload {name}: {:?}", res.json());
        res.json()["product"]["id"].as_i64().unwrap()
    }
}

/// Small valid PNG
pub fn sample_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([20, 120, 200]));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}
