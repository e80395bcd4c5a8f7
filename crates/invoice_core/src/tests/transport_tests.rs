use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use shared::protocol::{CustomerDetails, LineItem};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct Captured {
    tx: Arc<Mutex<Option<oneshot::Sender<(Option<String>, InvoicePayload)>>>>,
}

async fn capture_and_return_document(
    State(state): State<Captured>,
    headers: HeaderMap,
    Json(payload): Json<InvoicePayload>,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send((content_type, payload));
    }
    (StatusCode::OK, b"PK-xlsx-document".to_vec())
}

async fn reject_with_error_body() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("template file missing")),
    )
}

async fn reject_with_plain_text() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "upstream down")
}

async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn sample_payload() -> InvoicePayload {
    InvoicePayload {
        customer_details: CustomerDetails {
            inv_num: "INV-100".into(),
            cust_name: "Acme Traders".into(),
            inv_date: "2026-01-02".into(),
            ..CustomerDetails::default()
        },
        items: vec![LineItem {
            description: "Widget".into(),
            hsn_code: "1234".into(),
            quantity: "2.00".into(),
            unit_cost: "100.00".into(),
            gst_percent: "18.00".into(),
            total_cost: "236.00".into(),
        }],
    }
}

#[test]
fn endpoint_is_joined_onto_server_origin() {
    let transport = HttpInvoiceTransport::new("http://billing.local:5000/app/").expect("url");
    assert_eq!(
        transport.endpoint().as_str(),
        "http://billing.local:5000/save_invoice"
    );
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = HttpInvoiceTransport::new("not a url")
        .err()
        .expect("should fail");
    assert!(err.to_string().contains("invalid server url"));
}

#[tokio::test]
async fn posts_json_and_returns_document_bytes() {
    let (tx, rx) = oneshot::channel();
    let app = Router::new()
        .route("/save_invoice", post(capture_and_return_document))
        .with_state(Captured {
            tx: Arc::new(Mutex::new(Some(tx))),
        });
    let server_url = spawn(app).await.expect("spawn server");
    let transport = HttpInvoiceTransport::new(&server_url).expect("transport");

    let outcome = transport.submit(&sample_payload()).await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Document(b"PK-xlsx-document".to_vec()));

    let (content_type, received) = rx.await.expect("payload captured");
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(received, sample_payload());
}

#[tokio::test]
async fn non_success_surfaces_error_field() {
    let app = Router::new().route("/save_invoice", post(reject_with_error_body));
    let server_url = spawn(app).await.expect("spawn server");
    let transport = HttpInvoiceTransport::new(&server_url).expect("transport");

    let outcome = transport.submit(&sample_payload()).await.expect("submit");
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            status: 500,
            message: "template file missing".into(),
        }
    );
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_text() {
    let app = Router::new().route("/save_invoice", post(reject_with_plain_text));
    let server_url = spawn(app).await.expect("spawn server");
    let transport = HttpInvoiceTransport::new(&server_url).expect("transport");

    let outcome = transport.submit(&sample_payload()).await.expect("submit");
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            status: 502,
            message: "Bad Gateway".into(),
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport = HttpInvoiceTransport::new(&format!("http://{addr}")).expect("transport");
    let err = transport
        .submit(&sample_payload())
        .await
        .expect_err("should fail");
    assert!(err.endpoint.ends_with("/save_invoice"));
    assert!(!err.message.is_empty());
}
