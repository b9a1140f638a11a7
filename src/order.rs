use std::{future::Future, time::Duration};

use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::{cart::OrderPayload, error::OrderError};


// Anything that can deliver an order payload somewhere
pub trait OrderTransport: Send + Sync + 'static {
    fn submit(&self, payload: &OrderPayload) -> impl Future<Output = Result<(), OrderError>> + Send;
}


// POSTs the order as JSON to a single endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, OrderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl OrderTransport for HttpTransport {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), OrderError> {
        debug!(endpoint = %self.endpoint, lines = payload.orders.len(), "sending order");
        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrderError::Rejected(status));
        }
        info!(%status, items = payload.total_items(), "order accepted");
        Ok(())
    }
}


#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    // Records every payload; fails while `fail` is set
    #[derive(Debug, Clone, Default)]
    pub struct RecordingTransport {
        pub sent: Arc<Mutex<Vec<OrderPayload>>>,
        pub fail: Arc<Mutex<bool>>,
        pub delay: Duration,
    }

    impl RecordingTransport {
        pub fn failing() -> Self {
            let transport = RecordingTransport::default();
            *transport.fail.lock().unwrap() = true;
            transport
        }

        pub fn sent(&self) -> Vec<OrderPayload> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl OrderTransport for RecordingTransport {
        async fn submit(&self, payload: &OrderPayload) -> Result<(), OrderError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.sent.lock().unwrap().push(payload.clone());
            if *self.fail.lock().unwrap() {
                return Err(OrderError::Rejected(reqwest::StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    use crate::{cart::Cart, model::DishId};

    #[test]
    fn http_transport_keeps_endpoint() {
        let url = Url::parse("http://127.0.0.1:9/orders").unwrap();
        let transport = HttpTransport::new(url.clone(), Duration::from_secs(1)).unwrap();
        assert_eq!(transport.endpoint(), &url);
    }

    // One-shot HTTP server: captures the raw request, answers with `status_line`
    fn serve_once(status_line: &'static str) -> (Url, std::thread::JoinHandle<String>) {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/orders", listener.local_addr().unwrap())).unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                } else if n == 0 {
                    break;
                }
            }
            let reply = format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            stream.write_all(reply.as_bytes()).unwrap();
            String::from_utf8(raw).unwrap()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn posts_json_order_and_maps_error_status() {
        let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error");
        let transport = HttpTransport::new(url, Duration::from_secs(5)).unwrap();

        let mut cart = Cart::new();
        cart.add(&DishId::from(1));
        cart.add(&DishId::from(1));
        let err = transport.submit(&cart.to_order_payload()).await.unwrap_err();
        assert!(matches!(err, OrderError::Rejected(s) if s == StatusCode::INTERNAL_SERVER_ERROR), "{err}");

        let request = server.join().unwrap();
        let (head, body) = request.split_once("\r\n\r\n").unwrap();
        assert!(head.starts_with("POST /orders HTTP/1.1\r\n"), "{head}");
        assert!(head.to_ascii_lowercase().contains("content-type: application/json"), "{head}");
        assert_eq!(body, r#"{"orders":[{"dish_id":"1","amount":2}]}"#);
    }

    #[tokio::test]
    async fn accepted_order_is_ok() {
        let (url, server) = serve_once("HTTP/1.1 201 Created");
        let transport = HttpTransport::new(url, Duration::from_secs(5)).unwrap();

        let mut cart = Cart::new();
        cart.add(&DishId::from(4));
        transport.submit(&cart.to_order_payload()).await.unwrap();
        assert!(server.join().unwrap().contains(r#""dish_id":"4""#));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_reported() {
        // Bind then drop, so nothing listens on the port
        let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let url = Url::parse(&format!("http://{addr}/orders")).unwrap();
        let transport = HttpTransport::new(url, Duration::from_secs(2)).unwrap();

        let mut cart = Cart::new();
        cart.add(&DishId::from(1));
        let err = transport.submit(&cart.to_order_payload()).await.unwrap_err();
        assert!(matches!(err, OrderError::Http(_)), "{err}");
    }

    #[tokio::test]
    async fn recording_transport_captures_payloads() {
        let transport = testing::RecordingTransport::default();
        let mut cart = Cart::new();
        cart.add(&DishId::from(3));
        transport.submit(&cart.to_order_payload()).await.unwrap();
        assert_eq!(transport.sent(), vec![cart.to_order_payload()]);
    }
}
