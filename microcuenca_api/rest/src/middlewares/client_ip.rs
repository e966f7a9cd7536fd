use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{connect_info::MockConnectInfo, ConnectInfo, Request},
    middleware::{from_fn, Next},
    Router,
};
use tracing::{debug, error, warn};

use crate::RealIpConfig;

pub fn add<S: Clone + Send + Sync + 'static>(
    real_ip_config: Option<Arc<RealIpConfig>>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    |router| {
        router.layer(from_fn(move |mut request: Request, next: Next| {
            if let Some(client_ip) = ClientIp::from_request(&request, real_ip_config.as_deref()) {
                request.extensions_mut().insert(client_ip);
            }
            next.run(request)
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientIp(pub IpAddr);

impl ClientIp {
    /// `None` if the server was not started with connect info.
    fn from_request(request: &Request, real_ip_config: Option<&RealIpConfig>) -> Option<Self> {
        let extensions = request.extensions();
        let Some(peer) = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(peer)| *peer)
            .or_else(|| {
                extensions
                    .get::<MockConnectInfo<SocketAddr>>()
                    .map(|MockConnectInfo(peer)| *peer)
            })
        else {
            warn!("peer address not available");
            return None;
        };
        let client_ip = peer.ip();

        let Some(RealIpConfig { header, set_from }) = real_ip_config else {
            return Some(Self(client_ip));
        };

        let header_value = request.headers().get(header);

        if *set_from != client_ip {
            if let Some(header_value) = header_value {
                debug!(%client_ip, ?header_value, "ignoring real ip header value from untrusted source");
            }
            return Some(Self(client_ip));
        }

        let Some(header_value) = header_value else {
            warn!(%client_ip, "real ip header not found");
            return Some(Self(client_ip));
        };

        // Proxies may append to the header, the first entry is the original client.
        let Some(real_ip) = header_value
            .to_str()
            .ok()
            .and_then(|value| value.split(',').next())
            .and_then(|real_ip| real_ip.trim().parse().ok())
        else {
            error!(%client_ip, ?header_value, "failed to parse real ip header value");
            return Some(Self(client_ip));
        };

        Some(Self(real_ip))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    const PROXY: [u8; 4] = [10, 0, 0, 1];

    fn request(peer: [u8; 4], forwarded_for: Option<&str>) -> Request {
        let mut request = axum::http::Request::builder().uri("/");
        if let Some(forwarded_for) = forwarded_for {
            request = request.header("X-Forwarded-For", forwarded_for);
        }
        let mut request = request.body(Body::empty()).unwrap();
        request.extensions_mut().insert(ConnectInfo(SocketAddr::from((peer, 1234))));
        request
    }

    fn config() -> RealIpConfig {
        RealIpConfig {
            header: "X-Forwarded-For".into(),
            set_from: PROXY.into(),
        }
    }

    #[test]
    fn peer_address_without_config() {
        let request = request([192, 168, 1, 7], Some("1.2.3.4"));

        let result = ClientIp::from_request(&request, None);

        assert_eq!(result, Some(ClientIp([192, 168, 1, 7].into())));
    }

    #[test]
    fn header_from_trusted_proxy() {
        let request = request(PROXY, Some("1.2.3.4, 10.0.0.1"));

        let result = ClientIp::from_request(&request, Some(&config()));

        assert_eq!(result, Some(ClientIp([1, 2, 3, 4].into())));
    }

    #[test]
    fn header_from_untrusted_source() {
        let request = request([192, 168, 1, 7], Some("1.2.3.4"));

        let result = ClientIp::from_request(&request, Some(&config()));

        assert_eq!(result, Some(ClientIp([192, 168, 1, 7].into())));
    }

    #[test]
    fn invalid_header() {
        let request = request(PROXY, Some("not an ip"));

        let result = ClientIp::from_request(&request, Some(&config()));

        assert_eq!(result, Some(ClientIp(PROXY.into())));
    }

    #[test]
    fn mocked_peer_address() {
        let mut request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(MockConnectInfo(SocketAddr::from(([192, 168, 1, 7], 4242))));

        let result = ClientIp::from_request(&request, None);

        assert_eq!(result, Some(ClientIp([192, 168, 1, 7].into())));
    }

    #[test]
    fn missing_peer_address() {
        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let result = ClientIp::from_request(&request, Some(&config()));

        assert_eq!(result, None);
    }
}
