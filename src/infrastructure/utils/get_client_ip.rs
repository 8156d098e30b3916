use actix_web::HttpRequest;

/// Identifier every client without a resolvable address shares; such
/// requests all draw from one quota bucket.
pub const ANONYMOUS_CLIENT_ID: &str = "anonymous";

/// Derive the rate-limit client identifier from the request.
/// `trust_x_forwarded_for`: whether to trust the X-Forwarded-For header
/// (first hop); otherwise the peer address is used.
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        if let Some(forwarded) = req.headers().get("x-forwarded-for") {
            if let Ok(s) = forwarded.to_str() {
                let first = s.split(',').next().unwrap_or("").trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| ANONYMOUS_CLIENT_ID.to_string())
}
