use crate::{header, model::HeaderSet};

pub static CONTENT_SECURITY_POLICY: HeaderSet = header!(
    "Content-Security-Policy",
    "style-src 'self'; img-src 'self'; font-src 'self'; script-src 'self'; default-src 'none'; sandbox allow-scripts allow-same-origin",
);

pub static CROSS_ORIGIN_RESOURCE_POLICY: HeaderSet =
    header!("Cross-Origin-Resource-Policy", "same-site");

pub static EXPECT_CT: HeaderSet = header!("Expect-CT", "max-age=86400, enforce");

pub static FEATURE_POLICY: HeaderSet = header!(
    "Feature-Policy",
    concat!(
        "ambient-light-sensor 'none'; autoplay 'none'; accelerometer 'none'; camera 'none'; ",
        "display-capture 'none'; document-domain 'none'; encrypted-media 'none'; fullscreen 'none'; ",
        "geolocation 'none'; gyroscope 'none'; microphone 'none'; midi 'none'; payment 'none'; ",
        "picture-in-picture 'none'; speaker 'none'; sync-xhr 'none'; usb 'none'; wake-lock 'none'; ",
        "webauthn 'none'; vr 'none'",
    ),
);

pub static XSS_PROTECTION: HeaderSet = header!("X-XSS-Protection", "1; mode=block");

pub static FRAME_OPTIONS: HeaderSet = header!("X-Frame-Options", "deny");

pub static REFERRER_POLICY: HeaderSet = header!("Referrer-Policy", "no-referrer");

pub static STRICT_TRANSPORT_SECURITY: HeaderSet = header!(
    "Strict-Transport-Security",
    "max-age=31536000; includeSubDomains; preload",
);

pub static CONTENT_TYPE_OPTIONS: HeaderSet = header!("X-Content-Type-Options", "nosniff");

pub static UA_COMPATIBLE: HeaderSet = header!("X-UA-Compatible", "IE=edge");

// injection order, keyed the way the edge platform's header map is keyed
static SECURITY_HEADERS: [(&str, &HeaderSet); 10] = [
    ("content-security-policy", &CONTENT_SECURITY_POLICY),
    ("cross-origin-resource-policy", &CROSS_ORIGIN_RESOURCE_POLICY),
    ("expect-ct", &EXPECT_CT),
    ("feature-policy", &FEATURE_POLICY),
    ("x-xss-protection", &XSS_PROTECTION),
    ("x-frame-options", &FRAME_OPTIONS),
    ("referrer-policy", &REFERRER_POLICY),
    ("strict-transport-security", &STRICT_TRANSPORT_SECURITY),
    // mixed case kept as deployed, see DESIGN.md
    ("x-Content-Type-Options", &CONTENT_TYPE_OPTIONS),
    ("x-ua-compatible", &UA_COMPATIBLE),
];

pub fn security_headers() -> &'static [(&'static str, &'static HeaderSet)] {
    &SECURITY_HEADERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_set_is_singleton() {
        for (name, set) in security_headers() {
            assert_eq!(set.entries().len(), 1, "{}", name);
        }
    }

    #[test]
    fn map_keys_match_entry_keys_ignoring_case() {
        for (name, set) in security_headers() {
            let entry = set.first().unwrap();
            assert!(name.eq_ignore_ascii_case(entry.key()), "{} vs {}", name, entry.key());
        }
    }

    #[test]
    fn feature_policy_disables_every_feature() {
        let value = FEATURE_POLICY.first().unwrap().value();
        assert!(value.starts_with("ambient-light-sensor 'none'; autoplay 'none';"));
        assert!(value.ends_with("webauthn 'none'; vr 'none'"));
        assert_eq!(value.split("; ").count(), 20);
        assert!(value.split("; ").all(|directive| directive.ends_with(" 'none'")));
    }
}
