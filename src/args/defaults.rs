pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apiprobe/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";
pub(crate) const DEFAULT_USERNAME: &str = "mehdi@test.com";
pub(crate) const DEFAULT_PASSWORD: &str = "123456";

/// Pre-seeded administrator account targeted by the negative-path state probe.
pub(crate) const DEFAULT_ADMIN_USER_ID: &str = "85c4196f-b5ea-498a-ac39-3aa2678de542";

pub(crate) const DEFAULT_PAGE: u64 = 1;
pub(crate) const DEFAULT_PAGE_SIZE: u64 = 10;
pub(crate) const DEFAULT_LOOKUP_PAGE_SIZE: u64 = 50;
