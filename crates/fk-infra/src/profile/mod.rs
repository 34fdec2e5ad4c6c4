mod http;

pub use http::HttpProfileService;
