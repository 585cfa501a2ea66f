//! HTTP client layer — `RatesHttp`, the reqwest-backed `RateSource`.

pub mod client;

pub use client::RatesHttp;
