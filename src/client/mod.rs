// file: src/client/mod.rs
// description: remote API client module exports
// reference: internal module structure

pub mod naver;

pub use naver::NaverClient;
