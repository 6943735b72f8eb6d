//! Pantry AI Rust
//!
//! レシート写真を解析サーバへ送信し、検出された購入品と
//! 賞味期限の推定を表示するCLIツール

pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod picker;
pub mod view;
