//! AI-assisted PC build generation service
//!
//! Turns a use-case category and a budget into a complete PC build with
//! accessory recommendations, generated by a language model, validated,
//! re-priced authoritatively and linked to marketplace search pages.

pub mod api;
pub mod build;
pub mod config;
pub mod llm;
pub mod metrics;
pub mod retry;
