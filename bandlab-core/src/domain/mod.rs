//! Domain types for BandLab

pub mod candle;

pub use candle::Candle;
