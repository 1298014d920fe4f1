//! Webcam-derived emotion signals: the subprocess classifier bridge, the
//! HTTP endpoint over it, and the degrading Live/Simulated sample feed.

pub mod classifier;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod simulate;
