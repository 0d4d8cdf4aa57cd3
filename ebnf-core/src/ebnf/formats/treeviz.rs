//! Treeviz format module declaration

#[allow(clippy::module_inception)]
pub mod treeviz;

pub use treeviz::{to_treeviz_str, TreevizFormatter};
