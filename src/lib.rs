//! WCAG contrast checking for sRGB hex colors, plus the small web page that
//! drives it.

pub mod config;
pub mod models;
pub mod routes;
pub mod session;
pub mod wcag;
