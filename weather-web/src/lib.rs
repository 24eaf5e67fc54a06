//! HTTP front end for the weather app.
//!
//! One page: `GET /?location=<name>` resolves the name through the geocoder,
//! fetches the current weather there and renders it. Anything that goes wrong
//! renders the landing page instead.

pub mod app;
pub mod error;
pub mod handler;
pub mod render;
pub mod telemetry;
pub mod view;

pub use app::{AppState, router, serve};
pub use render::{RenderError, Renderer};
pub use view::{LandingModel, ViewModel};
