pub mod app;
pub mod context;
pub mod nav;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, build_app_context};
