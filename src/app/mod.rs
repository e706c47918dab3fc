//! Application Layer
//!
//! The state controller sitting between the external stores and the view.

mod controller;


pub use controller::AppController;
