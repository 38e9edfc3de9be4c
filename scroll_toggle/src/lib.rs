//! "Back to top" affordance: the link gets the `active` class once the page
//! has been scrolled past one viewport height, and loses it on click.

mod error;
mod toggle;
#[cfg(target_arch = "wasm32")]
mod web;

pub use error::ToggleError;
pub use toggle::{ACTIVE_CLASS, BackToTop, ClassList, SELECTOR};
#[cfg(target_arch = "wasm32")]
pub use web::install;
