//! Bodies, payloads, configuration and the media type registry.
//!
//! # Examples
//!
//! ```
//! use repondez::core::{Body, Html};
//!
//! let body = Body::new(Html::new("<b>bold</b>")).status_accepted();
//! assert_eq!(body.status(), 202);
//! ```

pub use repondez_core::*;
