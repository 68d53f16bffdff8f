//! # Reader Module
//!
//! Derives auto-routes from controller method signatures.
//!
//! ## Conventions
//!
//! A public method is routed when its name starts with an allowed HTTP verb
//! (`getShow`, `postSave`). The rest of the name is the action; the
//! controller's namespace below the root namespace and its class name provide
//! the leading path segments:
//!
//! | Controller | Method | Route | Params |
//! |------------|--------|-------|--------|
//! | `App\Controllers\Blog` | `getIndex($page = 1)` | `blog` | `[/..]` |
//! | `App\Controllers\Blog` | `postSave($a, $b)` | `blog/save` | `/../..` |
//! | `App\Controllers\Admin\Users` | `getEdit($id)` | `admin/users/edit` | `/..` |
//! | `App\Controllers\Home` | `getIndex()` | `/` | |
//!
//! Controllers that declare `_remap` take over their own dispatch and are
//! never auto-routed.

mod core;
mod params;
mod types;

pub use self::core::ControllerMethodReader;
pub(crate) use self::core::{is_default_controller, is_default_method, match_verb};
pub use params::{infer_params, route_param_pattern, OPTIONAL_SEGMENT, REQUIRED_SEGMENT};
pub use types::{ParamMap, RouteDescriptor, UNROUTABLE_PREFIX};
