//! # autoroute
//!
//! **autoroute** infers HTTP routes from controller method signatures. A
//! controller class such as `App\Controllers\Blog` with a public method
//! `getShow($id, $page = 1)` yields the route `GET blog/show/..[/..]` handled
//! by `\App\Controllers\Blog::getShow`, with no route file involved.
//!
//! ## Architecture
//!
//! - **[`introspect`]** - Controller signatures (class, methods, visibility,
//!   parameters) and the [`Introspector`](introspect::Introspector) seam that
//!   supplies them, plus a manifest-backed implementation
//! - **[`reader`]** - [`ControllerMethodReader`] turns one controller into
//!   [`RouteDescriptor`]s
//! - **[`naming`]** - URI case translation (none, dashes, camelCase to kebab)
//! - **[`router`]** - [`RouteTable`] registers descriptors and matches requests
//! - **[`linter`]** - Flags ambiguous or unreachable auto-routes
//! - **[`events`]** - Priority-ordered event listener registry
//! - **[`config`]** - Routing and reader configuration (files and environment)
//! - **[`logging`]** - `tracing-subscriber` setup
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Reader as ControllerMethodReader
//!     participant Intro as Introspector
//!     participant Table as RouteTable
//!
//!     App->>Reader: read("App\\Controllers\\Blog")
//!     Reader->>Intro: inspect(class)
//!     Intro-->>Reader: ControllerSignature
//!     Reader->>Reader: match verb prefix, translate names,<br/>infer params
//!     Reader-->>App: Vec<RouteDescriptor>
//!     App->>Table: RouteTable::new(descriptors)
//!     App->>Table: route(GET, "/blog/show/42")
//!     Table-->>App: RouteMatch { handler, params }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use autoroute::introspect::{ControllerSignature, MethodSignature, ParamSignature};
//! use autoroute::{ControllerMethodReader, ReaderConfig, RouteTable, RoutingConfig, StaticIntrospector};
//!
//! let introspector = StaticIntrospector::new().with_controller(
//!     ControllerSignature::new("App\\Controllers\\Blog").method(MethodSignature::public(
//!         "getShow",
//!         vec![ParamSignature::required("id")],
//!     )),
//! );
//! let config = ReaderConfig::new("App\\Controllers", ["get"]).unwrap();
//! let reader = ControllerMethodReader::new(introspector, config, RoutingConfig::default());
//!
//! let descriptors = reader.read("App\\Controllers\\Blog").unwrap();
//! assert_eq!(descriptors[0].route, "blog/show");
//! assert_eq!(descriptors[0].route_params, "/..");
//!
//! let table = RouteTable::new(descriptors);
//! let matched = table.route(http::Method::GET, "/blog/show/42").unwrap();
//! assert_eq!(matched.get_param("id"), Some("42"));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod introspect;
pub mod linter;
pub mod logging;
pub mod naming;
pub mod reader;
pub mod router;

pub use config::{ReaderConfig, RoutingConfig};
pub use error::ReaderError;
pub use events::EventRegistry;
pub use introspect::{load_manifest, Introspector, StaticIntrospector};
pub use reader::{ControllerMethodReader, RouteDescriptor};
pub use router::{RouteMatch, RouteTable};
