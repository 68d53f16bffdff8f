//! # Router Module
//!
//! Registers auto-discovered routes and resolves requests against them.
//!
//! ## Overview
//!
//! [`RouteTable`] is the registrar side of auto-routing: it takes the
//! [`RouteDescriptor`](crate::reader::RouteDescriptor)s produced by the reader
//! and compiles each into an anchored regex. A descriptor's parameter pattern
//! decides how many trailing positional segments the route accepts:
//!
//! | Route | Pattern | Matches |
//! |-------|---------|---------|
//! | `blog` | `[/..]` | `/blog`, `/blog/2` |
//! | `blog/save` | `/../..[/..]` | `/blog/save/1/2`, `/blog/save/1/2/3` |
//! | `/` | | `/` |
//!
//! Routes marked unreachable (`x home/foo`) are never registered.
//!
//! ## Example
//!
//! ```rust,ignore
//! use autoroute::router::RouteTable;
//!
//! let table = RouteTable::new(reader.read("App\\Controllers\\Blog")?);
//! if let Some(m) = table.route(http::Method::GET, "/blog/42") {
//!     println!("Handler: {}", m.handler());
//!     println!("Params: {:?}", m.params);
//! }
//! ```

mod core;

pub use self::core::{ParamVec, RouteMatch, RouteTable, MAX_INLINE_PARAMS};
