//! Kernel utilities shared by the catalog applications.
//! Keep this crate lightweight; it owns the two pieces of real logic the services lean on.
//!
//! ## Layered configuration
//! JSON files, a dotenv file and the process environment are merged once at startup:
//! ```rust,no_run
//! use catalog_kernel::config::ConfigResolver;
//! use catalog_kernel::domain::options::AppOptions;
//!
//! let config = ConfigResolver::builder().resolve();
//! let app: AppOptions = config.bind_options("appOptions").unwrap_or_default();
//! println!("listening on {}", app.port);
//! ```
//!
//! ## Problem details
//! Any [`problem::ProblemSource`] maps to an RFC 9457 body:
//! ```rust
//! use catalog_kernel::problem::{AppError, ProblemMapper, apply_defaults};
//!
//! let mapper = ProblemMapper;
//! let err = AppError::unclassified("boom");
//! let status = mapper.map_status_code(&err);
//! let problem = apply_defaults(mapper.build_problem_details(&err, status, "/api/v1/products", false), Some(status));
//! assert_eq!(problem.status, Some(500));
//! assert_eq!(problem.title.as_deref(), Some("Error"));
//! ```

// Lets `#[catalog_error]` expansions resolve `::catalog_kernel` inside this crate too.
extern crate self as catalog_kernel;

pub mod config;
pub mod problem;
#[cfg(feature = "server")]
pub mod server;
pub mod validation;

pub use catalog_domain as domain;
