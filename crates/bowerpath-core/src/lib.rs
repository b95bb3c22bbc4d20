#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod paths;
pub mod rc;
pub mod registry;
pub mod resolver;
pub mod version;

pub use config::{Config, ResolveOptions};
pub use error::Error;
pub use paths::{find_project_root, find_project_root_until, ProjectRoot};
pub use registry::{BowerListLister, InstalledLister, InstalledPackage, LiveRegistry, ScanLister};
pub use resolver::{
    resolve_all, resolve_all_from_file, resolve_async, resolve_deferred, resolve_one,
    resolve_one_with_reference, resolve_with_trace, DependencyPaths, ResolveResultWithTrace,
    ResolvedPaths, WILDCARD,
};
pub use version::VERSION;
