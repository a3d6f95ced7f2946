// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration for the dashboard process and its fitness backend

pub mod backend;
pub mod environment;

pub use backend::{resolve_base_url, BaseUrlSource};
pub use environment::ServerConfig;
