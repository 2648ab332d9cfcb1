// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms.

pub mod aggregate;
pub mod backends;
pub mod datasource;
pub mod error;
pub mod model;
pub mod port;

pub use datasource::DatasourceConfig;
pub use error::CollectionError;
pub use model::{ColumnMeta, DataTable, Dimension, DimensionGrid, TypedColumn};
pub use port::{CollectionProvider, GetDataRequest, QuantizeMethod};
