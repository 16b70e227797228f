//! YAML sample manifest: the catalog serialized field by field in
//! declaration order.

use crate::error::Result;
use crate::model::Catalog;

pub fn render_manifest(catalog: &Catalog) -> Result<String> {
    Ok(serde_yaml::to_string(catalog)?)
}
