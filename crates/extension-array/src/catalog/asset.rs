//! A column of asset descriptors.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::column::{fmt_column, ColumnType, TypedColumn};
use crate::element::Element;

use super::item::Asset;

/// Column of asset descriptors, registered as `"asset"`.
///
/// Produced by looking one asset name up across a catalog-item column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetColumn {
    elements: Vec<Element<Arc<Asset>>>,
}

impl AssetColumn {
    pub fn new(assets: impl IntoIterator<Item = Option<Asset>>) -> Self {
        Self {
            elements: assets
                .into_iter()
                .map(|asset| Element::from(asset.map(Arc::new)))
                .collect(),
        }
    }

    pub fn hrefs(&self) -> Vec<Option<String>> {
        self.elements
            .iter()
            .map(|element| element.present().map(|asset| asset.href.clone()))
            .collect()
    }

    pub fn media_types(&self) -> Vec<Option<String>> {
        self.elements
            .iter()
            .map(|element| element.present().and_then(|asset| asset.media_type.clone()))
            .collect()
    }
}

impl TypedColumn for AssetColumn {
    type Payload = Asset;

    const COLUMN_TYPE: ColumnType = ColumnType::Asset;

    fn elements(&self) -> &[Element<Arc<Asset>>] {
        &self.elements
    }

    fn from_elements(elements: Vec<Element<Arc<Asset>>>) -> Self {
        Self { elements }
    }

    fn payload_nbytes(payload: &Asset) -> usize {
        serde_json::to_vec(payload).map_or(0, |bytes| bytes.len())
    }

    fn format_payload(payload: &Asset) -> String {
        format!("<Asset>({})", payload.href)
    }
}

impl Display for AssetColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_column(self, f)
    }
}
