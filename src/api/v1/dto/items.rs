use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub item_name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ItemsPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: &'static str,
}
