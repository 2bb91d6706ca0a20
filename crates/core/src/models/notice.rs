use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "popup")]
    pub is_popup: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of notices, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticePage {
    #[serde(default)]
    pub content: Vec<Notice>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_popup: bool,
}

/// The notice listing is either a page object or, on older backends, a bare list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NoticeListing {
    List(Vec<Notice>),
    Page(NoticePage),
}

impl NoticeListing {
    pub fn into_page(self) -> NoticePage {
        match self {
            NoticeListing::Page(page) => page,
            NoticeListing::List(content) => NoticePage {
                total_pages: 1,
                total_elements: content.len() as u64,
                number: 0,
                content,
            },
        }
    }
}
