use serde::{Deserialize, Serialize};

/// Watch status values from the MyAnimeList list filter.
///
/// Only `Completed` is scraped today; the discriminant matches the
/// `status` query parameter the list page expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Completed = 6,
}

impl ListStatus {
    pub fn as_query_value(self) -> u8 {
        self as u8
    }
}

/// One entry of a user's anime list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnimeRecord {
    /// Numeric id from the detail-page path; 0 when the href has no
    /// parseable id segment.
    pub id: u32,
    pub title: String,
    pub image_url: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_query_value() {
        assert_eq!(ListStatus::Completed.as_query_value(), 6);
    }

    #[test]
    fn test_record_json_field_names() {
        let record = AnimeRecord {
            id: 12345,
            title: "Some Title".to_string(),
            image_url: "https://cdn.example/img.jpg".to_string(),
            url: "/anime/12345/Some-Title".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 12345);
        assert_eq!(json["title"], "Some Title");
        assert_eq!(json["image_url"], "https://cdn.example/img.jpg");
        assert_eq!(json["url"], "/anime/12345/Some-Title");
    }
}
