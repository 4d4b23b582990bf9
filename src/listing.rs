use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE, MAX_PAGE_LIMIT};
use crate::discovery::LogFileDescriptor;
use crate::network::NetworkFilter;
use crate::rollup::SkippedFile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    #[serde(rename = "page")]
    pub page_number: usize,
    pub limit: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// Entries that matched the directory scan but could not be read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_files: Vec<SkippedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based; never clamped to the last page.
    pub page: usize,
    pub limit: usize,
    pub network: NetworkFilter,
}

/// Raw listing query as it arrives over HTTP. Values are decoded leniently.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub network: Option<String>,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize, network: NetworkFilter) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            network,
        }
    }

    /// Missing, non-numeric or non-positive `page`/`limit` fall back to the
    /// defaults; `limit` is capped at `MAX_PAGE_LIMIT`.
    pub fn from_query(query: &ListQuery, default_limit: usize) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(query.limit.as_deref()).unwrap_or(default_limit);
        Self::new(page, limit, NetworkFilter::parse(query.network.as_deref()))
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let value: i64 = raw?.trim().parse().ok()?;
    usize::try_from(value).ok().filter(|v| *v > 0)
}

pub fn total_pages(total_items: usize, limit: usize) -> usize {
    total_items.div_ceil(limit)
}

/// Most recent first; equal mtimes fall back to name so the order is stable
/// for a fixed directory snapshot.
pub fn sort_by_recency(files: &mut [LogFileDescriptor]) {
    files.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Filter, sort and slice one page out of the discovered files.
pub fn paginate(files: Vec<LogFileDescriptor>, request: &PageRequest) -> Page<LogFileDescriptor> {
    let mut files: Vec<LogFileDescriptor> = files
        .into_iter()
        .filter(|f| request.network.matches(&f.network))
        .collect();
    sort_by_recency(&mut files);

    let total_items = files.len();
    let items: Vec<LogFileDescriptor> = files
        .into_iter()
        .skip(request.offset())
        .take(request.limit)
        .collect();

    Page {
        items,
        page_number: request.page,
        limit: request.limit,
        total_items,
        total_pages: total_pages(total_items, request.limit),
        skipped_files: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn descriptor(name: &str, network: &str, minutes: i64) -> LogFileDescriptor {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        LogFileDescriptor {
            name: name.to_string(),
            network: network.to_string(),
            last_modified: base + Duration::minutes(minutes),
        }
    }

    fn thirteen() -> Vec<LogFileDescriptor> {
        (0..13)
            .map(|i| descriptor(&format!("datil-{:02}.log", i), "datil", i))
            .collect()
    }

    #[test]
    fn test_thirteen_files_limit_six() {
        let request = |page| PageRequest::new(page, 6, NetworkFilter::All);

        let first = paginate(thirteen(), &request(1));
        assert_eq!(first.total_items, 13);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.items[0].name, "datil-12.log");

        let third = paginate(thirteen(), &request(3));
        assert_eq!(third.items.len(), 1);
        assert_eq!(third.items[0].name, "datil-00.log");

        let fourth = paginate(thirteen(), &request(4));
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.page_number, 4);
        assert_eq!(fourth.total_pages, 3);
    }

    #[test]
    fn test_empty_listing_has_zero_pages() {
        let page = paginate(Vec::new(), &PageRequest::new(1, 7, NetworkFilter::All));
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_sorted_most_recent_first() {
        let files = vec![
            descriptor("file1.log", "datil", 10),
            descriptor("file2.log", "datil", 5),
            descriptor("file3.log", "datil", 20),
        ];
        let page = paginate(files, &PageRequest::new(1, 10, NetworkFilter::All));
        let names: Vec<&str> = page.items.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["file3.log", "file1.log", "file2.log"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let files = vec![
            descriptor("b.log", "datil", 1),
            descriptor("a.log", "datil", 1),
            descriptor("c.log", "datil", 1),
        ];
        let page = paginate(files, &PageRequest::new(1, 10, NetworkFilter::All));
        let names: Vec<&str> = page.items.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
    }

    #[test]
    fn test_network_filter_counts_before_pagination() {
        let mut files = thirteen();
        files.push(descriptor("datil-dev-a.log", "datil-dev", 100));
        files.push(descriptor("datil-dev-b.log", "datil-dev", 50));

        let dev = paginate(
            files.clone(),
            &PageRequest::new(1, 1, NetworkFilter::Only("datil-dev".into())),
        );
        assert_eq!(dev.total_items, 2);
        assert_eq!(dev.total_pages, 2);
        assert_eq!(dev.items[0].name, "datil-dev-a.log");

        let unknown = paginate(
            files,
            &PageRequest::new(1, 5, NetworkFilter::Only("habanero".into())),
        );
        assert_eq!(unknown.total_items, 0);
        assert!(unknown.items.is_empty());
    }

    #[test]
    fn test_lenient_query_parsing() {
        let query = ListQuery {
            page: Some("abc".into()),
            limit: Some("0".into()),
            network: None,
        };
        let request = PageRequest::from_query(&query, 7);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 7);
        assert_eq!(request.network, NetworkFilter::All);

        let query = ListQuery {
            page: Some("-3".into()),
            limit: Some("100000".into()),
            network: Some("datil-test".into()),
        };
        let request = PageRequest::from_query(&query, 7);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, MAX_PAGE_LIMIT);
        assert_eq!(request.network, NetworkFilter::Only("datil-test".into()));
    }

    #[test]
    fn test_page_serializes_with_wire_names() {
        let page = paginate(thirteen(), &PageRequest::new(2, 6, NetworkFilter::All));
        let json = serde_json::to_value(&page).expect("should serialize");
        assert_eq!(json["page"], 2);
        assert_eq!(json["limit"], 6);
        assert_eq!(json["totalItems"], 13);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["data"].as_array().map(Vec::len), Some(6));
        assert!(json.get("skippedFiles").is_none());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
    }
}
