use carhire_core::Location;

use super::map_data;
use crate::encoding::escape_path_segment;
use crate::endpoint::Endpoint;
use crate::request::RequestDescriptor;
use crate::wire;

/// Popular locations, optionally narrowed by a search query
pub fn top_locations(query: Option<&str>) -> RequestDescriptor<Vec<Location>> {
    let suffix = query
        .map(|q| q.replace(' ', ""))
        .filter(|q| !q.is_empty())
        .map(|q| format!("/{}", escape_path_segment(&q)))
        .unwrap_or_default();

    RequestDescriptor::query(Endpoint::TopLocations, |body| {
        map_data(&body, |data| data.is_array().then(|| wire::locations(data)))
    })
    .url_suffix(suffix)
}
