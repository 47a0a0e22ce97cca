use carhire_core::Supplier;

use super::map_data;
use crate::encoding::Params;
use crate::endpoint::Endpoint;
use crate::request::RequestDescriptor;
use crate::wire;

/// Every supplier taking part in the marketplace
pub fn supplier_list(alias: &str) -> RequestDescriptor<Vec<Supplier>> {
    RequestDescriptor::query(Endpoint::SupplierList, |body| {
        map_data(&body, |data| data.is_array().then(|| wire::suppliers(data)))
    })
    .params(Params::new().with("alias", alias))
}
