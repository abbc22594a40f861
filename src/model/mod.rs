/// Definition of the intermediate network representation and its validation.
mod bif_network;
/// Dense probability tables and their reshaping.
mod cpd_table;
/// Implementation of (de)serialization from/into JSON format.
mod _impl_json_serde;
/// Implementation of conversion from the XML document structure.
mod _impl_xml_serde;

pub use bif_network::{BifNetwork, BifNetworkError};
pub use cpd_table::{CpdTable, CpdTableError};
