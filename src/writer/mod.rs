/// Output configuration of the writer.
mod writer_config;
/// Abstract XML element tree and its serialization.
mod xml_element;
/// Construction of the XMLBIF element tree.
mod xml_bif_writer;

pub use writer_config::{WriterConfig, XmlEncoding};
pub use xml_bif_writer::XmlBifWriter;
pub use xml_element::XmlElement;
