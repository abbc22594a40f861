pub(crate) mod xml_bif;
pub(crate) mod xml_definition;
pub(crate) mod xml_variable;

pub(crate) use xml_bif::{XmlBif, XmlNetwork};
pub(crate) use xml_definition::XmlDefinition;
pub(crate) use xml_variable::XmlVariable;
