mod attribute_split_suggestion;
mod instance_conditional_test;
mod nominal_attribute_multiway_test;

pub use attribute_split_suggestion::AttributeSplitSuggestion;
pub use instance_conditional_test::InstanceConditionalTest;
pub use nominal_attribute_multiway_test::NominalAttributeMultiwayTest;
