pub mod attribute;
pub mod object_store;
pub mod provisioning;
pub mod table_store;
