//! Names of the artifacts the model transformer generates for a type, and of the ones
//! generated here.

pub const MODEL_DIRECTIVE: &str = "model";
pub const AUTH_DIRECTIVE: &str = "auth";
pub const OBJECTMETA_DIRECTIVE: &str = "objectmeta";

pub const INPUT_FIELD_ID: &str = "id";
pub const ID_TYPE: &str = "ID";
pub const FLOAT_TYPE: &str = "Float";
pub const BOOLEAN_TYPE: &str = "Boolean";

pub fn create_resolver(type_name: &str) -> String {
    format!("Create{type_name}Resolver")
}

pub fn update_resolver(type_name: &str) -> String {
    format!("Update{type_name}Resolver")
}

pub fn create_input(type_name: &str) -> String {
    format!("Create{type_name}Input")
}

pub fn update_input(type_name: &str) -> String {
    format!("Update{type_name}Input")
}

pub fn data_source(type_name: &str) -> String {
    format!("{type_name}DataSource")
}

pub fn soft_delete_mutation(type_name: &str) -> String {
    format!("softDelete{type_name}")
}

pub fn soft_delete_input(type_name: &str) -> String {
    format!("SoftDelete{type_name}Input")
}

pub fn soft_delete_resolver(type_name: &str) -> String {
    format!("SoftDelete{type_name}Resolver")
}
