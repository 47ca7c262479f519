use std::fs;

#[path = "src/config_schema.rs"]
mod config_schema;

const CONFIG_PATH: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");
    println!("cargo:rerun-if-changed=src/config_schema.rs");

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    if let Err(e) = config_schema::check(&table) {
        panic!("Invalid default_config.toml: {e}");
    }
}
