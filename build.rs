use std::fs;

const SITE_KEYS: [&str; 5] = ["content", "static", "template", "output", "basepath"];

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    let Some(site) = table.get("site").and_then(toml::Value::as_table) else {
        panic!("Invalid default_config.toml: missing [site] table");
    };
    for key in SITE_KEYS {
        if !site.get(key).is_some_and(toml::Value::is_str) {
            panic!("Invalid default_config.toml: [site].{} must be a string", key);
        }
    }
    if let Some(unknown) = site.keys().find(|key| !SITE_KEYS.contains(&key.as_str())) {
        panic!("Invalid default_config.toml: unknown key [site].{}", unknown);
    }
}
