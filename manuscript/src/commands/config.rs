use std::path::Path;

use manuscript::config::ManuscriptConfig;

pub fn run(config: &ManuscriptConfig, source: Option<&Path>) -> anyhow::Result<u8> {
    match source {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# built-in defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(0)
}
