use manuscript::config::ManuscriptConfig;
use manuscript::process::probe_version;

pub fn run(config: &ManuscriptConfig) -> anyhow::Result<u8> {
    let tools = [
        ("pandoc", config.convert.binary.as_str(), "--version"),
        ("hunspell", config.spell.binary.as_str(), "-v"),
    ];

    let mut missing = 0;
    for (tool, binary, flag) in tools {
        match probe_version(tool, binary, flag) {
            Ok(version) => println!("ok       {:<10} {}", tool, version),
            Err(e) => {
                missing += 1;
                println!("missing  {:<10} {}", tool, e);
            }
        }
    }

    Ok(if missing == 0 { 0 } else { 1 })
}
