use crate::cli::ConfigAction;
use crate::config;

pub fn run(action: &ConfigAction) -> Result<(), i32> {
    match action {
        ConfigAction::Show => match config::load() {
            Some(saved) => {
                let json = serde_json::to_string_pretty(&saved).map_err(|e| {
                    eprintln!("Error: failed to serialize configuration: {e}");
                    1
                })?;
                println!("{json}");
            }
            None => println!("no saved configuration"),
        },
        ConfigAction::Path => match config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!("Error: no config directory available on this platform");
                return Err(1);
            }
        },
        ConfigAction::Clear => {
            let existed = config::clear().map_err(|e| {
                eprintln!("Error: failed to clear configuration: {e}");
                1
            })?;
            if existed {
                println!("saved configuration cleared");
            } else {
                println!("no saved configuration");
            }
        }
    }
    Ok(())
}
