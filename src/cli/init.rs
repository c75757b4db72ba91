use owo_colors::OwoColorize;
use std::error::Error;
use waveedit::config::Config;

pub fn handle_init() -> Result<(), Box<dyn Error>> {
    // Check if already initialized
    if Config::exists()? {
        return Err(format!(
            "waveedit is already initialized. Use 'waveedit config set <key> <value>' to change settings ({})",
            Config::config_path()?.display()
        )
        .into());
    }

    Config::new().save()?;

    println!("{} waveedit initialized", "✓".green());
    println!(
        "Configuration saved to: {}",
        Config::config_path()?.display()
    );

    Ok(())
}
