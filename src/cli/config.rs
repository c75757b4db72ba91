use owo_colors::OwoColorize;
use std::error::Error;
use std::process::Command;
use waveedit::config::Config;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("Current waveedit configuration:");
    println!("  {}", "[editor]".bold());
    println!("  zoom_step: {}", config.editor.zoom_step);
    println!("  click_threshold_px: {}", config.editor.click_threshold_px);
    println!("  edge_grab_px: {}", config.editor.edge_grab_px);
    println!("  autoscroll_margin_px: {}", config.editor.autoscroll_margin_px);
    println!(
        "  parallel_scan_threshold: {}",
        config.editor.parallel_scan_threshold
    );
    println!("  {}", "[output]".bold());
    println!("  display_width: {}", config.display_width);
    println!("  display_height: {}", config.display_height);
    println!("  log_level: {}", config.log_level);

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("Configuration updated: {key} = {value}");

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    // Ensure config exists
    if !Config::exists()? {
        return Err("waveedit not initialized. Run 'waveedit init' first.".into());
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    // Validate the config after editing
    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
