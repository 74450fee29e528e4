//! Site settings inspection.

use dryfruto_admin::db::SettingsRepository;
use dryfruto_core::resolve_settings;

/// Print the effective settings as pretty JSON.
///
/// # Errors
///
/// Returns an error if the database read fails.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let record = SettingsRepository::new(&pool).load().await?;
    if record.is_none() {
        tracing::info!("No settings saved yet, showing defaults");
    }

    let effective = resolve_settings(record.as_ref());

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&effective)?);
    }
    Ok(())
}
