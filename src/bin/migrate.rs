use ganimart::{
    config::AppConfig,
    store::{Store, migrations::CURRENT_VERSION, storage::FileStorage},
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    // Opening the store runs every pending migration step.
    let store = Store::open(
        FileStorage::new(&config.store_dir),
        config.store_key.as_str(),
    )?;
    println!(
        "Migrations applied: {} is at schema version {} (latest {CURRENT_VERSION})",
        config.store_key,
        store.document().version
    );
    Ok(())
}
