use ganimart::{
    config::AppConfig,
    store::{Store, storage::FileStorage},
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let mut store = Store::open(
        FileStorage::new(&config.store_dir),
        config.store_key.as_str(),
    )?;
    let doc = store.reset()?;

    for user in &doc.users {
        println!("Ensured user {} (role={})", user.email, user.role.as_str());
    }
    println!(
        "Seed completed. {} products, {} reviews",
        doc.products.len(),
        doc.reviews.len()
    );
    Ok(())
}
