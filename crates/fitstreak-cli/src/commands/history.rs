use clap::Subcommand;
use fitstreak_core::storage::{Config, Database};
use fitstreak_core::{IdentityProvider, KvIdentity, RemoteStore, SessionStore};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// All completed sessions, most recent first
    List,
    /// The most recent completed session
    Latest,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let user_id = KvIdentity::new(&db).current_user()?;
    let store = RemoteStore::new(&config.store);
    let rt = tokio::runtime::Runtime::new()?;

    match action {
        HistoryAction::List => {
            let records = rt.block_on(store.query_all(&user_id))?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        HistoryAction::Latest => match rt.block_on(store.query_latest(&user_id))? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("no completed sessions"),
        },
    }
    Ok(())
}
