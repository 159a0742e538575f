use clap::Subcommand;
use fitstreak_core::storage::Database;
use fitstreak_core::{IdentityProvider, KvIdentity};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the signed-in user id
    Login {
        #[arg(long)]
        user_id: String,
    },
    /// Remove the signed-in user id
    Logout,
    /// Show the current identity
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let identity = KvIdentity::new(&db);

    match action {
        AuthAction::Login { user_id } => {
            identity.sign_in(&user_id)?;
            println!("signed in as {user_id}");
        }
        AuthAction::Logout => {
            identity.sign_out()?;
            println!("signed out");
        }
        AuthAction::Status => {
            let status = match identity.current_user() {
                Ok(user_id) => serde_json::json!({ "signed_in": true, "user_id": user_id }),
                Err(_) => serde_json::json!({ "signed_in": false }),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
