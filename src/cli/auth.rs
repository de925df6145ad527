use crate::cli::open_db;
use crate::error::Result;
use crate::session::sign_in;
use crate::settings::{load_settings, save_settings};

pub fn login(email: &str) -> Result<()> {
    let conn = open_db()?;
    let user = sign_in(&conn, email)?;
    let mut settings = load_settings();
    settings.session = Some(user.email.clone());
    save_settings(&settings)?;
    println!("Signed in as {}", user.email);
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut settings = load_settings();
    match settings.session.take() {
        Some(email) => {
            save_settings(&settings)?;
            println!("Signed out {email}");
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
