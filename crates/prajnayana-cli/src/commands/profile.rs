//! Profile commands for CLI.

use clap::Subcommand;
use prajnayana_core::profile::GENDER_OPTIONS;
use prajnayana_core::{sync, ProfileForm};

use crate::common::{connect, print_json, user_id, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the signed-in user's profile
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// One of: Male, Female, Other, Prefer not to say
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        year_of_birth: Option<String>,
    },
}

pub async fn run(action: ProfileAction) -> CliResult {
    let (config, client) = connect()?;
    let mut user = client.get_user(user_id(&config)?).await?;
    let mut form = ProfileForm::from_user(&user);

    match action {
        ProfileAction::Show { json } => {
            if json {
                return print_json(&form);
            }
            println!("Username:      {}", user.username);
            println!("First name:    {}", form.first_name);
            println!("Last name:     {}", form.last_name);
            println!("Email:         {}", form.email);
            println!("Gender:        {}", form.gender);
            println!("Year of birth: {}", form.year_of_birth);
            if !form.country.is_empty() {
                println!("Country:       {}", form.country);
            }
            println!("Last login:    {}", form.last_login);
        }
        ProfileAction::Update {
            first_name,
            last_name,
            email,
            gender,
            year_of_birth,
        } => {
            if let Some(v) = first_name {
                form.first_name = v;
            }
            if let Some(v) = last_name {
                form.last_name = v;
            }
            if let Some(v) = email {
                form.email = v;
            }
            if let Some(v) = gender {
                // Accept any casing of the listed options.
                form.gender = GENDER_OPTIONS
                    .iter()
                    .find(|g| g.eq_ignore_ascii_case(&v))
                    .map_or(v, |g| g.to_string());
            }
            if let Some(v) = year_of_birth {
                form.year_of_birth = v;
            }
            let message = sync::save_profile(&client, &mut user, &form).await?;
            println!("{message}");
        }
    }
    Ok(())
}
