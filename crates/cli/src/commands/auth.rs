//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! heen auth login -e admin@heein.com -p adminlucas
//! heen auth signup -n Maria -e maria@exemplo.com -p segredo
//! heen auth whoami
//! heen auth logout
//! ```

use std::io::{self, Write};

use clap::Subcommand;
use heen_core::Role;
use heen_storefront::AppState;
use heen_storefront::models::User;
use heen_storefront::storage::Storage;
use secrecy::{ExposeSecret, SecretString};

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, value_parser = parse_secret)]
        password: SecretString,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, value_parser = parse_secret)]
        password: SecretString,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

/// Run an `auth` subcommand.
///
/// # Errors
///
/// Returns an error for blank fields, an invalid email, or failed output.
pub fn run<S: Storage>(
    state: &mut AppState<S>,
    command: AuthCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    match command {
        AuthCommand::Login { email, password } => {
            let user = state.login(&email, password.expose_secret())?;
            writeln!(out, "Bem-vindo(a), {}!", user.name)?;
            if user.role == Role::Admin {
                writeln!(out, "Painel administrativo liberado.")?;
            }
        }
        AuthCommand::Signup {
            name,
            email,
            password,
        } => {
            let user = state.sign_up(&name, &email, password.expose_secret())?;
            writeln!(out, "Conta criada. Bem-vindo(a), {}!", user.name)?;
        }
        AuthCommand::Logout => match state.logout() {
            Some(user) => writeln!(out, "Até logo, {}.", user.name)?,
            None => writeln!(out, "Nenhum usuário conectado.")?,
        },
        AuthCommand::Whoami => match state.current_user() {
            Some(user) => write_user(&mut out, user)?,
            None => writeln!(out, "Nenhum usuário conectado.")?,
        },
    }
    Ok(())
}

fn parse_secret(value: &str) -> Result<SecretString, std::convert::Infallible> {
    Ok(SecretString::from(value))
}

fn write_user(out: &mut impl Write, user: &User) -> io::Result<()> {
    writeln!(out, "{} <{}> ({}, id {})", user.name, user.email, user.role, user.id)
}
